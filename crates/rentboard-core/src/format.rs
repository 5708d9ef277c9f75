//! Monetary rounding and formatting
//!
//! Rounding works on the decimal representation rather than on `x * 100.0`,
//! so values like `1999.995` (stored as `1999.99499..`) still round half-up
//! the way a user reading the number expects.

/// Round to whole cents, half away from zero
///
/// `None` for NaN, infinities and magnitudes too large to count in cents.
pub fn to_cents(value: f64) -> Option<i128> {
    if !value.is_finite() {
        return None;
    }

    // Nine places absorbs binary representation error without hiding real digits
    let repr = format!("{:.9}", value.abs());
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let units: i128 = int_part.parse().ok()?;
    let digits: Vec<i128> = frac_part
        .bytes()
        .take(3)
        .map(|b| i128::from(b.saturating_sub(b'0')))
        .chain(std::iter::repeat(0))
        .take(3)
        .collect();

    let mut cents = units
        .checked_mul(100)?
        .checked_add(digits[0] * 10 + digits[1])?;
    if digits[2] >= 5 {
        cents = cents.checked_add(1)?;
    }

    Some(if value.is_sign_negative() { -cents } else { cents })
}

/// Round to two decimals, half-up
///
/// Values past cent precision are already whole and come back unchanged.
pub fn round2(value: f64) -> f64 {
    match to_cents(value) {
        Some(cents) => cents as f64 / 100.0,
        None => value,
    }
}

/// Sign, whole reais as a digit string, leftover cents
fn money_parts(value: f64) -> Option<(bool, String, u128)> {
    if !value.is_finite() {
        return None;
    }

    Some(match to_cents(value) {
        Some(cents) => {
            let abs = cents.unsigned_abs();
            (cents < 0, (abs / 100).to_string(), abs % 100)
        }
        // Too large for cents: every digit is whole reais
        None => (value < 0.0, format!("{:.0}", value.abs()), 0),
    })
}

/// Brazilian currency: `R$ 1.234,56`
pub fn format_brl(value: f64) -> String {
    match money_parts(value) {
        Some((negative, reais, cents)) => format!(
            "{}R$ {},{:02}",
            if negative { "-" } else { "" },
            group_thousands(&reais, '.'),
            cents
        ),
        None => "n/a".to_string(),
    }
}

/// Plain two-decimal amount as shown on the prediction card: `R$ 2345.67`
pub fn format_prediction(value: f64) -> String {
    match money_parts(value) {
        Some((negative, reais, cents)) => format!(
            "R$ {}{}.{:02}",
            if negative { "-" } else { "" },
            reais,
            cents
        ),
        None => "n/a".to_string(),
    }
}

/// Importance as a percentage with one decimal (`0.3125` -> `31.3%`)
pub fn format_importance(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    format!("{:.1}%", value * 100.0)
}

/// Thousands grouping for listing counts (`12345` -> `12.345`)
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string(), '.')
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_up_on_binary_edge() {
        assert_eq!(to_cents(1999.995), Some(200_000));
        assert_eq!(round2(1999.995), 2000.0);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(2.675), 2.68);
        assert_eq!(round2(1234.5649), 1234.56);
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(1999.995), "R$ 2.000,00");
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(999.9), "R$ 999,90");
        assert_eq!(format_brl(1_234_567.891), "R$ 1.234.567,89");
        assert_eq!(format_brl(-45.5), "-R$ 45,50");
    }

    #[test]
    fn test_format_prediction() {
        assert_eq!(format_prediction(2345.67), "R$ 2345.67");
        assert_eq!(format_prediction(3000.0), "R$ 3000.00");
        assert_eq!(format_prediction(12.005), "R$ 12.01");
    }

    #[test]
    fn test_non_finite_values() {
        assert_eq!(to_cents(f64::NAN), None);
        assert!(round2(f64::INFINITY).is_infinite());
        assert_eq!(format_brl(f64::NAN), "n/a");
        assert_eq!(format_prediction(f64::NEG_INFINITY), "n/a");
        assert_eq!(format_importance(f64::NAN), "n/a");
    }

    #[test]
    fn test_format_count_and_importance() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(12_345), "12.345");
        assert_eq!(format_count(1_000_000), "1.000.000");
        assert_eq!(format_importance(0.3125), "31.3%");
    }

    #[test]
    fn test_huge_amounts_keep_their_digits() {
        assert_eq!(to_cents(1.0e17), Some(10_000_000_000_000_000_000));
        assert_eq!(round2(1.0e17), 1.0e17);
        assert_eq!(format_brl(1.0e17), "R$ 100.000.000.000.000.000,00");

        assert_eq!(round2(1.0e19), 1.0e19);
        assert_eq!(format_brl(1.0e19), "R$ 10.000.000.000.000.000.000,00");
        assert_eq!(format_prediction(-1.0e19), "R$ -10000000000000000000.00");

        // Past i128 cents: whole reais straight from the float
        assert_eq!(to_cents(1.0e40), None);
        assert_eq!(round2(1.0e40), 1.0e40);
        let text = format_brl(1.0e40);
        assert!(text.starts_with("R$ 10.000.000.000"));
        assert!(text.ends_with(",00"));
    }
}
