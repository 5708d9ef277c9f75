//! Label, description and color lookup for model features
//!
//! Three flat tables, one pure total function each. Descriptions and colors
//! are keyed by the *resolved* label, so an unmapped raw key falls through
//! to the fallbacks for both.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Description for labels missing from the table
pub const FALLBACK_DESCRIPTION: &str = "No description available.";

/// Bar color for labels missing from the table (neutral gray, unused elsewhere)
pub const FALLBACK_COLOR: &str = "#9CA3AF";

/// Raw model column -> human-readable label
static LABELS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("area", "Area"),
        ("rooms", "Rooms"),
        ("bathroom", "Bathrooms"),
        ("parking spaces", "Parking Spaces"),
        ("floor", "Floor"),
        ("animal", "Pets Allowed"),
        ("furniture", "Furnished"),
        ("hoa (R$)", "HOA"),
        ("property tax (R$)", "Property Tax"),
        ("fire insurance (R$)", "Fire Insurance"),
        ("city_Belo Horizonte", "Belo Horizonte"),
        ("city_Campinas", "Campinas"),
        ("city_Porto Alegre", "Porto Alegre"),
        ("city_Rio de Janeiro", "Rio de Janeiro"),
        ("city_São Paulo", "São Paulo"),
    ])
});

/// Resolved label -> one-sentence explanation
static DESCRIPTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Area", "Usable floor area of the property in square meters."),
        ("Rooms", "Number of rooms in the property."),
        ("Bathrooms", "Number of bathrooms in the property."),
        ("Parking Spaces", "Number of parking spaces included with the property."),
        ("Floor", "Floor on which the unit is located."),
        ("Pets Allowed", "Whether the landlord accepts pets."),
        ("Furnished", "Whether the property is rented furnished."),
        ("HOA", "Monthly homeowners association (condominium) fee in R$."),
        ("Property Tax", "Monthly share of the municipal property tax (IPTU) in R$."),
        ("Fire Insurance", "Monthly fire insurance premium in R$."),
        ("Belo Horizonte", "Listing is located in Belo Horizonte."),
        ("Campinas", "Listing is located in Campinas."),
        ("Porto Alegre", "Listing is located in Porto Alegre."),
        ("Rio de Janeiro", "Listing is located in Rio de Janeiro."),
        ("São Paulo", "Listing is located in São Paulo."),
    ])
});

/// Resolved label -> `#RRGGBB` bar color
static COLORS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Area", "#4BC0C0"),
        ("Rooms", "#36A2EB"),
        ("Bathrooms", "#9966FF"),
        ("Parking Spaces", "#FF9F40"),
        ("Floor", "#FFCD56"),
        ("Pets Allowed", "#8BC34A"),
        ("Furnished", "#795548"),
        ("HOA", "#FF6384"),
        ("Property Tax", "#E91E63"),
        ("Fire Insurance", "#F44336"),
        ("Belo Horizonte", "#3F51B5"),
        ("Campinas", "#009688"),
        ("Porto Alegre", "#00BCD4"),
        ("Rio de Janeiro", "#2196F3"),
        ("São Paulo", "#673AB7"),
    ])
});

/// Human-readable label for a raw feature key; unknown keys pass through unchanged
pub fn label(key: &str) -> &str {
    LABELS.get(key).copied().unwrap_or(key)
}

/// Description for a resolved label
pub fn description(label: &str) -> &'static str {
    DESCRIPTIONS.get(label).copied().unwrap_or(FALLBACK_DESCRIPTION)
}

/// Display color for a resolved label
pub fn color(label: &str) -> &'static str {
    COLORS.get(label).copied().unwrap_or(FALLBACK_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_key_resolves() {
        assert_eq!(label("hoa (R$)"), "HOA");
        assert_eq!(label("city_São Paulo"), "São Paulo");
        assert_eq!(description("HOA"), "Monthly homeowners association (condominium) fee in R$.");
        assert_eq!(color("Area"), "#4BC0C0");
    }

    #[test]
    fn test_label_identity_fallback() {
        for key in ["", "num__area", "city_Curitiba", "ÁREA", "   "] {
            assert_eq!(label(key), key);
        }
    }

    #[test]
    fn test_description_and_color_fallbacks() {
        assert_eq!(description("num__area"), FALLBACK_DESCRIPTION);
        assert_eq!(color("num__area"), FALLBACK_COLOR);
        assert_eq!(description(""), FALLBACK_DESCRIPTION);
        assert!(!color("").is_empty());
    }

    #[test]
    fn test_description_keyed_by_label_not_raw_key() {
        // The raw key is not a label, so it must not hit the description table
        assert_eq!(description("hoa (R$)"), FALLBACK_DESCRIPTION);
        assert_ne!(description(label("hoa (R$)")), FALLBACK_DESCRIPTION);
    }

    #[test]
    fn test_tables_are_consistent() {
        for resolved in LABELS.values() {
            assert!(DESCRIPTIONS.contains_key(resolved), "missing description for {resolved}");
            assert!(COLORS.contains_key(resolved), "missing color for {resolved}");
        }
    }

    #[test]
    fn test_fallback_color_distinct() {
        assert!(COLORS.values().all(|c| !c.eq_ignore_ascii_case(FALLBACK_COLOR)));
    }
}
