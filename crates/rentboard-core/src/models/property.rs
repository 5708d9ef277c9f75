//! Prediction request/response

use serde::{Deserialize, Serialize};

/// Normalized property attributes emitted by the prediction form
///
/// Serialized unchanged as the `POST /predict` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAttributes {
    pub city: String,
    /// Square meters
    pub area: f64,
    pub rooms: f64,
    pub bathroom: f64,
    pub parking_spaces: f64,
    pub floor: f64,
    /// Pets allowed
    pub animal: bool,
    /// Furnished
    pub furniture: bool,
    /// Monthly condominium fee (R$)
    pub hoa: f64,
    /// Monthly property tax (R$)
    pub property_tax: f64,
    /// Monthly fire insurance (R$)
    pub fire_insurance: f64,
}

/// Successful `POST /predict` response
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(rename = "total_monthly_cost_brl")]
    pub total_monthly_cost: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case_keys() {
        let attrs = PropertyAttributes {
            city: "São Paulo".into(),
            area: 50.0,
            rooms: 2.0,
            bathroom: 1.0,
            parking_spaces: 1.0,
            floor: 3.0,
            animal: true,
            furniture: false,
            hoa: 300.0,
            property_tax: 100.0,
            fire_insurance: 50.0,
        };
        let value = serde_json::to_value(&attrs).unwrap();
        assert_eq!(value["parkingSpaces"], 1.0);
        assert_eq!(value["propertyTax"], 100.0);
        assert_eq!(value["fireInsurance"], 50.0);
        assert_eq!(value["animal"], true);
    }

    #[test]
    fn test_prediction_wire_key() {
        let p: Prediction = serde_json::from_str(r#"{"total_monthly_cost_brl": 2345.67}"#).unwrap();
        assert_eq!(p.total_monthly_cost, 2345.67);
    }
}
