//! Cross-city rental trend records

use serde::{Deserialize, Serialize};

/// One city's rent summary as received from `GET /rental_trends`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTrendRecord {
    pub city: String,
    #[serde(rename = "average_rent_brl")]
    pub average_rent: f64,
    #[serde(rename = "median_rent_brl")]
    pub median_rent: f64,
    #[serde(rename = "min_rent_brl")]
    pub min_rent: f64,
    #[serde(rename = "max_rent_brl")]
    pub max_rent: f64,
    #[serde(rename = "count")]
    pub listing_count: u64,
}

/// Envelope for `GET /rental_trends`
#[derive(Debug, Clone, Deserialize)]
pub struct RentalTrendsResponse {
    pub rental_trends: Vec<RawTrendRecord>,
}

/// Presentation-ready city summary, one point on the trend line
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayTrend {
    pub city: String,
    /// Rounded half-up to two decimals
    pub average_rent: f64,
    pub median_rent: f64,
    pub min_rent: f64,
    pub max_rent: f64,
    pub listing_count: u64,
}
