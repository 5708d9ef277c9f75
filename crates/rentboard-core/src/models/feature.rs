//! Feature-importance records

use serde::{Deserialize, Serialize};

/// Feature importance as received from `GET /feature_importance`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFeatureRecord {
    /// Opaque model column name (e.g. `"hoa (R$)"`, `"city_Campinas"`)
    #[serde(rename = "Feature")]
    pub feature_key: String,

    /// Relative importance, conventionally in [0, 1]
    #[serde(rename = "Importance")]
    pub importance: f64,
}

impl RawFeatureRecord {
    pub fn new(feature_key: impl Into<String>, importance: f64) -> Self {
        Self {
            feature_key: feature_key.into(),
            importance,
        }
    }
}

/// Envelope for `GET /feature_importance`
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureImportanceResponse {
    pub feature_importances: Vec<RawFeatureRecord>,
}

/// Presentation-ready feature, one bar in the chart
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFeature {
    pub label: String,
    pub importance: f64,
    pub description: String,
    /// `#RRGGBB` bar fill
    pub color: String,
}

/// Truncation limit for the feature ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TopN {
    Five,
    #[default]
    Ten,
    Fifteen,
}

impl TopN {
    pub fn all() -> &'static [TopN] {
        &[TopN::Five, TopN::Ten, TopN::Fifteen]
    }

    pub fn value(self) -> usize {
        match self {
            TopN::Five => 5,
            TopN::Ten => 10,
            TopN::Fifteen => 15,
        }
    }

    /// Accepts only 5, 10 or 15
    pub fn from_value(n: usize) -> Option<Self> {
        match n {
            5 => Some(TopN::Five),
            10 => Some(TopN::Ten),
            15 => Some(TopN::Fifteen),
            _ => None,
        }
    }

    /// Cycle 5 -> 10 -> 15 -> 5
    pub fn next(self) -> Self {
        match self {
            TopN::Five => TopN::Ten,
            TopN::Ten => TopN::Fifteen,
            TopN::Fifteen => TopN::Five,
        }
    }

    pub fn display(self) -> String {
        format!("Top {}", self.value())
    }
}
