//! Data models for rentboard
//!
//! Raw records mirror the service's JSON; display records are derived,
//! immutable, and rebuilt wholesale on every fetch.

pub mod feature;
pub mod property;
pub mod trend;

pub use feature::{DisplayFeature, FeatureImportanceResponse, RawFeatureRecord, TopN};
pub use property::{Prediction, PropertyAttributes};
pub use trend::{DisplayTrend, RawTrendRecord, RentalTrendsResponse};
