//! TUI tab implementations

pub mod features;
pub mod predict;
pub mod trends;

pub use features::FeaturesTab;
pub use predict::PredictTab;
pub use trends::TrendsTab;
