//! rentboard-core - Core library for rentboard
//!
//! Provides the service client, series transforms, label tables, per-view
//! request state and the chart selection controller.

pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod event;
pub mod form;
pub mod format;
pub mod labels;
pub mod models;
pub mod selection;
pub mod transform;
pub mod view;

pub use client::{Endpoint, ServiceClient};
pub use config::ServiceConfig;
pub use dashboard::Dashboard;
pub use error::CoreError;
pub use event::{DashboardEvent, EventBus, ViewKind};
pub use form::{FormErrors, FormField, PropertyForm};
pub use models::{
    DisplayFeature, DisplayTrend, Prediction, PropertyAttributes, RawFeatureRecord,
    RawTrendRecord, TopN,
};
pub use selection::{DetailSurface, Selection};
pub use view::{RequestId, Resolution};
