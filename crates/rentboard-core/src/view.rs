//! Per-view loading/error/data state
//!
//! Each analytic view owns its own triple and is the only thing that mutates
//! it. Requests are numbered; only the most recent one may settle the view,
//! so a slow response can never overwrite a newer one.

use crate::error::CoreError;
use crate::format::format_prediction;
use crate::models::{
    DisplayFeature, DisplayTrend, Prediction, PropertyAttributes, RawFeatureRecord,
    RawTrendRecord, TopN,
};
use crate::selection::Selection;
use crate::transform::{display_trends, rank_features};
use chrono::{DateTime, Local};
use parking_lot::RwLock;
use tracing::debug;

/// Monotonic request number, scoped to one view
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// What happened when a request settled
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Latest request succeeded; data replaced
    Applied,
    /// Latest request failed; data cleared and message stored
    Failed(String),
    /// A newer request was issued meanwhile; nothing changed
    Stale,
}

/// Loading flag, error string and last good payload for one view
#[derive(Debug, Clone)]
pub struct ViewState<P> {
    payload: Option<P>,
    loading: bool,
    error: Option<String>,
    latest: u64,
    updated_at: Option<DateTime<Local>>,
}

impl<P> Default for ViewState<P> {
    fn default() -> Self {
        Self {
            payload: None,
            loading: false,
            error: None,
            latest: 0,
            updated_at: None,
        }
    }
}

impl<P> ViewState<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request: bump the generation and raise the loading flag
    pub fn begin(&mut self) -> RequestId {
        self.latest += 1;
        self.loading = true;
        RequestId(self.latest)
    }

    pub fn is_current(&self, id: RequestId) -> bool {
        id.0 == self.latest
    }

    /// Settle a request. Stale ids are discarded without touching state.
    pub fn resolve(&mut self, id: RequestId, outcome: Result<P, CoreError>) -> Resolution {
        if !self.is_current(id) {
            debug!(
                request = id.0,
                latest = self.latest,
                "Discarding stale response"
            );
            return Resolution::Stale;
        }

        self.loading = false;
        match outcome {
            Ok(payload) => {
                self.payload = Some(payload);
                self.error = None;
                self.updated_at = Some(Local::now());
                Resolution::Applied
            }
            Err(e) => {
                let message = e.display_message();
                self.payload = None;
                self.error = Some(message.clone());
                Resolution::Failed(message)
            }
        }
    }

    /// Request dropped without an outcome (task aborted or panicked)
    pub fn abandon(&mut self, id: RequestId) {
        if self.is_current(id) && self.loading {
            debug!(request = id.0, "Request abandoned, clearing loading flag");
            self.loading = false;
        }
    }

    pub fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn updated_at(&self) -> Option<DateTime<Local>> {
        self.updated_at
    }
}

/// A view whose state is driven by numbered requests
pub trait TrackedView {
    type Payload;

    fn begin(&mut self) -> RequestId;
    fn resolve(&mut self, id: RequestId, outcome: Result<Self::Payload, CoreError>) -> Resolution;
    fn abandon(&mut self, id: RequestId);
}

/// In-flight request against a locked view
///
/// Dropping it without [`PendingRequest::settle`] clears the loading flag,
/// so no exit path leaves the spinner running.
pub struct PendingRequest<'a, V: TrackedView> {
    view: &'a RwLock<V>,
    id: RequestId,
    settled: bool,
}

impl<'a, V: TrackedView> PendingRequest<'a, V> {
    /// Raise the loading flag on `view` and return the guard
    pub fn start(view: &'a RwLock<V>) -> Self {
        let id = view.write().begin();
        Self {
            view,
            id,
            settled: false,
        }
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn settle(mut self, outcome: Result<V::Payload, CoreError>) -> Resolution {
        self.settled = true;
        self.view.write().resolve(self.id, outcome)
    }
}

impl<V: TrackedView> Drop for PendingRequest<'_, V> {
    fn drop(&mut self) {
        if !self.settled {
            self.view.write().abandon(self.id);
        }
    }
}

// ===================
// Feature importance
// ===================

/// Feature-importance chart state
#[derive(Debug, Default)]
pub struct FeatureImportanceView {
    state: ViewState<Vec<RawFeatureRecord>>,
    top_n: TopN,
    displayed: Vec<DisplayFeature>,
    /// Bumped whenever `displayed` is rebuilt
    revision: u64,
    pub selection: Selection<DisplayFeature>,
}

impl FeatureImportanceView {
    pub fn new(top_n: TopN) -> Self {
        Self {
            top_n,
            ..Default::default()
        }
    }

    pub fn top_n(&self) -> TopN {
        self.top_n
    }

    /// Change the truncation limit; re-derives immediately.
    /// Returns false when the value did not change.
    pub fn set_top_n(&mut self, top_n: TopN) -> bool {
        if self.top_n == top_n {
            return false;
        }
        self.top_n = top_n;
        self.rederive();
        true
    }

    /// Bars in render order
    pub fn features(&self) -> &[DisplayFeature] {
        &self.displayed
    }

    /// Changes every time the bars are rebuilt
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Open the detail surface for the bar at `index`
    pub fn select_at(&mut self, index: usize) -> Option<&DisplayFeature> {
        let item = self.displayed.get(index)?.clone();
        self.selection.select(item);
        self.selection.visible()
    }

    pub fn state(&self) -> &ViewState<Vec<RawFeatureRecord>> {
        &self.state
    }

    fn rederive(&mut self) {
        self.displayed = self
            .state
            .payload()
            .map(|raw| rank_features(raw, self.top_n))
            .unwrap_or_default();
        self.revision += 1;
        self.selection.close();
    }
}

impl TrackedView for FeatureImportanceView {
    type Payload = Vec<RawFeatureRecord>;

    fn begin(&mut self) -> RequestId {
        self.state.begin()
    }

    fn resolve(&mut self, id: RequestId, outcome: Result<Self::Payload, CoreError>) -> Resolution {
        let resolution = self.state.resolve(id, outcome);
        if resolution != Resolution::Stale {
            self.rederive();
        }
        resolution
    }

    fn abandon(&mut self, id: RequestId) {
        self.state.abandon(id);
    }
}

// ===================
// Rental trends
// ===================

/// Rental-trend chart state
#[derive(Debug, Default)]
pub struct RentalTrendsView {
    state: ViewState<Vec<RawTrendRecord>>,
    displayed: Vec<DisplayTrend>,
    /// Bumped whenever `displayed` is rebuilt
    revision: u64,
    pub selection: Selection<DisplayTrend>,
}

impl RentalTrendsView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points in service order
    pub fn trends(&self) -> &[DisplayTrend] {
        &self.displayed
    }

    /// Changes every time the points are rebuilt
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Open the detail surface for the point at `index`
    pub fn select_at(&mut self, index: usize) -> Option<&DisplayTrend> {
        let item = self.displayed.get(index)?.clone();
        self.selection.select(item);
        self.selection.visible()
    }

    pub fn state(&self) -> &ViewState<Vec<RawTrendRecord>> {
        &self.state
    }
}

impl TrackedView for RentalTrendsView {
    type Payload = Vec<RawTrendRecord>;

    fn begin(&mut self) -> RequestId {
        self.state.begin()
    }

    fn resolve(&mut self, id: RequestId, outcome: Result<Self::Payload, CoreError>) -> Resolution {
        let resolution = self.state.resolve(id, outcome);
        if resolution != Resolution::Stale {
            self.displayed = self
                .state
                .payload()
                .map(|raw| display_trends(raw))
                .unwrap_or_default();
            self.revision += 1;
            self.selection.close();
        }
        resolution
    }

    fn abandon(&mut self, id: RequestId) {
        self.state.abandon(id);
    }
}

// ===================
// Prediction
// ===================

/// Prediction card state
#[derive(Debug, Default)]
pub struct PredictionView {
    state: ViewState<Prediction>,
    last_request: Option<PropertyAttributes>,
}

impl PredictionView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember what was submitted, for display next to the result
    pub fn record_request(&mut self, attrs: PropertyAttributes) {
        self.last_request = Some(attrs);
    }

    pub fn last_request(&self) -> Option<&PropertyAttributes> {
        self.last_request.as_ref()
    }

    pub fn prediction(&self) -> Option<f64> {
        self.state.payload().map(|p| p.total_monthly_cost)
    }

    /// `R$ 2345.67`
    pub fn prediction_text(&self) -> Option<String> {
        self.prediction().map(format_prediction)
    }

    pub fn state(&self) -> &ViewState<Prediction> {
        &self.state
    }
}

impl TrackedView for PredictionView {
    type Payload = Prediction;

    fn begin(&mut self) -> RequestId {
        self.state.begin()
    }

    fn resolve(&mut self, id: RequestId, outcome: Result<Self::Payload, CoreError>) -> Resolution {
        self.state.resolve(id, outcome)
    }

    fn abandon(&mut self, id: RequestId) {
        self.state.abandon(id);
    }
}
