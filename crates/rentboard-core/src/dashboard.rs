//! Dashboard: the three views plus the client that feeds them
//!
//! Each view sits behind its own `parking_lot::RwLock`; locks are only taken
//! for a state transition and never held across an `.await`.

use crate::client::ServiceClient;
use crate::event::{DashboardEvent, EventBus, ViewKind};
use crate::models::{PropertyAttributes, TopN};
use crate::view::{
    FeatureImportanceView, PendingRequest, PredictionView, RentalTrendsView, Resolution,
};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

/// Central state for rentboard
///
/// Shared as `Arc<Dashboard>` between the UI loop and request tasks.
pub struct Dashboard {
    client: ServiceClient,

    /// Feature-importance chart
    features: RwLock<FeatureImportanceView>,

    /// Rental-trend chart
    trends: RwLock<RentalTrendsView>,

    /// Prediction card
    prediction: RwLock<PredictionView>,

    event_bus: EventBus,
}

impl Dashboard {
    pub fn new(client: ServiceClient, top_n: TopN) -> Self {
        Self {
            client,
            features: RwLock::new(FeatureImportanceView::new(top_n)),
            trends: RwLock::new(RentalTrendsView::new()),
            prediction: RwLock::new(PredictionView::new()),
            event_bus: EventBus::default_capacity(),
        }
    }

    pub fn client(&self) -> &ServiceClient {
        &self.client
    }

    /// Get the event bus for subscribing to updates
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    // ===================
    // View access
    // ===================

    pub fn features(&self) -> RwLockReadGuard<'_, FeatureImportanceView> {
        self.features.read()
    }

    /// Mutable access for selection changes
    pub fn features_mut(&self) -> RwLockWriteGuard<'_, FeatureImportanceView> {
        self.features.write()
    }

    pub fn trends(&self) -> RwLockReadGuard<'_, RentalTrendsView> {
        self.trends.read()
    }

    pub fn trends_mut(&self) -> RwLockWriteGuard<'_, RentalTrendsView> {
        self.trends.write()
    }

    pub fn prediction(&self) -> RwLockReadGuard<'_, PredictionView> {
        self.prediction.read()
    }

    /// True while any view has a request in flight
    pub fn is_loading(&self) -> bool {
        self.features.read().state().is_loading()
            || self.trends.read().state().is_loading()
            || self.prediction.read().state().is_loading()
    }

    // ===================
    // Requests
    // ===================

    /// Change the top-N preference. Re-derives from the current payload
    /// right away; returns true when the caller should also re-fetch.
    pub fn set_top_n(&self, top_n: TopN) -> bool {
        let changed = self.features.write().set_top_n(top_n);
        if changed {
            debug!(top_n = top_n.value(), "Top-N preference changed");
        }
        changed
    }

    /// Fetch `/feature_importance` and rebuild the ranking
    pub async fn refresh_feature_importance(&self) -> Resolution {
        let pending = PendingRequest::start(&self.features);
        let request = pending.id().value();
        let outcome = self.client.feature_importance().await;
        let resolution = pending.settle(outcome);

        match &resolution {
            Resolution::Applied => {
                let count = self.features.read().features().len();
                info!(request, bars = count, "Feature importance loaded");
                self.event_bus.publish(DashboardEvent::FeaturesLoaded(count));
            }
            Resolution::Failed(message) => {
                self.publish_failure(ViewKind::FeatureImportance, message);
            }
            Resolution::Stale => {}
        }
        resolution
    }

    /// Fetch `/rental_trends` and rebuild the series
    pub async fn refresh_rental_trends(&self) -> Resolution {
        let pending = PendingRequest::start(&self.trends);
        let request = pending.id().value();
        let outcome = self.client.rental_trends().await;
        let resolution = pending.settle(outcome);

        match &resolution {
            Resolution::Applied => {
                let count = self.trends.read().trends().len();
                info!(request, cities = count, "Rental trends loaded");
                self.event_bus.publish(DashboardEvent::TrendsLoaded(count));
            }
            Resolution::Failed(message) => {
                self.publish_failure(ViewKind::RentalTrends, message);
            }
            Resolution::Stale => {}
        }
        resolution
    }

    /// Submit validated attributes to `/predict`
    pub async fn predict(&self, attrs: PropertyAttributes) -> Resolution {
        self.prediction.write().record_request(attrs.clone());

        let pending = PendingRequest::start(&self.prediction);
        let request = pending.id().value();
        let outcome = self.client.predict(&attrs).await;
        let resolution = pending.settle(outcome);

        match &resolution {
            Resolution::Applied => {
                if let Some(total) = self.prediction.read().prediction() {
                    info!(request, city = %attrs.city, total, "Prediction received");
                    self.event_bus.publish(DashboardEvent::PredictionReady(total));
                }
            }
            Resolution::Failed(message) => {
                self.publish_failure(ViewKind::Prediction, message);
            }
            Resolution::Stale => {}
        }
        resolution
    }

    fn publish_failure(&self, view: ViewKind, message: &str) {
        warn!(view = view.name(), error = %message, "Request failed");
        self.event_bus.publish(DashboardEvent::RequestFailed {
            view,
            message: message.to_string(),
        });
    }
}
