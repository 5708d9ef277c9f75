//! Event bus for rentboard using tokio::broadcast
//!
//! Views publish here after a request settles; the TUI subscribes to turn
//! results into toasts and redraws.

use tokio::sync::broadcast;

/// Which view an event concerns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    FeatureImportance,
    RentalTrends,
    Prediction,
}

impl ViewKind {
    pub fn name(self) -> &'static str {
        match self {
            ViewKind::FeatureImportance => "Feature importance",
            ViewKind::RentalTrends => "Rental trends",
            ViewKind::Prediction => "Prediction",
        }
    }
}

/// Events emitted by the dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// Feature ranking replaced (count of bars displayed)
    FeaturesLoaded(usize),
    /// Trend series replaced (count of cities)
    TrendsLoaded(usize),
    /// New prediction available (R$ per month)
    PredictionReady(f64),
    /// Latest request for a view failed
    RequestFailed { view: ViewKind, message: String },
}

/// Event bus for broadcasting dashboard events
pub struct EventBus {
    sender: broadcast::Sender<DashboardEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create with default capacity (64 events)
    pub fn default_capacity() -> Self {
        Self::new(64)
    }

    pub fn publish(&self, event: DashboardEvent) {
        // No subscribers is fine
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::default_capacity()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_bus_publish_subscribe() {
        let bus = EventBus::default_capacity();
        let mut rx = bus.subscribe();

        bus.publish(DashboardEvent::FeaturesLoaded(10));
        bus.publish(DashboardEvent::RequestFailed {
            view: ViewKind::RentalTrends,
            message: "Error 500: Internal Server Error".into(),
        });

        assert_eq!(rx.recv().await.unwrap(), DashboardEvent::FeaturesLoaded(10));
        let second = rx.recv().await.unwrap();
        assert!(matches!(
            second,
            DashboardEvent::RequestFailed { view: ViewKind::RentalTrends, .. }
        ));
    }

    #[test]
    fn test_event_bus_no_subscribers_ok() {
        let bus = EventBus::default_capacity();
        assert_eq!(bus.subscriber_count(), 0);
        bus.publish(DashboardEvent::TrendsLoaded(5));
    }
}
