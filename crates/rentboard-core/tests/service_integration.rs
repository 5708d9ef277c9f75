//! Integration tests against an in-process stub of the prediction service

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use rentboard_core::format::format_brl;
use rentboard_core::{
    CoreError, Dashboard, DashboardEvent, PropertyAttributes, Resolution, ServiceClient,
    ServiceConfig, TopN,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Bind the router on an ephemeral port and return its base URL
async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn dashboard_for(base_url: &str) -> Dashboard {
    let config = ServiceConfig::new(base_url)
        .unwrap()
        .with_timeout(Duration::from_secs(5));
    Dashboard::new(ServiceClient::new(config).unwrap(), TopN::Ten)
}

fn feature_payload(n: usize) -> Value {
    let records: Vec<Value> = (0..n)
        .map(|i| json!({ "Feature": format!("city_f{i}"), "Importance": (i as f64) / 100.0 }))
        .collect();
    json!({ "feature_importances": records })
}

#[tokio::test]
async fn test_feature_importance_ranked_and_labelled() {
    let router = Router::new().route(
        "/feature_importance",
        get(|| async {
            Json(json!({
                "feature_importances": [
                    { "Feature": "floor", "Importance": 0.05 },
                    { "Feature": "area", "Importance": 0.31 },
                    { "Feature": "hoa (R$)", "Importance": 0.12 },
                    { "Feature": "mystery_column", "Importance": 0.2 }
                ]
            }))
        }),
    );
    let base = spawn_stub(router).await;
    let dashboard = dashboard_for(&base);

    assert_eq!(dashboard.refresh_feature_importance().await, Resolution::Applied);

    let view = dashboard.features();
    let labels: Vec<&str> = view.features().iter().map(|f| f.label.as_str()).collect();
    assert_eq!(labels, vec!["Area", "mystery_column", "HOA", "Floor"]);
    assert_eq!(view.features()[1].description, "No description available.");
    assert!(!view.state().is_loading());
    assert!(view.state().error().is_none());
}

#[tokio::test]
async fn test_feature_importance_server_error_clears_view() {
    let router = Router::new().route(
        "/feature_importance",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = spawn_stub(router).await;
    let dashboard = dashboard_for(&base);
    let mut rx = dashboard.event_bus().subscribe();

    let resolution = dashboard.refresh_feature_importance().await;
    assert_eq!(
        resolution,
        Resolution::Failed("Error 500: Internal Server Error".to_string())
    );

    let view = dashboard.features();
    assert!(!view.state().is_loading());
    assert!(!view.state().error().unwrap_or_default().is_empty());
    assert!(view.features().is_empty());
    drop(view);

    assert!(matches!(
        rx.recv().await.unwrap(),
        DashboardEvent::RequestFailed { .. }
    ));
}

#[tokio::test]
async fn test_error_body_message_preferred() {
    let router = Router::new().route(
        "/predict",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "City not supported" })),
            )
        }),
    );
    let base = spawn_stub(router).await;
    let client = ServiceClient::new(ServiceConfig::new(&base).unwrap()).unwrap();

    let err = client.predict(&sao_paulo()).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.display_message(), "City not supported");
}

#[tokio::test]
async fn test_malformed_payload() {
    let router = Router::new().route("/rental_trends", get(|| async { "not json" }));
    let base = spawn_stub(router).await;
    let client = ServiceClient::new(ServiceConfig::new(&base).unwrap()).unwrap();

    let err = client.rental_trends().await.unwrap_err();
    assert!(matches!(err, CoreError::MalformedPayload { .. }));
    assert!(err
        .display_message()
        .starts_with("Malformed response from service"));
}

#[tokio::test]
async fn test_unreachable_service_is_unknown_error() {
    // Grab a free port, then close it so nothing is listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client =
        ServiceClient::new(ServiceConfig::new(format!("http://{}", addr)).unwrap()).unwrap();
    let err = client.feature_importance().await.unwrap_err();
    assert!(matches!(err, CoreError::Unknown { .. }));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_rental_trends_campinas_rounding() {
    let router = Router::new().route(
        "/rental_trends",
        get(|| async {
            Json(json!({
                "rental_trends": [
                    {
                        "city": "São Paulo",
                        "average_rent_brl": 4652.79,
                        "median_rent_brl": 3500.0,
                        "min_rent_brl": 500.0,
                        "max_rent_brl": 45000.0,
                        "count": 5887
                    },
                    {
                        "city": "Campinas",
                        "average_rent_brl": 1999.995,
                        "median_rent_brl": 1800.0,
                        "min_rent_brl": 450.0,
                        "max_rent_brl": 15000.0,
                        "count": 853
                    }
                ]
            }))
        }),
    );
    let base = spawn_stub(router).await;
    let dashboard = dashboard_for(&base);

    assert_eq!(dashboard.refresh_rental_trends().await, Resolution::Applied);

    let view = dashboard.trends();
    let cities: Vec<&str> = view.trends().iter().map(|t| t.city.as_str()).collect();
    assert_eq!(cities, vec!["São Paulo", "Campinas"]);

    let campinas = &view.trends()[1];
    assert_eq!(format_brl(campinas.average_rent), "R$ 2.000,00");
    assert_eq!(campinas.listing_count, 853);
}

fn sao_paulo() -> PropertyAttributes {
    PropertyAttributes {
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
    }
}

async fn predict_handler(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let expected = json!({
        "city": "São Paulo",
        "area": 50.0,
        "rooms": 2.0,
        "bathroom": 1.0,
        "parkingSpaces": 1.0,
        "floor": 3.0,
        "animal": true,
        "furniture": false,
        "hoa": 300.0,
        "propertyTax": 100.0,
        "fireInsurance": 50.0
    });
    if body != expected {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": format!("unexpected body: {}", body) })),
        );
    }
    (StatusCode::OK, Json(json!({ "total_monthly_cost_brl": 2345.67 })))
}

#[tokio::test]
async fn test_predict_end_to_end() {
    let router = Router::new().route("/predict", post(predict_handler));
    let base = spawn_stub(router).await;
    let dashboard = dashboard_for(&base);
    let mut rx = dashboard.event_bus().subscribe();

    let mut form = rentboard_core::PropertyForm::new();
    for (field, value) in [
        (rentboard_core::FormField::City, "São Paulo"),
        (rentboard_core::FormField::Area, "50"),
        (rentboard_core::FormField::Rooms, "2"),
        (rentboard_core::FormField::Bathroom, "1"),
        (rentboard_core::FormField::ParkingSpaces, "1"),
        (rentboard_core::FormField::Floor, "3"),
        (rentboard_core::FormField::Hoa, "300"),
        (rentboard_core::FormField::PropertyTax, "100"),
        (rentboard_core::FormField::FireInsurance, "50"),
    ] {
        form.set_text(field, value);
    }
    form.set_flag(rentboard_core::FormField::Animal, true);

    let mut submitted = None;
    assert!(form.submit(|attrs| submitted = Some(attrs)));
    let attrs = submitted.unwrap();
    assert_eq!(attrs, sao_paulo());

    assert_eq!(dashboard.predict(attrs).await, Resolution::Applied);

    let view = dashboard.prediction();
    assert_eq!(view.prediction_text().as_deref(), Some("R$ 2345.67"));
    assert_eq!(view.last_request().map(|a| a.city.as_str()), Some("São Paulo"));
    drop(view);

    assert_eq!(
        rx.recv().await.unwrap(),
        DashboardEvent::PredictionReady(2345.67)
    );
}

#[tokio::test]
async fn test_late_response_never_overwrites_newer_state() {
    async fn slow_first(State(calls): State<Arc<AtomicUsize>>) -> Json<Value> {
        let call = calls.fetch_add(1, Ordering::SeqCst);
        if call == 0 {
            tokio::time::sleep(Duration::from_millis(400)).await;
            Json(feature_payload(3))
        } else {
            Json(feature_payload(12))
        }
    }

    let calls = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route("/feature_importance", get(slow_first))
        .with_state(calls.clone());
    let base = spawn_stub(router).await;
    let dashboard = dashboard_for(&base);

    let (first, second) = tokio::join!(dashboard.refresh_feature_importance(), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        dashboard.refresh_feature_importance().await
    });

    assert_eq!(second, Resolution::Applied);
    assert_eq!(first, Resolution::Stale);
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    let view = dashboard.features();
    assert_eq!(view.features().len(), 10);
    assert!(!view.state().is_loading());
}

#[tokio::test]
async fn test_top_n_change_rederives_then_refetches() {
    let router = Router::new().route(
        "/feature_importance",
        get(|| async { Json(feature_payload(20)) }),
    );
    let base = spawn_stub(router).await;
    let dashboard = dashboard_for(&base);

    dashboard.refresh_feature_importance().await;
    assert_eq!(dashboard.features().features().len(), 10);

    assert!(dashboard.set_top_n(TopN::Five));
    assert_eq!(dashboard.features().features().len(), 5);

    dashboard.refresh_feature_importance().await;
    let view = dashboard.features();
    assert_eq!(view.features().len(), 5);
    assert!(view
        .features()
        .windows(2)
        .all(|w| w[0].importance >= w[1].importance));
}
