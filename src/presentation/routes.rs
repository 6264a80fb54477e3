// Router assembly
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    device_energy, device_measures, health_check, list_plants, plant_energy,
};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/plants", get(list_plants))
        .route("/energy/daily", get(plant_energy))
        .route("/plants/:plant_id/devices/energy/daily", get(device_energy))
        .route(
            "/plants/:plant_id/devices/:device_id/measures",
            get(device_measures),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::catalog_service::tests::sample_catalog;
    use crate::application::dashboard_service::tests::FakeRepository;
    use crate::application::dashboard_service::DashboardService;
    use crate::infrastructure::config::DashboardSettings;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app(repository: FakeRepository) -> Router {
        let catalog = sample_catalog();
        let dashboard_service =
            DashboardService::new(Arc::new(repository), catalog.clone(), "dailyEnergy".into());
        build_router(Arc::new(AppState {
            catalog_service: catalog,
            dashboard_service,
            defaults: DashboardSettings::default(),
        }))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(FakeRepository::default())
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_plants() {
        let (status, body) = get_json(app(FakeRepository::default()), "/plants").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["name"], "North Field");
        assert_eq!(body[0]["devices"][1]["color"], "#00FF00");
        assert!(body[1].get("devices").is_none());
    }

    #[tokio::test]
    async fn test_plant_energy_endpoint() {
        let mut repository = FakeRepository::default();
        repository.energy.insert(
            "north".into(),
            vec![json!({"date": "2025-01-02T12:00:00Z", "energy": 8})],
        );

        let (status, body) = get_json(
            app(repository),
            "/energy/daily?plants=north,south&start=2025-01-01&end=2025-01-03",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["labels"], json!(["01/01", "02/01", "03/01"]));
        assert_eq!(body["series"][0]["data"], json!([0.0, 8.0, 0.0]));
        assert_eq!(body["series"][1]["data"], json!([0.0, 0.0, 0.0]));
        assert_eq!(body["totals"][0]["percentage"], json!(100.0));
        assert_eq!(body["totals"][1]["percentage"], json!(0.0));
    }

    #[tokio::test]
    async fn test_default_window() {
        let (status, body) = get_json(app(FakeRepository::default()), "/energy/daily?last_days=3").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["labels"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_measures_endpoint() {
        let mut repository = FakeRepository::default();
        repository.measures.insert(
            "inv-1/outputActivePower".into(),
            vec![
                json!({"timestamp": "2025-01-01T00:01:00Z", "value": 2}),
                json!({"timestamp": "2025-01-01T00:02:00Z", "value": 4}),
            ],
        );

        let (status, body) = get_json(
            app(repository),
            "/plants/north/devices/inv-1/measures?variable=outputActivePower&start=2025-01-01&end=2025-01-01&interval_minutes=5",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["unit"], "W");
        assert_eq!(body["interval_ms"], 300_000);
        assert_eq!(body["points"], json!([{"x": 1_735_689_600_000_i64, "y": 3.0}]));
    }

    #[tokio::test]
    async fn test_error_statuses() {
        let (status, body) = get_json(
            app(FakeRepository::default()),
            "/plants/west/devices/energy/daily",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");

        let (status, _) = get_json(
            app(FakeRepository::default()),
            "/energy/daily?start=2025-01-01",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get_json(
            app(FakeRepository::default()),
            "/plants/north/devices/inv-1/measures?variable=Status&interval_minutes=0",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = get_json(
            app(FakeRepository::default()),
            "/plants/north/devices/inv-1/measures?interval_minutes=5",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");

        let (status, body) = get_json(
            app(FakeRepository::default()),
            "/plants/north/devices/inv-1/measures?variable=%20",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");

        let (status, body) =
            get_json(app(FakeRepository::default()), "/energy/daily?last_days=4000000000").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");

        let (status, _) = get_json(
            app(FakeRepository::default()),
            "/plants/north/devices/energy/daily?start=0001-01-01&end=9999-12-31",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut failing = FakeRepository::default();
        failing.failing.push("inv-1".into());
        let (status, body) = get_json(
            app(failing),
            "/plants/north/devices/inv-1/measures?variable=Status",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "BACKEND_UNAVAILABLE");
    }
}
