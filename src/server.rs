//! HTTP surface of the forecast service.
//!
//! One data route serves the assembled report for the configured location;
//! `/health` answers liveness probes without running a forecast cycle. The
//! service stays up even when startup loading fails, answering 503 with the
//! failure detail until the operator fixes the data directory.

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::context::ServiceContext;
use crate::model::InitError;
use crate::pipeline;

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// What the handlers see: a fully loaded context, or the reason there is
/// none. Loading happens once at startup; requests never touch the disk.
#[derive(Clone)]
pub enum ServiceState {
    Ready(Arc<ServiceContext>),
    Unavailable(String),
}

impl ServiceState {
    pub fn ready(context: ServiceContext) -> ServiceState {
        ServiceState::Ready(Arc::new(context))
    }

    pub fn unavailable(error: &InitError) -> ServiceState {
        ServiceState::Unavailable(error.to_string())
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Builds the service router. The forecast route is bound to the lowercased
/// location name, e.g. `/api/predict/varanasi` for "Varanasi".
pub fn router(state: ServiceState, location: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let predict_path = format!("/api/predict/{}", location.to_lowercase());

    Router::new()
        .route(&predict_path, get(predict))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn predict(State(state): State<ServiceState>) -> Response {
    match state {
        ServiceState::Ready(context) => match pipeline::run_report(&context) {
            Ok(report) => (StatusCode::OK, Json(report)).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "forecast cycle failed");
                error_response(&err.to_string())
            }
        },
        ServiceState::Unavailable(detail) => error_response(&detail),
    }
}

async fn health(State(state): State<ServiceState>) -> Response {
    let body = match &state {
        ServiceState::Ready(_) => json!({
            "status": "ready",
            "version": env!("CARGO_PKG_VERSION"),
        }),
        ServiceState::Unavailable(detail) => json!({
            "status": "unavailable",
            "version": env!("CARGO_PKG_VERSION"),
            "error": detail,
        }),
    };
    (StatusCode::OK, Json(body)).into_response()
}

fn error_response(detail: &str) -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "error": detail })),
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryStore;
    use crate::model::{FORECAST_HORIZON, HISTORY_WINDOW, Parameter};
    use crate::predict::{Predictor, PredictorRegistry};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    struct Fixed([f64; FORECAST_HORIZON]);

    impl Predictor for Fixed {
        fn predict(
            &self,
            _window: &[f64; HISTORY_WINDOW],
        ) -> Result<[f64; FORECAST_HORIZON], String> {
            Ok(self.0)
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    fn history(rows: usize) -> HistoryStore {
        let mut csv = String::from(
            "date,rainfall_mm,water_level_meters,flow_m3_s,temperature_celsius,\
             do_mg_L,bod_mg_L,nitrate_mg_L,fecal_coliform_mpn_100ml\n",
        );
        for day in 0..rows {
            csv.push_str(&format!(
                "2024-06-{:02},2.0,70.0,1500.0,27.0,6.5,4.0,5.0,900\n",
                day + 1
            ));
        }
        HistoryStore::from_reader(csv.as_bytes()).unwrap()
    }

    fn ready_state(rows: usize) -> ServiceState {
        let registry = PredictorRegistry::from_models(
            Parameter::ALL
                .into_iter()
                .map(|p| (p, Box::new(Fixed([1.0, 2.0, 3.0])) as Box<dyn Predictor>))
                .collect(),
        );
        ServiceState::ready(ServiceContext {
            location: "Varanasi".to_string(),
            registry,
            history: history(rows),
        })
    }

    async fn get_json(
        app: Router,
        uri: &str,
    ) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap();
        (status, value)
    }

    #[tokio::test]
    async fn test_predict_route_serves_the_assembled_report() {
        let app = router(ready_state(12), "Varanasi");
        let (status, body) = get_json(app, "/api/predict/varanasi").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["location"], "Varanasi");
        assert_eq!(body["forecasts"].as_object().unwrap().len(), 8);
        assert_eq!(body["forecasts"]["water_level_meters"][2], 3.0);
        assert!(body["alerts"].is_array());
        assert!(body["source_inference"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_location_is_not_found() {
        let app = router(ready_state(12), "Varanasi");
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/predict/agra")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unavailable_state_answers_503_with_detail() {
        let state =
            ServiceState::unavailable(&InitError::MissingModel(Parameter::Bod));
        let app = router(state, "Varanasi");
        let (status, body) = get_json(app, "/api/predict/varanasi").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body["error"],
            "no model artifact for parameter 'bod_mg_L'"
        );
    }

    #[tokio::test]
    async fn test_failed_cycle_answers_503() {
        // Nine observations cannot fill a ten-day window.
        let app = router(ready_state(9), "Varanasi");
        let (status, body) = get_json(app, "/api/predict/varanasi").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let detail = body["error"].as_str().unwrap();
        assert!(detail.contains("too short"), "unexpected detail: {detail}");
    }

    #[tokio::test]
    async fn test_health_reports_ready() {
        let app = router(ready_state(12), "Varanasi");
        let (status, body) = get_json(app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_health_reports_unavailable_without_failing() {
        let state = ServiceState::Unavailable("data file missing".to_string());
        let app = router(state, "Varanasi");
        let (status, body) = get_json(app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "unavailable");
        assert_eq!(body["error"], "data file missing");
    }
}
