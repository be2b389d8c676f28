//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`.
//! Middleware: CORS, tracing.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Composition lifecycle
        .route("/owners/{id}/begin", post(handlers::compose::begin))
        .route("/owners/{id}/submit", post(handlers::compose::submit))
        .route("/owners/{id}/cancel", post(handlers::compose::cancel))
        .route("/owners/{id}/finalize", post(handlers::compose::finalize))
        .route("/owners/{id}/step", get(handlers::compose::current_step))
        // Delivery counts
        .route("/stats", get(handlers::stats::get_stats));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;

    async fn send(router: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.unwrap_or("").to_string()))
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_full_composition_over_http() {
        let dir = tempfile::tempdir().unwrap();
        let router = build_router(AppState::in_memory(dir.path().to_path_buf()));

        let (status, body) = send(&router, "POST", "/api/v1/owners/1/begin", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["step"], "address1");

        let inputs = [
            r#"{"text": "123 Main St"}"#,
            r#"{"skip": true}"#,
            r#"{"skip": true}"#,
            r#"{"skip": true}"#,
            r#"{"text": "Hello."}"#,
            r#"{"skip": true}"#,
            r#"{"text": "Jane"}"#,
        ];
        for input in inputs {
            let (status, _) = send(&router, "POST", "/api/v1/owners/1/submit", Some(input)).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = send(&router, "POST", "/api/v1/owners/1/finalize", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["file_name"], "Letter from Jane.txt");
        assert_eq!(body["data"]["sections"], serde_json::json!(["address", "body"]));

        let (_, body) = send(&router, "GET", "/api/v1/stats", None).await;
        assert_eq!(body["data"]["completed_letters"], 1);
    }

    #[tokio::test]
    async fn test_submit_without_begin_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let router = build_router(AppState::in_memory(dir.path().to_path_buf()));

        let (status, body) =
            send(&router, "POST", "/api/v1/owners/2/submit", Some(r#"{"skip": true}"#)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errors"][0]["code"], "NO_ACTIVE_SESSION");
    }

    #[tokio::test]
    async fn test_early_finalize_is_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let router = build_router(AppState::in_memory(dir.path().to_path_buf()));

        send(&router, "POST", "/api/v1/owners/3/begin", None).await;
        let (status, body) = send(&router, "POST", "/api/v1/owners/3/finalize", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["errors"][0]["code"], "INCOMPLETE_SESSION");

        let (status, body) = send(&router, "GET", "/api/v1/owners/3/step", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["field"], "address_line1");
    }

    #[tokio::test]
    async fn test_cancel_reports_whether_a_session_existed() {
        let dir = tempfile::tempdir().unwrap();
        let router = build_router(AppState::in_memory(dir.path().to_path_buf()));

        let (_, body) = send(&router, "POST", "/api/v1/owners/4/cancel", None).await;
        assert_eq!(body["data"]["cancelled"], false);

        send(&router, "POST", "/api/v1/owners/4/begin", None).await;
        let (_, body) = send(&router, "POST", "/api/v1/owners/4/cancel", None).await;
        assert_eq!(body["data"]["cancelled"], true);
    }
}
