use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use listing_rules::forms::self_upload::{self_upload_router, FormSection, SelfUploadState};
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Serialize)]
pub(crate) struct SectionsResponse {
    pub(crate) sections: Vec<&'static str>,
}

pub(crate) fn with_service_routes(forms: SelfUploadState) -> axum::Router {
    self_upload_router(forms)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/self-upload/sections",
            axum::routing::get(sections_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn sections_endpoint() -> Json<SectionsResponse> {
    Json(SectionsResponse {
        sections: FormSection::ALL.iter().map(|section| section.label()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::self_upload_state;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use listing_rules::config::FormsConfig;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(ready: bool) -> axum::Router {
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_service_routes(self_upload_state(&FormsConfig { track_errors: true }))
            .layer(Extension(state))
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    #[tokio::test]
    async fn readiness_reports_initializing_until_bound() {
        let response = app(false).oneshot(get("/ready")).await.expect("response");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(read_json(response).await["status"], "initializing");

        let response = app(true).oneshot(get("/ready")).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn sections_endpoint_lists_wizard_sections() {
        let response = app(true)
            .oneshot(get("/api/v1/self-upload/sections"))
            .await
            .expect("response");

        let body = read_json(response).await;
        assert_eq!(
            body["sections"],
            json!(["basic", "pg_details", "pg_rooms", "pg_extras"])
        );
    }

    #[tokio::test]
    async fn field_rules_are_mounted_next_to_health_routes() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/self-upload/fields")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "section": "pg_extras", "params": { "service": "pg" } }).to_string(),
            ))
            .expect("request");

        let response = app(true).oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        let keys: Vec<&str> = body["fields"]
            .as_array()
            .expect("fields array")
            .iter()
            .filter_map(|field| field["key"].as_str())
            .collect();
        assert!(keys.contains(&"additional_information"));
        assert!(keys.contains(&"meal_charges"));
    }

    #[tokio::test]
    async fn metrics_are_rendered_as_prometheus_text() {
        let response = app(true).oneshot(get("/metrics")).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE),
            Some(&header::HeaderValue::from_static("text/plain; version=0.0.4"))
        );
    }

    #[tokio::test]
    async fn healthcheck_is_always_ok() {
        let response = app(false).oneshot(get("/health")).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["status"], "ok");
    }
}
