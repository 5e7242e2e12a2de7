use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use pricely_core::config::AppConfig;
use serde::Serialize;

#[derive(Clone)]
pub struct HealthState {
    product_service_url: String,
    admin_service_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub product_service_url: String,
    pub admin_service_url: String,
    pub checked_at: String,
}

pub fn router(config: &AppConfig) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState {
        product_service_url: config.collaborators.product_service_url.clone(),
        admin_service_url: config.collaborators.admin_service_url.clone(),
    })
}

/// The engine holds no state and no connections, so readiness is just the
/// process being up; collaborator URLs are echoed for operator inspection.
pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let payload = HealthResponse {
        status: "ready",
        service: "pricely-server",
        product_service_url: state.product_service_url,
        admin_service_url: state.admin_service_url,
        checked_at: Utc::now().to_rfc3339(),
    };
    (StatusCode::OK, Json(payload))
}
