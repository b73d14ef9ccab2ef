//! Contains all the routes that this application can handle.

mod publication_info;
mod subscribe;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::AppState;

/// All the routes of the server
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/subscribe", post(subscribe::subscribe))
        .route("/publication-info", get(publication_info::publication_info))
        .with_state(app_state)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Beehiiv Integration Backend is running" }))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "beehiiv-integration" }))
}
