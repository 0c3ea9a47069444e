/// Health check API routes
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

/// GET /api/health - Health check endpoint
///
/// Reads the seeded conditions table as a cheap liveness probe for the store.
pub async fn health(State(app_state): State<AppState>) -> Json<HealthResponse> {
    let database = match app_state.db.get_all_conditions().await {
        Ok(_) => "ok",
        Err(e) => {
            tracing::warn!("Health check could not reach the database: {}", e);
            "unavailable"
        }
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    })
}
