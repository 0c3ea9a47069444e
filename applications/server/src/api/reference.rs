/// Reference data API routes
use crate::{error::Result, middleware::AuthenticatedUser, state::AppState};
use axum::{extract::State, Json};
use stowaway_core::types::{Condition, Genre};

/// GET /api/genres
pub async fn list_genres(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<Genre>>> {
    let genres = app_state.db.get_all_genres().await?;
    Ok(Json(genres))
}

/// GET /api/conditions
pub async fn list_conditions(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<Condition>>> {
    let conditions = app_state.db.get_all_conditions().await?;
    Ok(Json(conditions))
}
