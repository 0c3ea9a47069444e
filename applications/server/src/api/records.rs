/// Records API routes
///
/// Each endpoint reports failures with its own status code and body key,
/// which `RecordRejection` captures explicitly.
use crate::{middleware::AuthenticatedUser, shape::RecordResponse, state::AppState};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Deserializer};
use serde_json::json;
use stowaway_core::{
    types::{ConditionId, GenreId, NewRecord, RecordFields, RecordId, UserId},
    RecordStore, StowawayError,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRequest {
    pub artist: String,
    pub album: String,
    #[serde(default, deserialize_with = "deserialize_year")]
    pub year_released: Option<i64>,
    pub image_url: String,
    pub condition: ConditionId,
    pub genres: Vec<GenreId>,
}

/// Accepts `1980`, `"1980"`, `""` or `null`
fn deserialize_year<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Number(i64),
        Text(String),
    }

    match Option::<Year>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Year::Number(year)) => Ok(Some(year)),
        Some(Year::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Year::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid year: {:?}", text))),
    }
}

#[derive(Debug, Deserialize)]
pub struct RecordListQuery {
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: Option<String>,
}

/// Failure responses of the record endpoints
#[derive(Debug)]
pub enum RecordRejection {
    /// `400 {"reason": msg}`
    Reason(String),
    /// `404` with an empty body
    NotFound,
    /// `404 {"message": msg}`
    NotFoundMessage(String),
    /// `500 {"message": msg}`
    ServerMessage(String),
    /// `500` with the failure text as a plain-text body
    ServerText(String),
    /// `{"error": msg}` with the given status
    Error(StatusCode, String),
}

impl RecordRejection {
    fn reason(err: StowawayError) -> Self {
        Self::Reason(err.to_string())
    }

    fn server_text(err: StowawayError) -> Self {
        Self::ServerText(err.to_string())
    }

    fn for_update(err: StowawayError) -> Self {
        if err.is_not_found("Record") {
            Self::NotFound
        } else {
            Self::server_text(err)
        }
    }

    fn for_destroy(err: StowawayError) -> Self {
        if err.is_not_found("Record") {
            Self::NotFoundMessage(err.to_string())
        } else {
            Self::ServerMessage(err.to_string())
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Reason(_) => StatusCode::BAD_REQUEST,
            Self::NotFound | Self::NotFoundMessage(_) => StatusCode::NOT_FOUND,
            Self::ServerMessage(_) | Self::ServerText(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Error(status, _) => *status,
        }
    }
}

impl IntoResponse for RecordRejection {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "Record request failed: {:?}", self);
        } else {
            tracing::warn!(status = status.as_u16(), "Record request rejected: {:?}", self);
        }

        match self {
            Self::Reason(msg) => (status, Json(json!({ "reason": msg }))).into_response(),
            Self::NotFound => status.into_response(),
            Self::NotFoundMessage(msg) | Self::ServerMessage(msg) => {
                (status, Json(json!({ "message": msg }))).into_response()
            }
            Self::ServerText(msg) => (status, msg).into_response(),
            Self::Error(_, msg) => (status, Json(json!({ "error": msg }))).into_response(),
        }
    }
}

/// Resolve the condition and genre references of a payload and build the
/// record owned by `owner`
async fn resolve_record(
    store: &dyn RecordStore,
    req: RecordRequest,
    owner: UserId,
) -> stowaway_core::Result<NewRecord> {
    let condition = store
        .get_condition(req.condition)
        .await?
        .ok_or_else(|| StowawayError::not_found("Condition", req.condition))?;

    let mut genres = Vec::with_capacity(req.genres.len());
    for genre_id in req.genres {
        let genre = store
            .get_genre(genre_id)
            .await?
            .ok_or_else(|| StowawayError::not_found("Genre", genre_id))?;
        genres.push(genre);
    }

    let fields = RecordFields {
        artist: req.artist,
        album: req.album,
        year_released: req.year_released,
        image_url: req.image_url,
    };

    Ok(NewRecord::new(fields, &condition, &genres, owner))
}

/// POST /api/records
/// Create a record owned by the caller
pub async fn create_record(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    payload: Result<Json<RecordRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RecordResponse>), RecordRejection> {
    let Json(req) = payload.map_err(|e| RecordRejection::Reason(e.body_text()))?;

    let record = resolve_record(app_state.db.as_ref(), req, auth.user_id())
        .await
        .map_err(RecordRejection::reason)?;

    let created = app_state
        .db
        .create_record(record)
        .await
        .map_err(RecordRejection::reason)?;

    tracing::info!(record_id = created.id, user_id = auth.user_id(), "Record created");

    Ok((StatusCode::CREATED, Json(RecordResponse::from(&created))))
}

/// GET /api/records/:id
///
/// A missing record is reported as 400, like every other failure here.
pub async fn get_record(
    path: Result<Path<RecordId>, PathRejection>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<RecordResponse>, RecordRejection> {
    let Path(id) = path.map_err(|e| RecordRejection::Reason(e.body_text()))?;

    let record = app_state
        .db
        .get_record(id)
        .await
        .map_err(RecordRejection::reason)?
        .ok_or_else(|| RecordRejection::reason(StowawayError::not_found("Record", id)))?;

    Ok(Json(RecordResponse::from(&record)))
}

/// PUT /api/records/:id
/// Overwrite a record; ownership moves to the caller
pub async fn update_record(
    path: Result<Path<RecordId>, PathRejection>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    payload: Result<Json<RecordRequest>, JsonRejection>,
) -> Result<StatusCode, RecordRejection> {
    let Path(id) = path.map_err(|e| RecordRejection::ServerText(e.body_text()))?;

    // Existence is checked before the payload so a missing id is always 404
    app_state
        .db
        .get_record(id)
        .await
        .map_err(RecordRejection::for_update)?
        .ok_or(RecordRejection::NotFound)?;

    let Json(req) = payload.map_err(|e| RecordRejection::ServerText(e.body_text()))?;

    let record = resolve_record(app_state.db.as_ref(), req, auth.user_id())
        .await
        .map_err(RecordRejection::for_update)?;

    app_state
        .db
        .update_record(id, record)
        .await
        .map_err(RecordRejection::for_update)?;

    tracing::info!(record_id = id, user_id = auth.user_id(), "Record updated");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/records
/// All records, or only those owned by `user_id`
pub async fn list_records(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
    Query(query): Query<RecordListQuery>,
) -> Result<Json<Vec<RecordResponse>>, RecordRejection> {
    let records = match query.user_id.as_deref().filter(|raw| !raw.is_empty()) {
        Some(raw) => {
            let user_id: UserId = raw.parse().map_err(|_| {
                RecordRejection::ServerText(format!("Invalid user_id: {:?}", raw))
            })?;
            app_state.db.get_records_by_user(user_id).await
        }
        None => app_state.db.get_all_records().await,
    }
    .map_err(RecordRejection::server_text)?;

    Ok(Json(records.iter().map(RecordResponse::from).collect()))
}

/// GET /api/records/search?query=...
/// Relay a Discogs search
pub async fn search_records(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<serde_json::Value>, RecordRejection> {
    let Some(query) = query.query.filter(|q| !q.is_empty()) else {
        return Err(RecordRejection::Error(
            StatusCode::BAD_REQUEST,
            "A 'query' parameter is required.".to_string(),
        ));
    };

    let payload = app_state.catalog.search(&query).await.map_err(|e| {
        RecordRejection::Error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to fetch data from Discogs: {}", e),
        )
    })?;

    Ok(Json(payload))
}

/// DELETE /api/records/:id
pub async fn delete_record(
    path: Result<Path<RecordId>, PathRejection>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<StatusCode, RecordRejection> {
    let Path(id) = path.map_err(|e| RecordRejection::ServerMessage(e.body_text()))?;

    app_state
        .db
        .delete_record(id)
        .await
        .map_err(RecordRejection::for_destroy)?;

    tracing::info!(record_id = id, "Record deleted");

    Ok(StatusCode::NO_CONTENT)
}
