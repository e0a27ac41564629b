//! Handlers for the `/sessions` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use fincount_core::catalog::{parse_closed, Location, Species};
use fincount_core::error::CoreError;
use fincount_core::pagination::{
    clamp_limit, clamp_page, page_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
use fincount_core::types::DbId;
use fincount_core::validation::{validate_counts, validate_required, validate_timestamp};
use fincount_db::models::session::{Counts, CreateSession, Session, UpdateSession};
use fincount_db::repositories::SessionRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::identity::resolve_owner;
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::query::PaginationParams;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /sessions`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub batch_id: DbId,
    pub species: String,
    pub location: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub counts: Counts,
    /// Capture time chosen by the client, stored verbatim.
    pub timestamp: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub user_id: Option<DbId>,
}

/// Request body for `PUT /sessions/{id}`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSessionRequest {
    pub species: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub counts: Option<Counts>,
    pub timestamp: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// `data` payload of `GET /sessions`.
#[derive(Debug, Serialize)]
pub struct SessionPage {
    pub sessions: Vec<Session>,
    pub pagination: Pagination,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/sessions?page=&limit=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<SessionPage>>> {
    let page = clamp_page(params.page);
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);

    let sessions = SessionRepo::list_page(&state.pool, limit, page_offset(page, limit)).await?;
    let total = SessionRepo::count(&state.pool).await?;

    Ok(Json(DataResponse::new(SessionPage {
        sessions,
        pagination: Pagination { total, page, limit },
    })))
}

/// POST /api/sessions
///
/// Validates the payload, resolves the owner, then creates the session and
/// (when the batch id is new) its placeholder batch in one transaction.
pub async fn create(
    State(state): State<AppState>,
    OptionalAuthUser(caller): OptionalAuthUser,
    ValidJson(input): ValidJson<CreateSessionRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Session>>)> {
    validate_required("batchId", &input.batch_id)?;
    let species: Species = parse_closed(&input.species)?;
    let location: Location = parse_closed(&input.location)?;
    validate_counts(&input.counts)?;
    validate_timestamp(&input.timestamp)?;

    let owner = resolve_owner(
        &state.pool,
        input.user_id.as_deref(),
        caller.as_ref(),
        state.config.allow_default_owner,
    )
    .await?;

    let created = SessionRepo::create_with_batch(
        &state.pool,
        &CreateSession {
            batch_id: input.batch_id,
            user_id: owner.id,
            species,
            location,
            notes: input.notes,
            counts: input.counts,
            timestamp: input.timestamp,
            image_url: input.image_url,
        },
    )
    .await?;

    let session = created.session;
    if created.batch_created {
        tracing::info!(
            batch_id = %session.batch_id,
            user_id = %session.user_id,
            "Auto-created batch for new session"
        );
    }
    tracing::info!(session_id = %session.id, batch_id = %session.batch_id, "Session created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(
            session,
            "Session created successfully",
        )),
    ))
}

/// GET /api/sessions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Session>> {
    let session = SessionRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Session", id)))?;
    Ok(Json(session))
}

/// GET /api/sessions/batch/{batch_id}
///
/// An unknown batch yields an empty list.
pub async fn list_by_batch(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(batch_id): Path<DbId>,
) -> AppResult<Json<Vec<Session>>> {
    let sessions = SessionRepo::list_by_batch(&state.pool, &batch_id).await?;
    Ok(Json(sessions))
}

/// PUT /api/sessions/{id}
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<UpdateSessionRequest>,
) -> AppResult<Json<Session>> {
    let changes = UpdateSession {
        species: input.species.as_deref().map(parse_closed::<Species>).transpose()?,
        location: input.location.as_deref().map(parse_closed::<Location>).transpose()?,
        notes: input.notes,
        counts: input.counts,
        timestamp: input.timestamp,
        image_url: input.image_url,
    };
    if let Some(counts) = &changes.counts {
        validate_counts(counts)?;
    }
    if let Some(timestamp) = &changes.timestamp {
        validate_timestamp(timestamp)?;
    }

    let session = SessionRepo::update(&state.pool, &id, &changes)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Session", id)))?;
    Ok(Json(session))
}

/// DELETE /api/sessions/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !SessionRepo::delete(&state.pool, &id).await? {
        return Err(AppError::Core(CoreError::not_found("Session", id)));
    }
    tracing::info!(session_id = %id, user_id = %auth.user_id, "Session deleted");
    Ok(Json(MessageResponse::new("Session deleted successfully")))
}
