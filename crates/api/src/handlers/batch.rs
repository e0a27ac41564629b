//! Handlers for the `/batches` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fincount_core::error::CoreError;
use fincount_core::types::DbId;
use fincount_core::validation::validate_required;
use fincount_db::models::batch::{Batch, CreateBatch, UpdateBatch};
use fincount_db::repositories::{BatchRepo, SessionRepo};
use serde::{Deserialize, Serialize};

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::extract::ValidJson;
use crate::identity::resolve_owner;
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Request body for `POST /batches`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBatchRequest {
    /// Client-generated id; the server generates one when absent.
    pub id: Option<DbId>,
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    /// Explicit owner. Falls back to the caller, then the default owner.
    pub user_id: Option<DbId>,
}

/// `data` payload of `GET /batches`.
#[derive(Debug, Serialize)]
pub struct BatchList {
    pub batches: Vec<Batch>,
}

/// GET /api/batches
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<BatchList>>> {
    let batches = BatchRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(BatchList { batches })))
}

/// POST /api/batches
pub async fn create(
    State(state): State<AppState>,
    OptionalAuthUser(caller): OptionalAuthUser,
    ValidJson(input): ValidJson<CreateBatchRequest>,
) -> AppResult<(StatusCode, Json<Batch>)> {
    validate_required("name", &input.name)?;
    if let Some(id) = &input.id {
        validate_required("id", id)?;
    }

    let owner = resolve_owner(
        &state.pool,
        input.user_id.as_deref(),
        caller.as_ref(),
        state.config.allow_default_owner,
    )
    .await?;

    let requested_id = input.id.clone();
    let batch = BatchRepo::create(
        &state.pool,
        &CreateBatch {
            id: input.id,
            name: input.name,
            description: input.description,
            user_id: owner.id,
            is_active: input.is_active,
        },
    )
    .await
    .map_err(|err| match requested_id {
        Some(id) if is_unique_violation(&err) => {
            AppError::Core(CoreError::Conflict(format!("Batch with id {id} already exists")))
        }
        _ => AppError::Database(err),
    })?;

    tracing::info!(batch_id = %batch.id, user_id = %batch.user_id, "Batch created");
    Ok((StatusCode::CREATED, Json(batch)))
}

/// GET /api/batches/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Batch>> {
    let batch = BatchRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Batch", id)))?;
    Ok(Json(batch))
}

/// PUT /api/batches/{id}
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<UpdateBatch>,
) -> AppResult<Json<Batch>> {
    if let Some(name) = &input.name {
        validate_required("name", name)?;
    }
    let batch = BatchRepo::update(&state.pool, &id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Batch", id)))?;
    Ok(Json(batch))
}

/// DELETE /api/batches/{id}
///
/// Refused with 409 while sessions still reference the batch.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !BatchRepo::exists(&state.pool, &id).await? {
        return Err(AppError::Core(CoreError::not_found("Batch", id)));
    }

    let sessions = SessionRepo::count_by_batch(&state.pool, &id).await?;
    if sessions > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Batch {id} still has {sessions} session(s); delete them first"
        ))));
    }

    if !BatchRepo::delete(&state.pool, &id).await? {
        return Err(AppError::Core(CoreError::not_found("Batch", id)));
    }

    tracing::info!(batch_id = %id, user_id = %auth.user_id, "Batch deleted");
    Ok(Json(MessageResponse::new("Batch deleted successfully")))
}
