//! Batch entity model and DTOs.

use fincount_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A batch row from the `batches` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub user_id: DbId,
    pub total_count: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new batch.
#[derive(Debug, Clone)]
pub struct CreateBatch {
    /// Caller-chosen id; a UUID is generated when `None`.
    pub id: Option<DbId>,
    pub name: String,
    pub description: Option<String>,
    /// Owning user. Must reference an existing row.
    pub user_id: DbId,
    /// Defaults to `true` if omitted.
    pub is_active: Option<bool>,
}

/// DTO for updating an existing batch. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}
