//! Counting session model and DTOs.

use std::collections::BTreeMap;

use fincount_core::catalog::{Location, Species};
use fincount_core::types::{DbId, Timestamp};
use serde::{Serialize, Serializer};
use sqlx::types::Json;
use sqlx::FromRow;

/// Per-category fish counts, e.g. `{"Fish": 150}`.
pub type Counts = BTreeMap<String, i64>;

/// A session row from the `sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: DbId,
    pub batch_id: DbId,
    pub user_id: DbId,
    pub species: String,
    pub location: String,
    pub notes: Option<String>,
    pub counts: Json<Counts>,
    /// Capture time exactly as the client sent it.
    #[sqlx(rename = "session_timestamp")]
    pub timestamp: String,
    /// Serialized as `""` when no image was attached.
    #[serde(serialize_with = "empty_if_none")]
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

fn empty_if_none<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_deref().unwrap_or_default())
}

/// DTO for creating a new session. Enumerated fields are already validated.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub batch_id: DbId,
    pub user_id: DbId,
    pub species: Species,
    pub location: Location,
    pub notes: Option<String>,
    pub counts: Counts,
    pub timestamp: String,
    pub image_url: Option<String>,
}

/// DTO for updating an existing session. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateSession {
    pub species: Option<Species>,
    pub location: Option<Location>,
    pub notes: Option<String>,
    pub counts: Option<Counts>,
    pub timestamp: Option<String>,
    pub image_url: Option<String>,
}

/// Result of [`crate::repositories::SessionRepo::create_with_batch`].
#[derive(Debug, Clone)]
pub struct CreatedSession {
    pub session: Session,
    /// `true` when the referenced batch did not exist and was created
    /// in the same transaction.
    pub batch_created: bool,
}
