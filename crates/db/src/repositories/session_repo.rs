//! Repository for the `sessions` table.

use fincount_core::batch::{auto_batch_name, AUTO_BATCH_DESCRIPTION};
use fincount_core::catalog::{ClosedSet, Location, Species};
use fincount_core::types::new_id;
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};

use crate::models::session::{CreateSession, CreatedSession, Session, UpdateSession};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, batch_id, user_id, species, location, notes, counts, \
                       session_timestamp, image_url, created_at, updated_at";

/// Provides CRUD operations for counting sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session into an existing batch, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<Session, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::insert(&mut conn, input).await
    }

    /// Insert a session, first creating its batch if the id is unknown.
    ///
    /// Both inserts run in one transaction: either the session (and, when
    /// needed, its placeholder batch owned by `input.user_id`) is committed,
    /// or nothing is. Concurrent uploads for the same new batch id are safe
    /// because the batch insert is `ON CONFLICT DO NOTHING`.
    pub async fn create_with_batch(
        pool: &PgPool,
        input: &CreateSession,
    ) -> Result<CreatedSession, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let batch_created = sqlx::query(
            "INSERT INTO batches (id, name, description, user_id, is_active)
             VALUES ($1, $2, $3, $4, true)
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(&input.batch_id)
        .bind(auto_batch_name(&input.batch_id))
        .bind(AUTO_BATCH_DESCRIPTION)
        .bind(&input.user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            > 0;

        let session = Self::insert(&mut tx, input).await?;

        tx.commit().await?;
        Ok(CreatedSession {
            session,
            batch_created,
        })
    }

    async fn insert(conn: &mut PgConnection, input: &CreateSession) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions
                (id, batch_id, user_id, species, location, notes, counts,
                 session_timestamp, image_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(new_id())
            .bind(&input.batch_id)
            .bind(&input.user_id)
            .bind(input.species.label())
            .bind(input.location.label())
            .bind(&input.notes)
            .bind(Json(&input.counts))
            .bind(&input.timestamp)
            .bind(&input.image_url)
            .fetch_one(conn)
            .await
    }

    /// Find a session by id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Session>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE id = $1");
        sqlx::query_as::<_, Session>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all sessions, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Session>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sessions ORDER BY created_at DESC, id");
        sqlx::query_as::<_, Session>(&query).fetch_all(pool).await
    }

    /// One page of sessions, most recently created first.
    pub async fn list_page(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Session>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions ORDER BY created_at DESC, id LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of sessions.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
            .fetch_one(pool)
            .await
    }

    /// All sessions in a batch, oldest first.
    pub async fn list_by_batch(pool: &PgPool, batch_id: &str) -> Result<Vec<Session>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions WHERE batch_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(batch_id)
            .fetch_all(pool)
            .await
    }

    /// Number of sessions referencing a batch.
    pub async fn count_by_batch(pool: &PgPool, batch_id: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE batch_id = $1")
            .bind(batch_id)
            .fetch_one(pool)
            .await
    }

    /// Update a session. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        input: &UpdateSession,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!(
            "UPDATE sessions SET
                species = COALESCE($2, species),
                location = COALESCE($3, location),
                notes = COALESCE($4, notes),
                counts = COALESCE($5, counts),
                session_timestamp = COALESCE($6, session_timestamp),
                image_url = COALESCE($7, image_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(id)
            .bind(input.species.map(Species::label))
            .bind(input.location.map(Location::label))
            .bind(&input.notes)
            .bind(input.counts.as_ref().map(Json))
            .bind(&input.timestamp)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a session. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
