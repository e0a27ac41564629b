//! Repository for the `batches` table.

use fincount_core::types::new_id;
use sqlx::PgPool;

use crate::models::batch::{Batch, CreateBatch, UpdateBatch};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, description, user_id, total_count, is_active, created_at, updated_at";

/// Provides CRUD operations for batches.
pub struct BatchRepo;

impl BatchRepo {
    /// Insert a new batch, returning the created row.
    ///
    /// Uses the caller-supplied id when present, otherwise generates one.
    /// `is_active` defaults to `true`.
    pub async fn create(pool: &PgPool, input: &CreateBatch) -> Result<Batch, sqlx::Error> {
        let id = input.id.clone().unwrap_or_else(new_id);
        let query = format!(
            "INSERT INTO batches (id, name, description, user_id, is_active)
             VALUES ($1, $2, $3, $4, COALESCE($5, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Batch>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.user_id)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a batch by id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Batch>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM batches WHERE id = $1");
        sqlx::query_as::<_, Batch>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a batch with the given id exists.
    pub async fn exists(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM batches WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// List all batches ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Batch>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM batches ORDER BY created_at DESC, id");
        sqlx::query_as::<_, Batch>(&query).fetch_all(pool).await
    }

    /// Update a batch. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        input: &UpdateBatch,
    ) -> Result<Option<Batch>, sqlx::Error> {
        let query = format!(
            "UPDATE batches SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                is_active = COALESCE($4, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Batch>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a batch. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign-key violation while sessions still reference it.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM batches WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
