//! Initial account provisioning for a fresh database.

use fincount_core::catalog::UserType;
use fincount_db::models::user::CreateUser;
use fincount_db::repositories::UserRepo;
use fincount_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::{env_or, required, ConfigError};

/// One account to create when the `users` table is empty.
#[derive(Debug, Clone)]
pub struct SeedAccount {
    pub username: String,
    pub full_name: String,
    pub user_type: UserType,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub admin: SeedAccount,
    pub staff: SeedAccount,
}

impl SeedConfig {
    /// | Env Var               | Default  |
    /// |-----------------------|----------|
    /// | `SEED_ADMIN_USERNAME` | `admin`  |
    /// | `SEED_ADMIN_PASSWORD` | required |
    /// | `SEED_STAFF_USERNAME` | `staff`  |
    /// | `SEED_STAFF_PASSWORD` | required |
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            admin: SeedAccount {
                username: env_or("SEED_ADMIN_USERNAME", "admin".to_string())?,
                full_name: "Admin User".into(),
                user_type: UserType::Admin,
                password: required("SEED_ADMIN_PASSWORD")?,
            },
            staff: SeedAccount {
                username: env_or("SEED_STAFF_USERNAME", "staff".to_string())?,
                full_name: "Staff User".into(),
                user_type: UserType::Staff,
                password: required("SEED_STAFF_PASSWORD")?,
            },
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("password hashing failed: {0}")]
    Hash(argon2::password_hash::Error),
}

/// What [`seed_default_users`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Users already existed; nothing was written.
    Skipped { existing: i64 },
    /// The listed usernames were created.
    Created(Vec<String>),
}

/// Create the default admin and staff accounts if no users exist yet.
pub async fn seed_default_users(
    pool: &DbPool,
    config: &SeedConfig,
) -> Result<SeedOutcome, SeedError> {
    let existing = UserRepo::count(pool).await?;
    if existing > 0 {
        return Ok(SeedOutcome::Skipped { existing });
    }

    let mut created = Vec::with_capacity(2);
    for account in [&config.admin, &config.staff] {
        let password_hash = hash_password(&account.password).map_err(SeedError::Hash)?;
        let user = UserRepo::create(
            pool,
            &CreateUser {
                username: account.username.clone(),
                full_name: account.full_name.clone(),
                user_type: account.user_type,
                password_hash,
            },
        )
        .await?;
        tracing::info!(user_id = %user.id, username = %user.username, user_type = %user.user_type, "Seeded user");
        created.push(user.username);
    }
    Ok(SeedOutcome::Created(created))
}
