//! Resolves which user owns a newly created batch or session.

use fincount_core::catalog::UserType;
use fincount_core::error::CoreError;
use fincount_core::ownership::{choose_default_owner, OwnerSource};
use fincount_db::models::user::User;
use fincount_db::repositories::UserRepo;
use fincount_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;

/// Resolve the owning user for a create request.
///
/// Precedence: an explicit `requested` user id, then the authenticated
/// caller, then (when `allow_default` is set) the oldest admin or else the
/// oldest user of any type. Users are never created here.
///
/// A supplied id is always looked up, so `""` yields 404 rather than
/// falling through to the caller or the default owner.
pub async fn resolve_owner(
    pool: &DbPool,
    requested: Option<&str>,
    authenticated: Option<&AuthUser>,
    allow_default: bool,
) -> AppResult<User> {
    let explicit = requested.or(authenticated.map(|user| user.user_id.as_str()));

    if let Some(user_id) = explicit {
        return UserRepo::find_by_id(pool, user_id)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::not_found("User", user_id)));
    }

    if !allow_default {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Authentication required to determine the record owner".into(),
        )));
    }

    let first_admin = UserRepo::find_first_by_type(pool, UserType::Admin).await?;
    let any_user = match first_admin {
        Some(_) => None,
        None => UserRepo::find_any(pool).await?,
    };

    let (owner, source) = choose_default_owner(first_admin, any_user)?;
    match source {
        OwnerSource::Admin => {
            tracing::warn!(user_id = %owner.id, "No caller identity; defaulting owner to admin user")
        }
        OwnerSource::AnyUser => tracing::warn!(
            user_id = %owner.id,
            "No caller identity and no admin user; defaulting owner to oldest user"
        ),
    }
    Ok(owner)
}
