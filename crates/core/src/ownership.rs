//! Default-owner policy for records created without a caller identity.
//!
//! The database lookups live in the API crate; this module only decides
//! between the candidates it is handed, so the fallback order is testable
//! without a database.

use crate::error::CoreError;

/// Message returned when no account exists to own a new record.
pub const NO_USERS_MESSAGE: &str = "No users found in database. Please create a user first.";

/// How the default owner was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerSource {
    /// The first account with user type `Admin`.
    Admin,
    /// No admin exists; an arbitrary existing account was used.
    AnyUser,
}

/// Pick the default owner: an admin if one exists, otherwise any user.
///
/// Never invents an account. With no candidates at all this fails with
/// [`CoreError::Configuration`].
pub fn choose_default_owner<T>(
    first_admin: Option<T>,
    any_user: Option<T>,
) -> Result<(T, OwnerSource), CoreError> {
    match (first_admin, any_user) {
        (Some(admin), _) => Ok((admin, OwnerSource::Admin)),
        (None, Some(user)) => Ok((user, OwnerSource::AnyUser)),
        (None, None) => Err(CoreError::Configuration(NO_USERS_MESSAGE.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn admin_wins_over_other_users() {
        let (owner, source) = choose_default_owner(Some("admin-1"), Some("staff-1")).unwrap();
        assert_eq!(owner, "admin-1");
        assert_eq!(source, OwnerSource::Admin);
    }

    #[test]
    fn falls_back_to_any_user_without_admin() {
        let (owner, source) = choose_default_owner(None, Some("staff-1")).unwrap();
        assert_eq!(owner, "staff-1");
        assert_eq!(source, OwnerSource::AnyUser);
    }

    #[test]
    fn empty_user_set_is_a_configuration_error() {
        let err = choose_default_owner::<&str>(None, None).unwrap_err();
        assert_matches!(err, CoreError::Configuration(ref msg) if msg == NO_USERS_MESSAGE);
    }
}
