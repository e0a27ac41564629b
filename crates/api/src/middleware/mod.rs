//! Authentication extractors.
//!
//! - [`auth::AuthUser`] -- Requires a valid JWT Bearer token.
//! - [`auth::OptionalAuthUser`] -- Accepts requests without a token, but
//!   rejects a token that is present and invalid.

pub mod auth;
