//! JWT access-token generation and validation.
//!
//! Tokens are HS256-signed JWTs containing a [`Claims`] payload. There is no
//! server-side session: logout is handled by the client discarding its token.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{env_or, required, ConfigError};

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's id.
    #[serde(default)]
    pub sub: String,
    /// The user's login name.
    #[serde(default)]
    pub username: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Why a presented token was rejected.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Bad signature, malformed token, or expired.
    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    /// Signature and expiry are fine but a required claim is absent or empty.
    #[error("token is missing the '{0}' claim")]
    MissingClaim(&'static str),
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in days (default: 30).
    pub expiry_days: i64,
}

/// Default token lifetime in days.
const DEFAULT_EXPIRY_DAYS: i64 = 30;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var           | Required | Default |
    /// |-------------------|----------|---------|
    /// | `JWT_SECRET`      | **yes**  | --      |
    /// | `JWT_EXPIRY_DAYS` | no       | `30`    |
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = required("JWT_SECRET")?;
        let expiry_days = env_or("JWT_EXPIRY_DAYS", DEFAULT_EXPIRY_DAYS)?;
        Self::new(secret, expiry_days)
    }

    /// Build a config, rejecting lifetimes that are not positive or whose
    /// length in seconds does not fit in an `i64`.
    pub fn new(secret: impl Into<String>, expiry_days: i64) -> Result<Self, ConfigError> {
        if expiry_days <= 0 {
            return Err(ConfigError::Invalid {
                var: "JWT_EXPIRY_DAYS",
                reason: "must be a positive number of days".into(),
            });
        }
        if expiry_days.checked_mul(SECONDS_PER_DAY).is_none() {
            return Err(ConfigError::Invalid {
                var: "JWT_EXPIRY_DAYS",
                reason: format!("{expiry_days} days is too long a token lifetime"),
            });
        }
        Ok(Self {
            secret: secret.into(),
            expiry_days,
        })
    }

    /// Token lifetime in seconds.
    pub fn expiry_secs(&self) -> i64 {
        self.expiry_days.saturating_mul(SECONDS_PER_DAY)
    }
}

/// Generate an HS256 token carrying the user's id and username.
pub fn generate_token(
    user_id: &str,
    username: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        exp: now.saturating_add(config.expiry_secs()),
        iat: now,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a token, returning the embedded [`Claims`].
///
/// Checks the signature and expiration, then requires non-empty `sub` and
/// `username` claims.
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Claims, TokenError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    let claims = token_data.claims;

    if claims.sub.is_empty() {
        return Err(TokenError::MissingClaim("sub"));
    }
    if claims.username.is_empty() {
        return Err(TokenError::MissingClaim("username"));
    }
    Ok(claims)
}
