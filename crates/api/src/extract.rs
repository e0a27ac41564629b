//! Request body extractors.

use axum::extract::{FromRequest, Request};
use axum::Json;
use fincount_core::validation::from_validation_errors;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// `Json<T>` that reports malformed bodies through [`AppError`], so clients
/// always receive the `{"detail", "code"}` error shape.
///
/// The rejection status is preserved: 400 for syntax errors, 415 for a
/// missing `Content-Type`, 422 for a body of the wrong shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Run `validator` derive rules on a request DTO.
pub fn validate_body<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate()
        .map_err(|errors| AppError::Core(from_validation_errors(errors)))
}
