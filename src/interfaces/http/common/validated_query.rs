//! Validated query-string extractor
//!
//! Same contract as [`ValidatedJson`](super::ValidatedJson): a query string
//! that does not deserialize into `T` is a 400, a rule violation is a 422,
//! and both come back in the standard envelope.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::validated_json::describe;
use super::ApiError;

pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                ApiError::new(
                    StatusCode::BAD_REQUEST,
                    format!("invalid query: {}", rejection.body_text()),
                )
            })?;

        value
            .validate()
            .map_err(|errors| ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, describe(&errors)))?;

        Ok(ValidatedQuery(value))
    }
}
