//! Validated JSON extractor for Axum
//!
//! `ValidatedJson<T>` deserializes like `axum::Json<T>` and then runs
//! `validator::Validate::validate()`. A body that is not valid JSON for `T`
//! is a 400; a body that parses but breaks a field rule is a 422 listing
//! every failing field.

use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::ApiError;

pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ApiError::new(StatusCode::BAD_REQUEST, format!("invalid JSON: {}", rejection.body_text()))
            })?;

        value
            .validate()
            .map_err(|errors| ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, describe(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

/// `field: message` pairs joined with `; `, sorted by field name.
pub(super) fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let parts: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{field}: {msg}")
            })
        })
        .collect();

    if parts.is_empty() {
        "validation failed".to_string()
    } else {
        parts.join("; ")
    }
}

// ── Tests ──────────────────────────────────────────────────────
