use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::AppError;

pub const MAX_TEXT_LEN: usize = 255;

/// Turns a raw request payload into its checked domain form.
pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, String>;
}

/// JSON body that has been deserialized and validated.
pub struct ValidJson<T: Validate>(pub T::Output);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        payload.validate().map(ValidJson).map_err(AppError::Validation)
    }
}

/// Query string that has been deserialized and validated.
pub struct ValidQuery<T: Validate>(pub T::Output);

impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(payload) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        payload.validate().map(ValidQuery).map_err(AppError::Validation)
    }
}

/// The `{id}` path segment parsed as a UUID.
pub struct IdPath(pub Uuid);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<Uuid>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        Ok(IdPath(id))
    }
}

pub fn required_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} is required"));
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(format!("{field} must be at most {MAX_TEXT_LEN} characters"));
    }
    Ok(())
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, ' ' | ',' | '.' | '\'' | '-')
}

pub fn person_name(field: &str, value: &str) -> Result<(), String> {
    required_text(field, value)?;
    if !value.chars().all(is_name_char) {
        return Err(format!("{field} contains invalid characters"));
    }
    Ok(())
}
