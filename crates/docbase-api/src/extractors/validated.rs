//! `ValidatedDocument` extractor: JSON body plus payload validation.

use axum::Json;
use axum::extract::{FromRequest, Request};
use validator::Validate;

use docbase_core::error::AppError;
use docbase_entity::{Document, DocumentPayload};

use crate::error::ApiError;

/// A document body whose payload passed its validation rules.
#[derive(Debug, Clone)]
pub struct ValidatedDocument<T>(pub Document<T>);

impl<S, T> FromRequest<S> for ValidatedDocument<T>
where
    S: Send + Sync,
    T: DocumentPayload + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(document) = Json::<Document<T>>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;
        document.payload.validate()?;
        Ok(Self(document))
    }
}
