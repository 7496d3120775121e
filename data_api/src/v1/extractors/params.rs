use crate::v1::error::ErrorMessage;
use axum::{
    extract::{FromRequestParts, Query},
    http::{StatusCode, request::Parts},
};
use serde::Deserialize;

// Raw query parameters before validation
#[derive(Debug, Deserialize)]
struct RawSearch {
    pub q: Option<String>,
}

/// Extractor for a catalog search that ensures the `q` parameter is present and not blank. The
/// term is trimmed.
#[derive(Debug, Clone)]
pub struct SearchTerm(pub String);

impl<S> FromRequestParts<S> for SearchTerm
where
    S: Send + Sync,
{
    type Rejection = ErrorMessage;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<RawSearch>::from_request_parts(parts, state)
            .await
            .map_err(|e| ErrorMessage::from((StatusCode::BAD_REQUEST, e.body_text())))?;

        let term = params.q.as_deref().map(str::trim).unwrap_or_default();
        if term.is_empty() {
            return Err(ErrorMessage::from((
                StatusCode::BAD_REQUEST,
                "query parameter q must not be blank",
            )));
        }

        Ok(Self(term.to_string()))
    }
}
