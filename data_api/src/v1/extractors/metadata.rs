use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{DateTime, Utc};
use std::convert::Infallible;

pub struct RequestMetadata {
    pub requested_at: DateTime<Utc>,
}

impl<S> FromRequestParts<S> for RequestMetadata
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self {
            requested_at: Utc::now(),
        })
    }
}
