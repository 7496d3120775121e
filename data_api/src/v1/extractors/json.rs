use crate::v1::error::ErrorMessage;
use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

/// [`Json`] with rejections rendered as [`ErrorMessage`] like every other API error.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ErrorMessage;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ErrorMessage::from((e.status(), e.body_text())))?;
        Ok(Self(value))
    }
}
