use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Serialize, Serializer};
use shared::catalog::QueryError;
use shared::error::InitializationError;
use shared::export::ExportError;
use shared::worksheet::WorksheetError;
use thiserror::Error;
use tracing::warn;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    #[serde(serialize_with = "serialize_status")]
    pub status_code: StatusCode,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Worksheet(#[from] WorksheetError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Initialization(#[from] InitializationError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Query(e) => match e {
                QueryError::Sql(e) => {
                    warn!(error = ?e, "sql error");
                    ErrorMessage::from((StatusCode::INTERNAL_SERVER_ERROR, "")).into_response()
                }
                QueryError::IllegalArgs(e) => {
                    warn!(error = %e, "illegal arguments for Db query");
                    ErrorMessage::from((StatusCode::BAD_REQUEST, e)).into_response()
                }
                QueryError::NotFound(e) => {
                    ErrorMessage::from((StatusCode::NOT_FOUND, format!("{e} does not exist")))
                        .into_response()
                }
            },
            ApiError::Worksheet(e) => {
                warn!(error = %e, "rejected worksheet entry");
                ErrorMessage::from((StatusCode::BAD_REQUEST, e.to_string())).into_response()
            }
            ApiError::Export(e) => match e {
                ExportError::UnknownSheet(_) => {
                    ErrorMessage::from((StatusCode::NOT_FOUND, e.to_string())).into_response()
                }
                ExportError::EmptyWorksheet => {
                    ErrorMessage::from((StatusCode::BAD_REQUEST, e.to_string())).into_response()
                }
                ExportError::Csv(_) | ExportError::Io(_) => {
                    warn!(error = ?e, "failed to render csv export");
                    ErrorMessage::from((StatusCode::INTERNAL_SERVER_ERROR, "")).into_response()
                }
            },
            ApiError::Initialization(e) => {
                warn!(error = ?e, "failed to refresh catalog");
                ErrorMessage::from((StatusCode::INTERNAL_SERVER_ERROR, "catalog refresh failed"))
                    .into_response()
            }
        }
    }
}

fn serialize_status<S>(value: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(value.as_u16())
}

impl From<(StatusCode, String)> for ErrorMessage {
    fn from((status_code, message): (StatusCode, String)) -> Self {
        Self {
            status_code,
            message,
        }
    }
}

impl From<(StatusCode, &str)> for ErrorMessage {
    fn from((status_code, message): (StatusCode, &str)) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }
}

impl IntoResponse for ErrorMessage {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}
