use axum::{
    Json,
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use scores::remote::RemoteError;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::warn;

pub const FALLBACK_MESSAGE: &str = "Server error";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No image provided")]
    MissingImage,

    #[error("ML service returned empty response")]
    EmptyUpstream,

    /// Upstream answered with a non-success status, `detail` is relayed as is.
    #[error("ML service answered {status}")]
    Upstream { status: StatusCode, detail: Value },

    /// Failing upstream answered with a bare JSON `null`.
    #[error("Cannot read properties of null (reading 'detail')")]
    NullUpstream,

    #[error("{0}")]
    Rejected(#[from] MultipartRejection),

    #[error("{0}")]
    Multipart(#[from] MultipartError),

    #[error("{0}")]
    Remote(#[from] RemoteError),

    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::MissingImage => (StatusCode::BAD_REQUEST, Value::from(self.to_string())),
            AppError::Multipart(ref error) if error.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                warn!("Upload over the body limit: {error}");
                (StatusCode::PAYLOAD_TOO_LARGE, Value::from(self.to_string()))
            }
            AppError::Upstream { status, detail } => {
                warn!("ML service answered {status}: {detail}");
                (status, detail)
            }
            _ => {
                let mut message = self.to_string();
                warn!("Analyze request failed: {message}");

                if message.is_empty() {
                    message = FALLBACK_MESSAGE.to_string();
                }
                (StatusCode::INTERNAL_SERVER_ERROR, Value::from(message))
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
