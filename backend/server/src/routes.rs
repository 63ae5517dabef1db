//! # Routes
//!
//! ## `POST /api/image-analyze`
//! Multipart form with an `image` file. The file is re-sent as `file` to the
//! inference endpoint and whatever JSON comes back is relayed.
//!
//! | case | status | body |
//! |---|---|---|
//! | no `image` field, or an empty text one | 400 | `{"error":"No image provided"}` |
//! | body over `MAX_UPLOAD_BYTES` | 413 | `{"error": message}` |
//! | upstream body empty | 500 | `{"error":"ML service returned empty response"}` |
//! | upstream not 2xx | upstream status | `{"error": detail or "ML service error"}` |
//! | upstream not 2xx, body `null` | 500 | `{"error": message}` |
//! | anything else failing | 500 | `{"error": message}` |
//! | success | 200 | upstream JSON |
//!
//! ## `GET /health`
//! Liveness only, never touches the inference endpoint.
use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, State as AxumState, multipart::MultipartRejection},
    response::IntoResponse,
};
use scores::remote::send_image;
use serde_json::{Value, json};
use tracing::info;

use crate::{
    error::AppError,
    state::State,
    utils::{UPSTREAM_FIELD, read_image, upstream_detail},
};

pub async fn analyze_handler(
    AxumState(state): AxumState<Arc<State>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, AppError> {
    let image = read_image(multipart?).await?.ok_or(AppError::MissingImage)?;

    info!(
        "Forwarding {} ({} bytes) to {}",
        image.file_name.as_deref().unwrap_or("unnamed image"),
        image.bytes.len(),
        state.config.ml_url
    );

    let reply = send_image(&state.client, &state.config.ml_url, UPSTREAM_FIELD, image).await?;

    if reply.body.is_empty() {
        return Err(AppError::EmptyUpstream);
    }

    let data: Value = serde_json::from_str(&reply.body)?;

    if !reply.status.is_success() {
        if data.is_null() {
            return Err(AppError::NullUpstream);
        }

        return Err(AppError::Upstream {
            status: reply.status,
            detail: upstream_detail(&data),
        });
    }

    Ok(Json(data))
}

pub async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "OK" }))
}
