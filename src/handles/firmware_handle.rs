use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::IntoResponse;
use serde_json::json;

use crate::errors::{ApiError, FirmwareError};
use crate::services::FirmwareService;

const UPLOAD_FIELD: &str = "firmware_file";

#[derive(Clone)]
pub struct FirmwareState {
    pub firmware_service: Arc<FirmwareService>,
}

pub async fn upload_firmware(
    State(state): State<FirmwareState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut image: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| FirmwareError::InvalidUpload)?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            image = Some(
                field
                    .bytes()
                    .await
                    .map_err(|_| FirmwareError::InvalidUpload)?,
            );
        }
    }

    let image = image
        .filter(|bytes| !bytes.is_empty())
        .ok_or(FirmwareError::InvalidUpload)?;

    let version = state.firmware_service.store(&image).await?;

    Ok(Json(json!({"status": "success", "version": version.to_string()})))
}

pub async fn download_firmware(
    State(state): State<FirmwareState>,
) -> Result<impl IntoResponse, ApiError> {
    let image = state
        .firmware_service
        .current_image()
        .await?
        .ok_or(FirmwareError::MissingImage)?;

    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        image,
    ))
}

pub async fn firmware_version(
    State(state): State<FirmwareState>,
) -> Result<impl IntoResponse, ApiError> {
    let version = state
        .firmware_service
        .current_version()
        .await?
        .ok_or(FirmwareError::MissingImage)?;

    Ok(Json(json!({"version": version.to_string()})))
}
