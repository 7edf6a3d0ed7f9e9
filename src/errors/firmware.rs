use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum FirmwareError {
    #[error("A non-empty firmware_file field is required")]
    InvalidUpload,

    #[error("No firmware uploaded yet")]
    MissingImage,

    #[error("Invalid version marker: {0:?}")]
    InvalidMarker(String),

    #[error("Firmware write failed: {0}")]
    Io(#[from] std::io::Error),
}

impl FirmwareError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            FirmwareError::InvalidUpload => StatusCode::BAD_REQUEST,
            FirmwareError::MissingImage => StatusCode::NOT_FOUND,
            FirmwareError::InvalidMarker(_) => StatusCode::INTERNAL_SERVER_ERROR,
            FirmwareError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
