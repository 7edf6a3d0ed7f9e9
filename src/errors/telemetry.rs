use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Content-Type must be application/json")]
    UnsupportedContentType,

    #[error("Invalid JSON payload")]
    InvalidPayload,

    #[error("Missing temperature or humidity")]
    MissingField,

    #[error("No data yet")]
    NoData,
}

impl TelemetryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TelemetryError::UnsupportedContentType => StatusCode::BAD_REQUEST,
            TelemetryError::InvalidPayload => StatusCode::BAD_REQUEST,
            TelemetryError::MissingField => StatusCode::BAD_REQUEST,
            TelemetryError::NoData => StatusCode::NOT_FOUND,
        }
    }
}
