use super::{FirmwareError, TelemetryError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("Firmware error: {0}")]
    Firmware(#[from] FirmwareError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
