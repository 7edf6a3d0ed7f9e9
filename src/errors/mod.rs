pub mod api;
pub mod firmware;
pub mod telemetry;

pub use api::ApiError;
pub use firmware::FirmwareError;
pub use telemetry::TelemetryError;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use uuid::Uuid;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Client faults carry their own message; storage faults get a
        // generic body while the detail is logged under an error id.
        let (status, message) = match self {
            ApiError::Telemetry(e) => (e.status_code(), e.to_string()),
            ApiError::Firmware(e) => {
                let status = e.status_code();

                if status.is_server_error() {
                    let error_id = Uuid::new_v4();
                    tracing::error!(error_id = ?error_id, "Firmware store error: {}", e);
                    (status, "Firmware store unavailable".to_string())
                } else {
                    (status, e.to_string())
                }
            }
            ApiError::Database(e) => {
                let error_id = Uuid::new_v4();
                tracing::error!(error_id = ?error_id, "Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "status": "error",
            "message": message
        }));

        (status, body).into_response()
    }
}
