mod firmware_handle;
mod telemetry_handle;

pub use firmware_handle::*;
pub use telemetry_handle::*;

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({"status": "error", "message": "Method not allowed"})),
    )
}
