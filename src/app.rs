use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::configs::{SchemaManager, Settings, Storage};
use crate::handles::*;
use crate::services::{FirmwareService, RetentionService};

pub async fn create_app(settings: &Arc<Settings>) -> Router {
    let storage = Arc::new(
        Storage::new(settings.database.clone(), SchemaManager::default())
            .await
            .unwrap(),
    );

    let firmware_service = Arc::new(FirmwareService::new(settings.firmware.clone()));

    if let Some(policy) = settings.retention.clone() {
        let retention_service = RetentionService::new(storage.clone(), policy);
        tokio::spawn(async move {
            retention_service.run().await;
        });
    }

    let telemetry = Router::new()
        .route("/data/", post(ingest_reading).fallback(method_not_allowed))
        .route(
            "/get_all_data/",
            get(get_all_data).fallback(method_not_allowed),
        )
        .route("/latest/", get(latest_reading).fallback(method_not_allowed))
        .with_state(TelemetryState {
            storage: storage.clone(),
        });

    let firmware = Router::new()
        .route(
            "/upload-firmware/",
            post(upload_firmware).fallback(method_not_allowed),
        )
        .route("/firmware/", get(download_firmware))
        .route("/firmware/version/", get(firmware_version))
        // Firmware images are accepted as-is, no size cap.
        .layer(DefaultBodyLimit::disable())
        .with_state(FirmwareState { firmware_service });

    Router::new()
        .merge(telemetry)
        .merge(firmware)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
