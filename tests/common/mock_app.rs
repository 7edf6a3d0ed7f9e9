use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tempfile::TempDir;

use airmon_server::configs::schema::SchemaManager;
use airmon_server::configs::settings::{Database, Firmware};
use airmon_server::configs::storage::Storage;
use airmon_server::handles::*;
use airmon_server::models::Reading;
use airmon_server::repositories::ReadingRepository;
use airmon_server::services::FirmwareService;

pub struct MockApp {
    pub router: Router,
    pub storage: Arc<Storage>,
    pub firmware_service: Arc<FirmwareService>,
    _firmware_dir: TempDir,
}

impl MockApp {
    pub async fn new() -> Self {
        let storage = Arc::new(
            Storage::new(
                Database {
                    migration_path: None,
                    clean_start: true,
                    url: String::from("sqlite::memory:"),
                },
                SchemaManager::default(),
            )
            .await
            .unwrap(),
        );

        let firmware_dir = tempfile::tempdir().unwrap();
        let firmware_service = Arc::new(FirmwareService::new(Firmware {
            dir: firmware_dir.path().to_path_buf(),
        }));

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
            .layer(DefaultBodyLimit::disable())
            .with_state(FirmwareState {
                firmware_service: firmware_service.clone(),
            });

        Self {
            router: Router::new().merge(telemetry).merge(firmware),
            storage,
            firmware_service,
            _firmware_dir: firmware_dir,
        }
    }

    pub async fn insert_reading(
        &self,
        temperature: f64,
        humidity: f64,
        air_quality: Option<f64>,
    ) -> Reading {
        ReadingRepository::new(self.storage.clone())
            .create(temperature, humidity, air_quality)
            .await
            .unwrap()
    }

    pub async fn reading_count(&self) -> i64 {
        ReadingRepository::new(self.storage.clone())
            .count()
            .await
            .unwrap()
    }
}
