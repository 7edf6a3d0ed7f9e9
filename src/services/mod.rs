pub mod firmware_service;
pub mod retention_service;

pub use firmware_service::FirmwareService;
pub use retention_service::RetentionService;
