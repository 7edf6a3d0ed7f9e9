pub mod schema;
pub mod settings;
pub mod storage;

pub use schema::SchemaManager;
pub use settings::{Database, Firmware, Retention, Settings};
pub use storage::Storage;
