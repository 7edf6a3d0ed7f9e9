use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Table;

/// One stored telemetry sample. The timestamp is assigned by the store at
/// insertion time, never by the device.
#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reading {
    pub id: i32,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Relative humidity %
    pub humidity: f64,
    /// Air quality index, absent on devices without the extra sensor
    pub air_quality: Option<f64>,
    pub time: OffsetDateTime,
}

#[derive(Clone)]
pub struct ReadingTable;

impl Table for ReadingTable {
    fn name(&self) -> &'static str {
        "readings"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS readings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                temperature REAL NOT NULL,
                humidity REAL NOT NULL,
                air_quality REAL,
                time TIMESTAMP NOT NULL
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS readings;")
    }
}
