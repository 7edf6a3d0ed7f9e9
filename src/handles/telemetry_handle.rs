use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::configs::Storage;
use crate::errors::{ApiError, TelemetryError};
use crate::models::Reading;
use crate::repositories::ReadingRepository;

/// Window size for `/get_all_data/`, enough for the dashboard chart.
const HISTORY_WINDOW: i64 = 50;

const TIME_OF_DAY: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");

#[derive(Clone)]
pub struct TelemetryState {
    pub storage: Arc<Storage>,
}

/// Device submission. Fields are optional here so that presence can be
/// validated explicitly instead of failing deserialization wholesale.
#[derive(Clone, Serialize, Deserialize)]
pub struct ReadingBody {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    #[serde(rename = "airQuality")]
    pub air_quality: Option<f64>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ReadingPoint {
    pub timestamp: String,
    pub temperature: f64,
    pub humidity: f64,
    #[serde(rename = "airQuality")]
    pub air_quality: Option<f64>,
}

impl From<Reading> for ReadingPoint {
    fn from(reading: Reading) -> Self {
        Self {
            timestamp: reading.time.format(&TIME_OF_DAY).unwrap_or_default(),
            temperature: reading.temperature,
            humidity: reading.humidity,
            air_quality: reading.air_quality,
        }
    }
}

pub async fn ingest_reading(
    State(state): State<TelemetryState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if !content_type.starts_with("application/json") {
        return Err(TelemetryError::UnsupportedContentType.into());
    }

    let body: ReadingBody =
        serde_json::from_slice(&body).map_err(|_| TelemetryError::InvalidPayload)?;

    let (Some(temperature), Some(humidity)) = (body.temperature, body.humidity) else {
        return Err(TelemetryError::MissingField.into());
    };

    ReadingRepository::new(state.storage.clone())
        .create(temperature, humidity, body.air_quality)
        .await?;

    Ok(Json(json!({"status": "success"})))
}

pub async fn get_all_data(
    State(state): State<TelemetryState>,
) -> Result<impl IntoResponse, ApiError> {
    let readings = ReadingRepository::new(state.storage.clone())
        .find_latest(HISTORY_WINDOW)
        .await?;

    // Newest-first from the store, oldest-first on the wire.
    let points: Vec<ReadingPoint> = readings.into_iter().rev().map(ReadingPoint::from).collect();

    Ok(Json(points))
}

pub async fn latest_reading(
    State(state): State<TelemetryState>,
) -> Result<impl IntoResponse, ApiError> {
    let reading = ReadingRepository::new(state.storage.clone())
        .find_newest()
        .await?
        .ok_or(TelemetryError::NoData)?;

    Ok(Json(ReadingPoint::from(reading)))
}
