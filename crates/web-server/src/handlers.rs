use crate::{error::AppError, AppState};
use analytics::{SensorReport, StatisticsView};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use core_types::{NewReading, SensorKind, SensorRecord};
use database::SensorStore;
use serde_json::{json, Value};
use std::sync::Arc;

fn sensor_kind(sensor: &str) -> Result<SensorKind, AppError> {
    Ok(sensor.parse::<SensorKind>()?)
}

/// # GET /api/health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// # POST /api/sensors/:sensor
/// Stores one reading. The body shape depends on the sensor category.
pub async fn create_reading<S: SensorStore>(
    Path(sensor): Path<String>,
    State(state): State<Arc<AppState<S>>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<SensorRecord>), AppError> {
    let kind = sensor_kind(&sensor)?;
    let reading = NewReading::from_json(kind, body)?;
    let record = state.store.insert(reading).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// # GET /api/sensors/:sensor/all
pub async fn list_readings<S: SensorStore>(
    Path(sensor): Path<String>,
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<SensorRecord>>, AppError> {
    let kind = sensor_kind(&sensor)?;
    let records = state.store.all_records(kind).await?;
    Ok(Json(records))
}

/// # GET /api/sensors/:sensor/statistics/:period
pub async fn get_statistics<S: SensorStore>(
    Path((sensor, period)): Path<(String, String)>,
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<StatisticsView>, AppError> {
    let kind = sensor_kind(&sensor)?;
    Ok(Json(state.statistics(kind, &period).await?))
}

/// # GET /api/sensors/:sensor/report/:period
pub async fn get_report<S: SensorStore>(
    Path((sensor, period)): Path<(String, String)>,
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<SensorReport>, AppError> {
    let kind = sensor_kind(&sensor)?;
    Ok(Json(state.report(kind, &period).await?))
}

/// # GET /api/sensors/:sensor/pdf/:period
/// Returns the chart report as a file download.
pub async fn get_pdf<S: SensorStore>(
    Path((sensor, period)): Path<(String, String)>,
    State(state): State<Arc<AppState<S>>>,
) -> Result<Response, AppError> {
    let kind = sensor_kind(&sensor)?;
    let document = state.document(kind, &period).await?;

    let disposition = format!("attachment; filename={}", document.filename);
    Ok((
        [
            (header::CONTENT_TYPE, document.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.bytes,
    )
        .into_response())
}

/// # GET /api/latest/:sensor
pub async fn get_latest<S: SensorStore>(
    Path(sensor): Path<String>,
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<SensorRecord>, AppError> {
    let kind = sensor_kind(&sensor)?;
    state
        .store
        .latest_record(kind)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No {kind} readings stored yet")))
}
