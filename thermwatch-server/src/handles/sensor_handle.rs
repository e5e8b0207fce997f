use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::errors::ApiError;
use crate::models::SensorReading;
use crate::services::{ScanService, SensorRegistry};

#[derive(Clone)]
pub struct SensorState {
    pub scan_service: Arc<ScanService>,
    pub registry: Arc<SensorRegistry>,
}

/// Runs a full scan cycle and returns the fresh snapshot. The registry is
/// rebuilt as part of the scan, exactly like a scheduled tick.
pub async fn list_sensors(
    State(state): State<SensorState>,
) -> Result<Json<Vec<SensorReading>>, ApiError> {
    let readings = state.scan_service.scan().await?;

    Ok(Json(readings))
}

/// Assigns a display name to a serial id. An empty body clears the name.
/// Unknown serial ids are accepted; the next rebuild decides whether they
/// correspond to a live sensor.
pub async fn rename_sensor(
    Path(serial_id): Path<String>,
    State(state): State<SensorState>,
    body: String,
) -> StatusCode {
    let name = (!body.is_empty()).then_some(body);
    state.registry.set_name(&serial_id, name).await;

    StatusCode::OK
}
