use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, put};
use tokio::sync::oneshot;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::configs::Settings;
use crate::handles::*;
use crate::services::{AlertRegistry, ScanScheduler, ScanService, SensorRegistry};

/// Assembles the shared services and the control-surface routes. The
/// returned sender stops the scheduler spawned here.
pub async fn create_app(settings: &Arc<Settings>) -> (Router, oneshot::Sender<()>) {
    let registry = Arc::new(SensorRegistry::new());
    let scan_service = Arc::new(ScanService::new(
        settings.sensors.base_dir.clone(),
        registry.clone(),
    ));
    let alerts = Arc::new(AlertRegistry::from_settings(&settings.alerts));

    let scheduler = ScanScheduler::new(
        scan_service.clone(),
        alerts.clone(),
        Duration::from_secs(settings.sensors.scan_interval_secs),
    );
    let scheduler_stop = scheduler.start();

    (create_router(scan_service, registry, alerts), scheduler_stop)
}

pub fn create_router(
    scan_service: Arc<ScanService>,
    registry: Arc<SensorRegistry>,
    alerts: Arc<AlertRegistry>,
) -> Router {
    let sensors = Router::new()
        .route("/list", get(list_sensors))
        .route("/update/:serial_id", put(rename_sensor))
        .with_state(SensorState {
            scan_service,
            registry,
        });

    let alerts = Router::new()
        .route("/list", get(list_alerts))
        .route("/setOn/:name", put(set_alert_on))
        .route("/setOff/:name", put(set_alert_off))
        .route("/update/:name", put(update_alert))
        .with_state(AlertState { alerts });

    Router::new()
        .nest("/sensors", sensors)
        .nest("/alerts", alerts)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
