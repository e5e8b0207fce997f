use std::fs;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tempfile::TempDir;

use thermwatch_server::app::create_router;
use thermwatch_server::services::{
    Alert, AlertRegistry, ScanScheduler, ScanService, SensorRegistry, ThresholdAlert,
};

pub struct MockApp {
    pub router: Router,
    pub registry: Arc<SensorRegistry>,
    pub alerts: Arc<AlertRegistry>,
    pub scheduler: ScanScheduler,
    base_dir: TempDir,
}

impl MockApp {
    /// Fresh app over a temporary sensor tree, with a `freeze` and an
    /// `overheat` threshold alert registered.
    pub fn new() -> Self {
        let base_dir = TempDir::new().unwrap();
        let registry = Arc::new(SensorRegistry::new());
        let scan_service = Arc::new(ScanService::new(base_dir.path(), registry.clone()));
        let alerts = Arc::new(AlertRegistry::new(vec![
            Arc::new(ThresholdAlert::new("freeze".to_string(), Some(0.0), None)) as Arc<dyn Alert>,
            Arc::new(ThresholdAlert::new("overheat".to_string(), None, Some(35.0)))
                as Arc<dyn Alert>,
        ]));
        let scheduler = ScanScheduler::new(
            scan_service.clone(),
            alerts.clone(),
            Duration::from_secs(60),
        );
        let router = create_router(scan_service, registry.clone(), alerts.clone());

        Self {
            router,
            registry,
            alerts,
            scheduler,
            base_dir,
        }
    }

    pub fn write_sensor(&self, serial_id: &str, millidegrees: i32) {
        self.write_raw(
            serial_id,
            &format!(
                "3f 01 4b 46 7f ff 0c 10 aa : crc=aa YES\n3f 01 4b 46 7f ff 0c 10 aa t={millidegrees}"
            ),
        );
    }

    pub fn write_raw(&self, serial_id: &str, payload: &str) {
        let dir = self.base_dir.path().join(serial_id);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("w1_slave"), payload).unwrap();
    }

    pub fn alert(&self, name: &str) -> Arc<dyn Alert> {
        self.alerts
            .iter()
            .find(|alert| alert.name() == name)
            .unwrap()
            .clone()
    }
}
