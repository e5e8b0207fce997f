use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time;

use crate::services::{AlertRegistry, ScanService};

/// Drives the scan-and-dispatch cycle on a fixed interval from a dedicated
/// task. A failed scan skips alert evaluation for that tick only.
pub struct ScanScheduler {
    scan_service: Arc<ScanService>,
    alerts: Arc<AlertRegistry>,
    interval: Duration,
}

impl ScanScheduler {
    pub fn new(
        scan_service: Arc<ScanService>,
        alerts: Arc<AlertRegistry>,
        interval: Duration,
    ) -> Self {
        Self {
            scan_service,
            alerts,
            interval,
        }
    }

    /// Spawns the scan loop. Signalling (or dropping) the returned sender
    /// stops it.
    pub fn start(self) -> oneshot::Sender<()> {
        let (stop_tx, mut stop_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut interval = time::interval(self.interval);
            loop {
                tokio::select! {
                    _ = &mut stop_rx => {
                        tracing::info!("scan scheduler shutting down");
                        break;
                    },
                    _ = interval.tick() => {
                        self.run_cycle().await;
                    }
                }
            }
        });

        stop_tx
    }

    /// One tick: scan, then feed the snapshot to every alert in
    /// registration order. Scan failures are logged and isolated to the
    /// current cycle.
    pub async fn run_cycle(&self) {
        match self.scan_service.scan().await {
            Ok(readings) => self.alerts.evaluate_all(&readings).await,
            Err(e) => tracing::error!("sensor scan failed: {}", e),
        }
    }
}
