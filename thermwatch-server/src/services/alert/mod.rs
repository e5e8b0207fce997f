mod threshold_alert;

pub use threshold_alert::ThresholdAlert;

use std::sync::Arc;

use async_trait::async_trait;

use crate::configs::AlertSetting;
use crate::models::SensorReading;

/// Stateful alert evaluated against every scan's snapshot. Variants decide
/// their own transitions; the dispatcher never interprets the outcome.
#[async_trait]
pub trait Alert: Send + Sync {
    fn name(&self) -> &str;

    fn is_on(&self) -> bool;

    fn set_on(&self, on: bool);

    /// Replaces the stored message without touching the on/off flag.
    fn update(&self, message: String);

    fn message(&self) -> String;

    async fn evaluate(&self, readings: &[SensorReading]);
}

/// Registration-ordered list of alerts. Lookups by name are linear scans;
/// a miss is a no-op, matching the permissive control contract.
pub struct AlertRegistry {
    alerts: Vec<Arc<dyn Alert>>,
}

impl AlertRegistry {
    pub fn new(alerts: Vec<Arc<dyn Alert>>) -> Self {
        Self { alerts }
    }

    pub fn from_settings(settings: &[AlertSetting]) -> Self {
        let alerts = settings
            .iter()
            .map(|setting| match setting {
                AlertSetting::Threshold { name, min_c, max_c } => {
                    Arc::new(ThresholdAlert::new(name.clone(), *min_c, *max_c)) as Arc<dyn Alert>
                }
            })
            .collect();

        Self { alerts }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Alert>> {
        self.alerts.iter()
    }

    pub fn set_on(&self, name: &str, on: bool) {
        for alert in self.alerts.iter().filter(|alert| alert.name() == name) {
            alert.set_on(on);
        }
    }

    pub fn update(&self, name: &str, message: &str) {
        for alert in self.alerts.iter().filter(|alert| alert.name() == name) {
            alert.update(message.to_string());
        }
    }

    /// Feeds the snapshot to every alert, sequentially, in registration
    /// order.
    pub async fn evaluate_all(&self, readings: &[SensorReading]) {
        for alert in &self.alerts {
            alert.evaluate(readings).await;
        }
    }
}
