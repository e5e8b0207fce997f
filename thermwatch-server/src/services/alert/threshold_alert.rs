use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use super::Alert;
use crate::models::SensorReading;

/// Turns on while any reading sits outside the configured Celsius bounds,
/// and back off once every reading is in range again.
pub struct ThresholdAlert {
    name: String,
    on: AtomicBool,
    message: Mutex<String>,
    min_c: Option<f64>,
    max_c: Option<f64>,
}

impl ThresholdAlert {
    pub fn new(name: String, min_c: Option<f64>, max_c: Option<f64>) -> Self {
        Self {
            name,
            on: AtomicBool::new(false),
            message: Mutex::new(String::new()),
            min_c,
            max_c,
        }
    }

    fn breached(&self, reading: &SensorReading) -> bool {
        self.min_c.is_some_and(|min| reading.temp_c < min)
            || self.max_c.is_some_and(|max| reading.temp_c > max)
    }
}

#[async_trait]
impl Alert for ThresholdAlert {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_on(&self) -> bool {
        self.on.load(Ordering::Relaxed)
    }

    fn set_on(&self, on: bool) {
        self.on.store(on, Ordering::Relaxed);
    }

    fn update(&self, message: String) {
        *self.message.lock().unwrap() = message;
    }

    fn message(&self) -> String {
        self.message.lock().unwrap().clone()
    }

    async fn evaluate(&self, readings: &[SensorReading]) {
        let breached: Vec<&SensorReading> =
            readings.iter().filter(|reading| self.breached(reading)).collect();

        if breached.is_empty() {
            if self.on.swap(false, Ordering::Relaxed) {
                tracing::info!(alert = %self.name, "all readings back in range");
            }
            return;
        }

        if !self.on.swap(true, Ordering::Relaxed) {
            for reading in &breached {
                tracing::warn!(
                    alert = %self.name,
                    serial_id = %reading.serial_id,
                    temp_c = reading.temp_c,
                    "temperature out of range"
                );
            }
        }
    }
}
