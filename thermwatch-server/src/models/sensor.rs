use serde::{Deserialize, Serialize};

/// One sensor's state as of a single scan. Rebuilt from the filesystem on
/// every cycle, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    pub serial_id: String,
    pub name: String,
    pub temp_c: f64,
    pub temp_f: f64,
}
