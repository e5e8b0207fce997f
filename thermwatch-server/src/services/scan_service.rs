use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::SensorError;
use crate::models::SensorReading;
use crate::services::SensorRegistry;

/// Bus-master entries that are never sensor devices.
const EXCLUDED_ENTRIES: [&str; 3] = ["subsystem", "driver", "power"];

/// Enumerates one-wire devices under the bus-master directory and parses
/// each device's `w1_slave` temperature file.
pub struct ScanService {
    base_dir: PathBuf,
    registry: Arc<SensorRegistry>,
}

impl ScanService {
    pub fn new(base_dir: impl Into<PathBuf>, registry: Arc<SensorRegistry>) -> Self {
        Self {
            base_dir: base_dir.into(),
            registry,
        }
    }

    /// One full scan cycle over the bus directory. Any single device
    /// failure aborts the whole cycle; no partial list is returned. The
    /// rebuild guard is held across the filesystem reads, so concurrent
    /// scans are serialized.
    pub async fn scan(&self) -> Result<Vec<SensorReading>, SensorError> {
        let _rebuild = self.registry.begin_rebuild().await;

        let entries = fs::read_dir(&self.base_dir).map_err(|source| SensorError::Unreadable {
            path: self.base_dir.clone(),
            source,
        })?;

        let mut readings = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| SensorError::Unreadable {
                path: self.base_dir.clone(),
                source,
            })?;

            if !entry.path().is_dir() {
                continue;
            }

            let serial_id = entry.file_name().to_string_lossy().into_owned();
            if EXCLUDED_ENTRIES.contains(&serial_id.as_str()) {
                continue;
            }

            self.registry.register(&serial_id).await;

            let temp_c = read_temp_c(&entry.path().join("w1_slave"))?;
            let temp_f = temp_c * 9.0 / 5.0 + 32.0;
            let name = self.registry.get_name(&serial_id).await;

            readings.push(SensorReading {
                serial_id,
                name,
                temp_c: round3(temp_c),
                temp_f: round3(temp_f),
            });
        }

        Ok(readings)
    }
}

/// Parses the Celsius reading out of a `w1_slave` file. The second line
/// carries a `t=<millidegrees>` token at index 9.
fn read_temp_c(path: &Path) -> Result<f64, SensorError> {
    let raw = fs::read_to_string(path).map_err(|source| SensorError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let line = raw.lines().nth(1).ok_or_else(|| SensorError::MissingDataLine {
        path: path.to_path_buf(),
    })?;

    let token = line
        .split_whitespace()
        .nth(9)
        .and_then(|token| token.strip_prefix("t="))
        .ok_or_else(|| SensorError::MissingTemperature {
            path: path.to_path_buf(),
        })?;

    let millidegrees = token
        .parse::<i32>()
        .map_err(|source| SensorError::InvalidTemperature {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(f64::from(millidegrees) / 1000.0)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn slave_payload(millidegrees: i32) -> String {
        format!(
            "3f 01 4b 46 7f ff 0c 10 aa : crc=aa YES\n3f 01 4b 46 7f ff 0c 10 aa t={millidegrees}"
        )
    }

    fn write_device(base: &TempDir, serial_id: &str, payload: &str) {
        let dir = base.path().join(serial_id);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("w1_slave"), payload).unwrap();
    }

    fn service(base: &TempDir) -> ScanService {
        ScanService::new(base.path(), Arc::new(SensorRegistry::new()))
    }

    #[test]
    fn test_read_temp_c_parses_millidegrees() {
        let base = TempDir::new().unwrap();
        write_device(&base, "28-0001", &slave_payload(23456));

        let temp_c = read_temp_c(&base.path().join("28-0001/w1_slave")).unwrap();

        assert_eq!(temp_c, 23.456);
    }

    #[test]
    fn test_read_temp_c_parses_negative_readings() {
        let base = TempDir::new().unwrap();
        write_device(&base, "28-0001", &slave_payload(-5000));

        let temp_c = read_temp_c(&base.path().join("28-0001/w1_slave")).unwrap();

        assert_eq!(temp_c, -5.0);
    }

    #[test]
    fn test_read_temp_c_missing_file() {
        let base = TempDir::new().unwrap();

        let result = read_temp_c(&base.path().join("28-0001/w1_slave"));

        assert!(matches!(result, Err(SensorError::Unreadable { .. })));
    }

    #[test]
    fn test_read_temp_c_single_line_file() {
        let base = TempDir::new().unwrap();
        write_device(&base, "28-0001", "3f 01 4b 46 7f ff 0c 10 aa : crc=aa YES");

        let result = read_temp_c(&base.path().join("28-0001/w1_slave"));

        assert!(matches!(result, Err(SensorError::MissingDataLine { .. })));
    }

    #[test]
    fn test_read_temp_c_short_data_line() {
        let base = TempDir::new().unwrap();
        write_device(&base, "28-0001", "first line\n3f 01 t=23456");

        let result = read_temp_c(&base.path().join("28-0001/w1_slave"));

        assert!(matches!(result, Err(SensorError::MissingTemperature { .. })));
    }

    #[test]
    fn test_read_temp_c_rejects_non_integer_suffix() {
        let base = TempDir::new().unwrap();
        write_device(
            &base,
            "28-0001",
            "first line\n3f 01 4b 46 7f ff 0c 10 aa t=warm",
        );

        let result = read_temp_c(&base.path().join("28-0001/w1_slave"));

        assert!(matches!(result, Err(SensorError::InvalidTemperature { .. })));
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(23.4567), 23.457);
        assert_eq!(round3(23.4567 * 9.0 / 5.0 + 32.0), 74.222);
        assert_eq!(round3(-5.0), -5.0);
    }

    #[tokio::test]
    async fn test_scan_converts_and_rounds() {
        let base = TempDir::new().unwrap();
        write_device(&base, "28-0001", &slave_payload(23456));
        let service = service(&base);

        let readings = service.scan().await.unwrap();

        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].serial_id, "28-0001");
        assert_eq!(readings[0].name, "");
        assert_eq!(readings[0].temp_c, 23.456);
        // Fahrenheit derives from the unrounded Celsius value.
        assert_eq!(readings[0].temp_f, 74.221);
    }

    #[tokio::test]
    async fn test_scan_excludes_pseudo_entries() {
        let base = TempDir::new().unwrap();
        write_device(&base, "28-0001", &slave_payload(21000));
        // Malformed on purpose: if the scan visited these, it would fail.
        for entry in ["subsystem", "driver", "power"] {
            write_device(&base, entry, "not a sensor");
        }
        fs::write(base.path().join("w1_master_pullup"), "0").unwrap();
        let service = service(&base);

        let readings = service.scan().await.unwrap();

        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].serial_id, "28-0001");
    }

    #[tokio::test]
    async fn test_scan_aborts_on_any_device_failure() {
        let base = TempDir::new().unwrap();
        write_device(&base, "28-0001", &slave_payload(21000));
        write_device(&base, "28-0002", "garbage");
        let service = service(&base);

        assert!(service.scan().await.is_err());
    }

    #[tokio::test]
    async fn test_scan_registers_every_serial_id() {
        let base = TempDir::new().unwrap();
        write_device(&base, "28-0001", &slave_payload(21000));
        write_device(&base, "28-0002", &slave_payload(22000));
        let registry = Arc::new(SensorRegistry::new());
        let service = ScanService::new(base.path(), registry.clone());

        let readings = service.scan().await.unwrap();

        let mut registered = registry.serial_ids().await;
        registered.sort();
        let mut scanned: Vec<_> = readings.iter().map(|r| r.serial_id.clone()).collect();
        scanned.sort();
        assert_eq!(registered, scanned);
    }

    #[tokio::test]
    async fn test_rescan_resets_names_to_default() {
        let base = TempDir::new().unwrap();
        write_device(&base, "28-0001", &slave_payload(21000));
        let registry = Arc::new(SensorRegistry::new());
        let service = ScanService::new(base.path(), registry.clone());

        service.scan().await.unwrap();
        registry.set_name("28-0001", Some("kitchen".to_string())).await;

        let readings = service.scan().await.unwrap();

        assert_eq!(readings[0].name, "");
        assert_eq!(registry.get_name("28-0001").await, "");
    }
}
