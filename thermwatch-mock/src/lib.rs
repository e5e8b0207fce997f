use std::error::Error;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::time;

use crate::settings::Settings;
use crate::simulate::simulated_temperature;

pub mod settings;
mod simulate;

/// Update ticks per simulated day, so a full day curve plays out in a
/// development session instead of 24 hours.
const DAY_TICKS: u32 = 360;

pub async fn run(settings: &Arc<Settings>) {
    let base_dir = Path::new(&settings.mock.base_dir);
    let serial_ids = generate_serial_ids(settings.mock.sensor_count);

    for serial_id in &serial_ids {
        fs::create_dir_all(base_dir.join(serial_id)).expect("Failed to create sensor directory.");
    }

    tracing::info!(
        "simulating {} sensors under {}",
        serial_ids.len(),
        base_dir.display()
    );

    let mut interval = time::interval(Duration::from_secs(settings.mock.update_interval_secs));
    let mut tick: u32 = 0;
    loop {
        interval.tick().await;

        let day_fraction = f64::from(tick % DAY_TICKS) / f64::from(DAY_TICKS);
        for serial_id in &serial_ids {
            if let Err(e) = write_reading(base_dir, serial_id, day_fraction) {
                tracing::error!("failed to write reading for {}: {}", serial_id, e);
            }
        }

        tick += 1;
    }
}

/// DS18B20-style serial ids: family code 28 plus a random 48-bit id.
fn generate_serial_ids(count: usize) -> Vec<String> {
    let mut rng = rand::rng();

    (0..count)
        .map(|_| format!("28-{:012x}", rng.random_range(0u64..1 << 48)))
        .collect()
}

fn write_reading(base_dir: &Path, serial_id: &str, day_fraction: f64) -> Result<(), Box<dyn Error>> {
    let mut rng = rand::rng();
    let temp_c = simulated_temperature(day_fraction) + rng.random_range(-0.25..0.25);
    let millidegrees = (temp_c * 1000.0).round() as i32;

    fs::write(
        base_dir.join(serial_id).join("w1_slave"),
        slave_payload(millidegrees),
    )?;

    tracing::debug!("{} -> t={}", serial_id, millidegrees);

    Ok(())
}

/// Two-line payload in the kernel's w1_slave shape. The scratchpad bytes are
/// cosmetic; consumers only read the trailing t= token.
fn slave_payload(millidegrees: i32) -> String {
    format!(
        "3f 01 4b 46 7f ff 0c 10 aa : crc=aa YES\n3f 01 4b 46 7f ff 0c 10 aa t={millidegrees}"
    )
}
