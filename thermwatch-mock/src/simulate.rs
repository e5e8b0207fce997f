/// Daily outdoor-ish temperature curve in Celsius for a fraction of the day
/// [0, 1). Coldest shortly before dawn, warmest mid-afternoon.
pub fn simulated_temperature(day_fraction: f64) -> f64 {
    const MEAN_TEMP_C: f64 = 12.0;
    const DAILY_SWING_C: f64 = 9.0;
    // Peak offset pushes the maximum to ~15:00.
    const PEAK_FRACTION: f64 = 0.625;

    let radians = (day_fraction - PEAK_FRACTION) * 2.0 * std::f64::consts::PI;

    MEAN_TEMP_C + DAILY_SWING_C * radians.cos()
}
