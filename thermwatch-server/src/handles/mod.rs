mod alert_handle;
mod sensor_handle;

pub use alert_handle::*;
pub use sensor_handle::*;
