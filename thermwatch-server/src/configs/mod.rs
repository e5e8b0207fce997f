mod settings;

pub use settings::{AlertSetting, Logger, Sensors, Server, Settings};
