mod sensor;

pub use sensor::SensorReading;
