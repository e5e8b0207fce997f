use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    #[error("failed to read sensor file {}: {source}", .path.display())]
    Unreadable { path: PathBuf, source: io::Error },

    #[error("sensor file {} is missing its data line", .path.display())]
    MissingDataLine { path: PathBuf },

    #[error("sensor file {} has no temperature token", .path.display())]
    MissingTemperature { path: PathBuf },

    #[error("invalid millidegree value in {}: {source}", .path.display())]
    InvalidTemperature {
        path: PathBuf,
        source: ParseIntError,
    },
}

impl SensorError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
