use std::fmt::Write;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::services::AlertRegistry;

#[derive(Clone)]
pub struct AlertState {
    pub alerts: Arc<AlertRegistry>,
}

/// Plain-text listing, one line per alert with its current flag.
pub async fn list_alerts(State(state): State<AlertState>) -> String {
    let mut out = String::from("{");
    for alert in state.alerts.iter() {
        let _ = write!(out, "\n\tName={:<20} IsOn={:<5}", alert.name(), alert.is_on());
    }
    out.push_str("\n}");

    out
}

pub async fn set_alert_on(
    Path(name): Path<String>,
    State(state): State<AlertState>,
) -> StatusCode {
    state.alerts.set_on(&name, true);

    StatusCode::OK
}

pub async fn set_alert_off(
    Path(name): Path<String>,
    State(state): State<AlertState>,
) -> StatusCode {
    state.alerts.set_on(&name, false);

    StatusCode::OK
}

pub async fn update_alert(
    Path(name): Path<String>,
    State(state): State<AlertState>,
    message: String,
) -> StatusCode {
    state.alerts.update(&name, &message);

    StatusCode::OK
}
