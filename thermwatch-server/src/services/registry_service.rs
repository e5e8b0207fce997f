use std::collections::HashMap;

use tokio::sync::{Mutex, MutexGuard};

/// Shared serial-id to display-name mapping, rebuilt on every scan.
///
/// Two locks with different jobs: `rebuild_lock` serializes whole
/// clear-then-repopulate cycles, while `names` guards individual map
/// operations. Point renames only contend on `names`, so a rename can land
/// between a rebuild's clear and that id's re-registration — the rebuild
/// then replaces it with the empty-name default.
pub struct SensorRegistry {
    names: Mutex<HashMap<String, String>>,
    rebuild_lock: Mutex<()>,
}

impl SensorRegistry {
    pub fn new() -> Self {
        Self {
            names: Mutex::new(HashMap::new()),
            rebuild_lock: Mutex::new(()),
        }
    }

    /// Clears all entries and returns a guard that must be held until the
    /// enumeration repopulating the registry is complete.
    pub async fn begin_rebuild(&self) -> MutexGuard<'_, ()> {
        let guard = self.rebuild_lock.lock().await;
        self.names.lock().await.clear();
        guard
    }

    /// Registers a discovered serial id with the empty-name default.
    /// Unconditional write: a rename that raced the current rebuild is
    /// replaced.
    pub async fn register(&self, serial_id: &str) {
        self.names
            .lock()
            .await
            .insert(serial_id.to_string(), String::new());
    }

    /// Point update from a rename request. `None` stores the empty string.
    /// Allowed for ids the registry does not currently hold.
    pub async fn set_name(&self, serial_id: &str, name: Option<String>) {
        self.names
            .lock()
            .await
            .insert(serial_id.to_string(), name.unwrap_or_default());
    }

    /// Current name for a serial id, or the empty string if unknown.
    pub async fn get_name(&self, serial_id: &str) -> String {
        self.names
            .lock()
            .await
            .get(serial_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn serial_ids(&self) -> Vec<String> {
        self.names.lock().await.keys().cloned().collect()
    }
}

impl Default for SensorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
