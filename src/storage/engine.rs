use parking_lot::RwLock;

use crate::alerts::Alert;

/// Append-only, in-memory alert store.
///
/// Alerts are kept in insertion order for the lifetime of the store. There
/// is no capacity bound, eviction, update or delete. Appends are serialized
/// behind a `RwLock`, so a scan always sees a consistent prefix of the
/// insertion history.
#[derive(Debug, Default)]
pub struct AlertStore {
    alerts: RwLock<Vec<Alert>>,
}

impl AlertStore {
    pub fn new() -> Self {
        Self {
            alerts: RwLock::new(Vec::new()),
        }
    }

    /// Add an alert to the end of the sequence
    pub fn append(&self, alert: Alert) {
        self.alerts.write().push(alert);
    }

    /// Collect every alert satisfying `predicate`, in insertion order
    pub fn scan<F>(&self, predicate: F) -> Vec<Alert>
    where
        F: Fn(&Alert) -> bool,
    {
        self.alerts
            .read()
            .iter()
            .filter(|alert| predicate(alert))
            .cloned()
            .collect()
    }

    /// Number of stored alerts
    pub fn len(&self) -> usize {
        self.alerts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.read().is_empty()
    }
}

impl FromIterator<Alert> for AlertStore {
    fn from_iter<I: IntoIterator<Item = Alert>>(iter: I) -> Self {
        Self {
            alerts: RwLock::new(iter.into_iter().collect()),
        }
    }
}
