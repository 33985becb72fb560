use serde::Serialize;

use super::parser::AlertQuery;
use crate::alerts::Alert;
use crate::storage::AlertStore;

/// Result of a read query
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub service_id: String,
    /// Name of the first matching alert, empty when nothing matched
    pub service_name: String,
    pub alerts: Vec<Alert>,
}

/// Whether `alert` belongs to the queried service and falls inside the
/// inclusive time window
pub fn matches(query: &AlertQuery, alert: &Alert) -> bool {
    alert.service_id == query.service_id
        && alert.alert_ts >= query.start_epoch()
        && alert.alert_ts <= query.end_epoch()
}

/// Linear scan of the store in insertion order
pub fn execute_query(store: &AlertStore, query: &AlertQuery) -> QueryResult {
    let alerts = store.scan(|alert| matches(query, alert));

    // Differing names across matches are not reconciled; the first wins.
    let service_name = alerts
        .first()
        .map(|alert| alert.service_name.clone())
        .unwrap_or_default();

    QueryResult {
        service_id: query.service_id.clone(),
        service_name,
        alerts,
    }
}
