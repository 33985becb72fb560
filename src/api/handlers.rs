use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::alerts::{Alert, AlertError};
use crate::query::{run_query, QueryParams, QueryResult};
use crate::storage::AlertStore;

/// Application state shared across handlers
#[derive(Debug, Default)]
pub struct AppState {
    pub store: AlertStore,
}

impl AppState {
    pub fn new(store: AlertStore) -> Self {
        Self { store }
    }
}

// ============================================================================
// Create
// ============================================================================

#[derive(Serialize)]
pub struct CreateAlertResponse {
    pub alert_id: String,
    pub error: String,
}

/// POST /alerts
///
/// The body is decoded as JSON whatever its declared content type.
pub async fn create_alert(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreateAlertResponse>), ApiError> {
    let alert = Alert::decode_for_create(&body)?;
    let alert_id = alert.id.clone();

    state.store.append(alert);
    tracing::debug!(
        alert_id = %alert_id,
        stored = state.store.len(),
        "alert created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateAlertResponse {
            alert_id,
            error: String::new(),
        }),
    ))
}

// ============================================================================
// Read
// ============================================================================

/// GET /alerts?service_id=..&start_ts=..&end_ts=..
pub async fn read_alerts(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<QueryResult>, ApiError> {
    let Query(pairs) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let params = QueryParams::from_pairs(pairs);
    let result = run_query(&state.store, &params)?;

    tracing::debug!(
        service_id = %result.service_id,
        matched = result.alerts.len(),
        "alerts queried"
    );

    Ok(Json(result))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum ApiError {
    Alert(AlertError),
    BadRequest(String),
}

impl From<AlertError> for ApiError {
    fn from(err: AlertError) -> Self {
        ApiError::Alert(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = match self {
            ApiError::Alert(err) => {
                tracing::debug!(error = %err, "request rejected");
                match err.alert_id() {
                    Some(alert_id) => serde_json::json!({
                        "alert_id": alert_id,
                        "error": err.to_string(),
                    }),
                    None => serde_json::json!({
                        "error": err.to_string()
                    }),
                }
            }
            ApiError::BadRequest(message) => {
                tracing::debug!(error = %message, "request rejected");
                serde_json::json!({
                    "error": message
                })
            }
        };

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
