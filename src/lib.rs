//! alertlog: in-memory alert event log
//!
//! A small HTTP service that records service-monitoring alerts in process
//! memory and answers per-service time-range queries over them.
//!
//! # Endpoints
//!
//! - `POST /alerts`: append an alert; `alert_id` must be non-empty
//! - `GET /alerts?service_id=..&start_ts=..&end_ts=..`: alerts of one service
//!   whose `alert_ts` lies in the inclusive RFC 3339 window, in insertion order
//!
//! Nothing is persisted; the store lives as long as the process.
//!
//! # Example
//!
//! ```
//! use alertlog::storage::AlertStore;
//! use alertlog::query::{run_query, QueryParams};
//! use alertlog::Alert;
//!
//! let store = AlertStore::new();
//! store.append(Alert::new("a-1", "checkout", 1_695_734_400).with_service_name("Checkout"));
//!
//! let params = QueryParams {
//!     service_id: Some("checkout".to_string()),
//!     start_ts: Some("2023-09-26T00:00:00Z".to_string()),
//!     end_ts: Some("2023-09-27T00:00:00Z".to_string()),
//! };
//! let result = run_query(&store, &params).unwrap();
//! assert_eq!(result.service_name, "Checkout");
//! assert_eq!(result.alerts.len(), 1);
//! ```

pub mod alerts;
pub mod api;
pub mod query;
pub mod storage;

// Re-export commonly used types
pub use alerts::{Alert, AlertError};
pub use query::{run_query, AlertQuery, QueryParams, QueryResult};
pub use storage::AlertStore;
