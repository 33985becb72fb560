pub mod executor;
pub mod parser;

pub use executor::{execute_query, matches, QueryResult};
pub use parser::{parse_query, parse_timestamp, AlertQuery, QueryParams};

use crate::alerts::AlertError;
use crate::storage::AlertStore;

/// Convenience function to validate parameters and run the scan
pub fn run_query(store: &AlertStore, params: &QueryParams) -> Result<QueryResult, AlertError> {
    let query = parse_query(params)?;
    Ok(execute_query(store, &query))
}
