//! Alert records and the errors raised while accepting or querying them

pub mod model;

pub use model::Alert;

#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("{message}")]
    MalformedInput { alert_id: String, message: String },

    #[error("{0} is required")]
    MissingRequiredField(&'static str),

    #[error("missing parameters")]
    MissingParameter,

    #[error("invalid {param} {value:?}: {source}")]
    MalformedTimestamp {
        param: &'static str,
        value: String,
        #[source]
        source: TimestampError,
    },
}

/// Why a query timestamp was rejected
#[derive(Debug, thiserror::Error)]
pub enum TimestampError {
    #[error(transparent)]
    Parse(#[from] chrono::ParseError),

    #[error("UTC offset must be Z or \u{00b1}hh:mm")]
    InvalidOffset,

    #[error("second out of range")]
    LeapSecond,
}

impl AlertError {
    /// The alert id to echo back in a malformed-input response
    pub fn alert_id(&self) -> Option<&str> {
        match self {
            AlertError::MalformedInput { alert_id, .. } => Some(alert_id),
            _ => None,
        }
    }
}
