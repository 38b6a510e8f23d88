//! Error types for parsing filter data.
//!
//! The selector itself never fails. Only turning strings and JSON payloads
//! into typed values can.

use thiserror::Error;

/// Errors raised while parsing filter inputs.
#[derive(Debug, Error)]
pub enum FilterError {
    /// Operator string was neither `AND` nor `OR`.
    #[error("unknown operator: {0}")]
    UnknownOperator(String),
    /// Outcome name did not match any known outcome kind.
    #[error("unknown outcome kind: {0}")]
    UnknownOutcome(String),
    /// Group label did not name a dataset filter group.
    #[error("unknown filter group: {0}")]
    UnknownGroup(String),
    /// Option payload could not be decoded.
    #[error("malformed filter options: {0}")]
    Payload(#[from] serde_json::Error),
}
