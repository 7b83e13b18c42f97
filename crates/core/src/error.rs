//! Error-as-value contract for the question source
//!
//! The question source never panics or throws: every failure along the
//! fetch/parse path is reported as an `Err(SourceError)` inside a
//! [`SourceResult`]. `Ok` and `Err` are mutually exclusive by construction,
//! and there is no "pending" state; a caller that is still waiting simply
//! does not hold a result yet.

use crate::opentdb::ResponseCode;

/// Outcome of asking the question source for a batch of records.
pub type SourceResult<T> = Result<T, SourceError>;

/// Reasons the question source could not produce records
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The upstream API answered with a non-success HTTP status.
    #[error("An error occurred. Status code {status}")]
    SourceUnavailable { status: u16 },

    /// The response body does not match the expected record shape.
    #[error("Could not parse the JSON result: {0}")]
    MalformedPayload(String),

    /// The requested number of questions is outside the accepted range.
    #[error("Amount of trivia questions must be between 1 and 50 inclusive (got {0})")]
    InvalidRequestAmount(u32),

    /// The API answered, but flagged the request with a non-zero response code.
    #[error("The trivia API rejected the request: {}", .0.description())]
    Rejected(ResponseCode),

    /// The request never produced a response (DNS, TLS, connection reset...).
    #[error("Request failed: {0}")]
    Transport(String),
}
