//! Error types for linedesk-core.
//!
//! The engine has very few failure modes. Most operator mistakes are
//! recovered locally (a dangling selection falls back to the first record),
//! so only the cases a caller must react to are surfaced here.
//!
//! # Error Categories
//!
//! - **Registry errors**: `ConnectionNotFound`
//! - **Form input errors**: `InvalidDate`

use crate::connection::ConnectionId;

/// Result type alias for linedesk-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during linedesk-core operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    // ==================== Registry Errors ====================
    /// An update referenced an id the registry has never issued.
    ///
    /// The registry is left untouched; nothing is inserted.
    #[error("connection not found: {0}")]
    ConnectionNotFound(ConnectionId),

    // ==================== Form Input Errors ====================
    /// A calendar date could not be parsed.
    ///
    /// Dates are expected in `YYYY-MM-DD` form.
    #[error("invalid date {input:?}: expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input, verbatim.
        input: String,
    },
}
