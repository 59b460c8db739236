//! # Database & Session Error Types
//!
//! Error types for the record store and the billing session.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SessionError ← Merges with CoreError for the front-end                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Front-end displays user-friendly message                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use counter_core::CoreError;
use thiserror::Error;

// =============================================================================
// Db Error
// =============================================================================

/// Record store errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and user feedback.
#[derive(Debug, Error)]
pub enum DbError {
    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// A stored record could not be serialized for writing.
    ///
    /// Deserialization failures are NOT an error: a malformed stored
    /// record loads as the default value instead.
    #[error("Record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// sqlx::Error::Database       → DbError::QueryFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),
            sqlx::Error::Database(db_err) => DbError::QueryFailed(db_err.message().to_string()),
            _ => DbError::Internal(err.to_string()),
        }
    }
}

/// Result type for record store operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Session Error
// =============================================================================

/// Billing session errors: business rule violations plus storage failures.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A business rule was violated; no state was mutated.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The record store failed.
    #[error(transparent)]
    Db(#[from] DbError),

    /// Checkout was re-entered while a previous checkout was still being
    /// persisted. The duplicate attempt is refused; the first one
    /// proceeds.
    #[error("A checkout is already in progress")]
    CheckoutInProgress,
}

/// Result type for billing session operations.
pub type SessionResult<T> = Result<T, SessionError>;

// =============================================================================
// Unit Tests
// =============================================================================
