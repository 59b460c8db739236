//! # counter-db: Local Persistence for Counter POS
//!
//! SQLite-backed record store plus the stateful billing session that
//! orchestrates counter-core over it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Counter POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front-end (CLI / desktop)                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ counter-db (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────┐  ┌─────────────┐  ┌───────────────────────┐ │   │
//! │  │   │    store     │  │   records   │  │       session         │ │   │
//! │  │   │  LocalStore  │  │ settings /  │  │    BillingSession     │ │   │
//! │  │   │  (SQLite)    │  │  history    │  │  (cart + checkout)    │ │   │
//! │  │   └──────────────┘  └─────────────┘  └───────────────────────┘ │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               counter-core (Pure Business Logic)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - SQLite pool and schema bootstrap
//! - [`records`] - The two named JSON records (settings, history)
//! - [`session`] - The billing session state machine
//! - [`error`] - Storage and session error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod records;
pub mod session;
pub mod store;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{DbError, DbResult, SessionError, SessionResult};
pub use session::BillingSession;
pub use store::{LocalStore, StoreConfig};
