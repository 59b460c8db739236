//! # counter-remote: Hosted Backend Client for Counter POS
//!
//! The full-variant boundary: catalog items, receipts, payments, company
//! settings, authentication and logo storage against a PostgREST-style
//! hosted backend.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Counter POS (full variant)                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                        Front-end                                │   │
//! │  └───────────────┬─────────────────────────────┬───────────────────┘   │
//! │                  │                             │                        │
//! │  ┌───────────────▼───────────────┐ ┌───────────▼───────────────────┐   │
//! │  │   counter-db (local state)    │ │  ★ counter-remote (THIS) ★    │   │
//! │  └───────────────────────────────┘ │                               │   │
//! │                                    │  client ── RemoteResult<T>    │   │
//! │                                    │  services/                    │   │
//! │                                    │    items receipts payments    │   │
//! │                                    │    company auth storage       │   │
//! │                                    └───────────┬───────────────────┘   │
//! │                                                │ HTTPS                  │
//! │                                    ┌───────────▼───────────────────┐   │
//! │                                    │   Hosted backend              │   │
//! │                                    │   rest/v1 auth/v1 storage/v1  │   │
//! │                                    └───────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`client`] - Configuration, URL normalization, the shared HTTP client
//! - [`filter`] - Server-side list filters (search, date window, paging)
//! - [`types`] - Wire shapes of the backend's rows
//! - [`services`] - One module per entity (items, receipts, payments,
//!   company, auth, storage)
//! - [`error`] - Categorized remote errors
//!
//! ## Design Principles
//!
//! 1. **Never throws**: every call resolves to `RemoteResult<T>` with
//!    exactly one of data/error populated
//! 2. **Server-side queries**: filtering, pagination and ordering run on
//!    the backend, never over a full local copy
//! 3. **No retry policy**: a failed call is reported and the user re-acts

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod error;
pub mod filter;
pub mod services;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use client::{normalize_base_url, RemoteClient, RemoteConfig, RemoteResult};
pub use error::{RemoteError, RemoteErrorKind};
pub use filter::ListFilter;
pub use services::{
    AuthService, CompanyService, ItemsService, PaymentsService, ReceiptsService, StorageService,
};
