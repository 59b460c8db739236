//! # Entity Services
//!
//! One module per backend entity, each a thin borrow over the shared
//! [`RemoteClient`](crate::client::RemoteClient) with a uniform
//! list/get/create/update/delete surface.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  items     → rest/v1/items                                           │
//! │  receipts  → rest/v1/receipts + rest/v1/receipt_items                │
//! │  payments  → rest/v1/payments (+ invoice/client embeds)              │
//! │  company   → rest/v1/company_settings (one row per owner, upsert)    │
//! │  auth      → auth/v1/token, auth/v1/logout                           │
//! │  storage   → storage/v1/object (company logo)                        │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod company;
pub mod items;
pub mod payments;
pub mod receipts;
pub mod storage;

pub use auth::AuthService;
pub use company::CompanyService;
pub use items::ItemsService;
pub use payments::PaymentsService;
pub use receipts::ReceiptsService;
pub use storage::StorageService;
