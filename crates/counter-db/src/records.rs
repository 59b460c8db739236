//! # Named Records
//!
//! Load/save of the two persisted application records.
//!
//! ## Record Keys
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  "store_settings"  →  StoreSettings JSON                             │
//! │  "sales_history"   →  Vec<Sale> JSON (append-only, newest last)      │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Load Semantics
//! - Absent record → default value (empty history, default settings)
//! - Malformed record → default value, with a warning logged; the store
//!   is never considered corrupt from the caller's perspective
//!
//! ## Save Semantics
//! - Wholesale overwrite of the record's value (upsert by key)
//! - No partial updates, no merging

use chrono::Utc;
use counter_core::{Sale, StoreSettings};
use sqlx::Row;
use tracing::warn;

use crate::error::DbResult;
use crate::store::LocalStore;

/// Record key for the store settings.
pub const SETTINGS_KEY: &str = "store_settings";

/// Record key for the sales history.
pub const HISTORY_KEY: &str = "sales_history";

// =============================================================================
// Raw Record Access
// =============================================================================

async fn load_raw(store: &LocalStore, key: &str) -> DbResult<Option<String>> {
    let row = sqlx::query("SELECT value FROM app_records WHERE key = ?")
        .bind(key)
        .fetch_optional(store.pool())
        .await?;

    Ok(row.map(|r| r.get::<String, _>("value")))
}

async fn save_raw(store: &LocalStore, key: &str, value: &str) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO app_records (key, value, updated_at)
        VALUES (?, ?, ?)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(key)
    .bind(value)
    .bind(Utc::now().to_rfc3339())
    .execute(store.pool())
    .await?;

    Ok(())
}

async fn delete_raw(store: &LocalStore, key: &str) -> DbResult<()> {
    sqlx::query("DELETE FROM app_records WHERE key = ?")
        .bind(key)
        .execute(store.pool())
        .await?;

    Ok(())
}

// =============================================================================
// Settings Record
// =============================================================================

/// Loads the store settings, falling back to defaults when the record is
/// absent or malformed. The loaded value is normalized (labels trimmed,
/// blank labels restored).
pub async fn load_settings(store: &LocalStore) -> DbResult<StoreSettings> {
    let settings = match load_raw(store, SETTINGS_KEY).await? {
        None => StoreSettings::default(),
        Some(json) => match serde_json::from_str::<StoreSettings>(&json) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(key = SETTINGS_KEY, %err, "Malformed record, using defaults");
                StoreSettings::default()
            }
        },
    };

    Ok(settings.normalize())
}

/// Saves the store settings, overwriting the previous record.
pub async fn save_settings(store: &LocalStore, settings: &StoreSettings) -> DbResult<()> {
    let json = serde_json::to_string(settings)?;
    save_raw(store, SETTINGS_KEY, &json).await
}

// =============================================================================
// History Record
// =============================================================================

/// Loads the sales history, falling back to empty when the record is
/// absent or malformed.
pub async fn load_history(store: &LocalStore) -> DbResult<Vec<Sale>> {
    let history = match load_raw(store, HISTORY_KEY).await? {
        None => Vec::new(),
        Some(json) => match serde_json::from_str::<Vec<Sale>>(&json) {
            Ok(sales) => sales,
            Err(err) => {
                warn!(key = HISTORY_KEY, %err, "Malformed record, using empty history");
                Vec::new()
            }
        },
    };

    Ok(history)
}

/// Saves the sales history, overwriting the previous record.
pub async fn save_history(store: &LocalStore, history: &[Sale]) -> DbResult<()> {
    let json = serde_json::to_string(history)?;
    save_raw(store, HISTORY_KEY, &json).await
}

/// Deletes the sales history record entirely.
pub async fn clear_history(store: &LocalStore) -> DbResult<()> {
    delete_raw(store, HISTORY_KEY).await
}

// =============================================================================
// Unit Tests
// =============================================================================
