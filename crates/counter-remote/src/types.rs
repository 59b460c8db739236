//! # Remote Entity Types
//!
//! Wire shapes of the hosted backend's rows, as the REST layer returns
//! them. Timestamps travel as ISO-8601 strings; money travels as cents.
//!
//! Ids are assigned server-side, so create payloads are separate input
//! structs without id/timestamps.

use serde::{Deserialize, Serialize};

// =============================================================================
// Items
// =============================================================================

/// A catalog item row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteItem {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub price_cents: Option<i64>,
    pub stock: Option<i64>,
    pub category: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Create/update payload for an item.
#[derive(Debug, Clone, Serialize)]
pub struct RemoteItemInput {
    pub name: String,
    pub price_cents: Option<i64>,
    pub stock: Option<i64>,
    pub category: Option<String>,
}

// =============================================================================
// Receipts
// =============================================================================

/// A receipt row with its embedded line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteReceipt {
    pub id: String,
    pub user_id: String,
    pub customer_name: String,
    pub total_cents: i64,
    pub item_count: i64,
    pub created_at: Option<String>,
    #[serde(default)]
    pub receipt_items: Vec<RemoteReceiptLine>,
}

/// One line of a remote receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteReceiptLine {
    pub id: String,
    pub receipt_id: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

/// Create payload for a receipt (lines are inserted in a second step,
/// keyed by the returned receipt id).
#[derive(Debug, Clone, Serialize)]
pub struct RemoteReceiptInput {
    pub customer_name: String,
    pub total_cents: i64,
    pub item_count: i64,
}

/// Create payload for one receipt line.
#[derive(Debug, Clone, Serialize)]
pub struct RemoteReceiptLineInput {
    pub receipt_id: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

// =============================================================================
// Payments
// =============================================================================

/// A payment row with its linked invoice and client embeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemotePayment {
    pub id: String,
    pub user_id: String,
    pub invoice_id: Option<String>,
    pub amount_cents: i64,
    pub method: Option<String>,
    pub paid_at: Option<String>,
    #[serde(default)]
    pub invoice: Option<PaymentInvoice>,
}

/// The invoice a payment settles, embedded on reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentInvoice {
    pub id: String,
    pub number: Option<String>,
    #[serde(default)]
    pub client: Option<PaymentClient>,
}

/// The client behind an embedded invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentClient {
    pub id: String,
    pub name: String,
}

/// Create/update payload for a payment.
#[derive(Debug, Clone, Serialize)]
pub struct RemotePaymentInput {
    pub invoice_id: Option<String>,
    pub amount_cents: i64,
    pub method: Option<String>,
    pub paid_at: Option<String>,
}

/// Aggregate over a payment date range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaymentStats {
    pub count: u64,
    pub total_cents: i64,
}

// =============================================================================
// Company Settings
// =============================================================================

/// The single company-settings row an owner keeps on the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySettings {
    pub id: String,
    pub user_id: String,
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub logo_url: Option<String>,
    pub updated_at: Option<String>,
}

/// Upsert payload for the company settings.
#[derive(Debug, Clone, Serialize)]
pub struct CompanySettingsInput {
    pub user_id: String,
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub logo_url: Option<String>,
}

// =============================================================================
// Auth
// =============================================================================

/// A signed-in session, as the auth endpoint returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<i64>,
    pub user: SessionUser,
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_embed_deserializes() {
        let json = r#"{
            "id": "r1",
            "user_id": "u1",
            "customer_name": "Asha",
            "total_cents": 31000,
            "item_count": 3,
            "created_at": "2026-08-23T14:35:07Z",
            "receipt_items": [
                {
                    "id": "l1",
                    "receipt_id": "r1",
                    "name": "Rice",
                    "quantity": 2,
                    "unit_price_cents": 8000,
                    "line_total_cents": 16000
                }
            ]
        }"#;

        let receipt: RemoteReceipt = serde_json::from_str(json).unwrap();
        assert_eq!(receipt.receipt_items.len(), 1);
        assert_eq!(receipt.receipt_items[0].name, "Rice");
    }

    #[test]
    fn test_receipt_without_embed_defaults_to_empty_lines() {
        let json = r#"{
            "id": "r1",
            "user_id": "u1",
            "customer_name": "Asha",
            "total_cents": 31000,
            "item_count": 3,
            "created_at": null
        }"#;

        let receipt: RemoteReceipt = serde_json::from_str(json).unwrap();
        assert!(receipt.receipt_items.is_empty());
    }

    #[test]
    fn test_payment_nested_embeds() {
        let json = r#"{
            "id": "p1",
            "user_id": "u1",
            "invoice_id": "inv1",
            "amount_cents": 5000,
            "method": "cash",
            "paid_at": "2026-08-23",
            "invoice": {
                "id": "inv1",
                "number": "INV-001",
                "client": {"id": "c1", "name": "Asha"}
            }
        }"#;

        let payment: RemotePayment = serde_json::from_str(json).unwrap();
        let invoice = payment.invoice.unwrap();
        assert_eq!(invoice.number.as_deref(), Some("INV-001"));
        assert_eq!(invoice.client.unwrap().name, "Asha");
    }

    #[test]
    fn test_session_deserializes() {
        let json = r#"{
            "access_token": "tok",
            "refresh_token": "ref",
            "token_type": "bearer",
            "expires_in": 3600,
            "user": {"id": "u1", "email": "owner@example.com"}
        }"#;

        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.access_token, "tok");
        assert_eq!(session.user.id, "u1");
    }
}
