//! Receipt service: receipts plus their nested line items.
//!
//! Reads embed the lines in a single call; creates are a two-step insert
//! (receipt row first, then its lines keyed by the returned id).

use reqwest::Method;
use serde_json::json;
use tracing::warn;

use crate::client::{RemoteClient, RemoteResult};
use crate::filter::ListFilter;
use crate::services::items::first_or_not_found;
use crate::types::{RemoteReceipt, RemoteReceiptInput, RemoteReceiptLineInput};

const TABLE: &str = "receipts";
const LINES_TABLE: &str = "receipt_items";
const SEARCH_COLUMN: &str = "customer_name";
const DATE_COLUMN: &str = "created_at";

/// Embedded select: the receipt row with all of its lines.
const SELECT_WITH_LINES: &str = "*,receipt_items(*)";

/// CRUD over the owner's receipts.
pub struct ReceiptsService<'a> {
    client: &'a RemoteClient,
}

impl<'a> ReceiptsService<'a> {
    pub fn new(client: &'a RemoteClient) -> Self {
        ReceiptsService { client }
    }

    /// Lists the owner's receipts with their lines embedded.
    pub async fn list(
        &self,
        user_id: &str,
        filter: &ListFilter,
    ) -> RemoteResult<Vec<RemoteReceipt>> {
        let mut query = vec![
            ("select".to_string(), SELECT_WITH_LINES.to_string()),
            ("user_id".to_string(), format!("eq.{user_id}")),
        ];
        query.extend(filter.to_query(SEARCH_COLUMN, DATE_COLUMN));

        self.client
            .request_json(Method::GET, &self.client.rest_url(TABLE), &query, &[], None)
            .await
    }

    /// Fetches a single receipt with its lines.
    pub async fn get(&self, id: &str) -> RemoteResult<RemoteReceipt> {
        let query = vec![
            ("select".to_string(), SELECT_WITH_LINES.to_string()),
            ("id".to_string(), format!("eq.{id}")),
            ("limit".to_string(), "1".to_string()),
        ];

        let rows: RemoteResult<Vec<RemoteReceipt>> = self
            .client
            .request_json(Method::GET, &self.client.rest_url(TABLE), &query, &[], None)
            .await;

        first_or_not_found(rows, "Receipt", id)
    }

    /// Creates a receipt and its lines.
    ///
    /// Step 1 inserts the receipt row and yields the id; step 2 batch
    /// inserts the lines under that id. If the second step fails, the
    /// receipt row is removed again so a retry starts clean.
    pub async fn create(
        &self,
        user_id: &str,
        input: &RemoteReceiptInput,
        lines: &[RemoteReceiptLineInput],
    ) -> RemoteResult<RemoteReceipt> {
        let body = json!({
            "user_id": user_id,
            "customer_name": input.customer_name,
            "total_cents": input.total_cents,
            "item_count": input.item_count,
        });

        let rows: RemoteResult<Vec<RemoteReceipt>> = self
            .client
            .request_json(
                Method::POST,
                &self.client.rest_url(TABLE),
                &[],
                &[("Prefer", "return=representation".to_string())],
                Some(&body),
            )
            .await;

        let mut receipt = match first_or_not_found(rows, "Receipt", "created").into_result() {
            Ok(receipt) => receipt,
            Err(error) => return RemoteResult::err(error),
        };

        if lines.is_empty() {
            return RemoteResult::ok(receipt);
        }

        let line_rows: Vec<serde_json::Value> = lines
            .iter()
            .map(|line| {
                json!({
                    "receipt_id": receipt.id,
                    "name": line.name,
                    "quantity": line.quantity,
                    "unit_price_cents": line.unit_price_cents,
                    "line_total_cents": line.line_total_cents,
                })
            })
            .collect();

        let inserted: RemoteResult<Vec<crate::types::RemoteReceiptLine>> = self
            .client
            .request_json(
                Method::POST,
                &self.client.rest_url(LINES_TABLE),
                &[],
                &[("Prefer", "return=representation".to_string())],
                Some(&json!(line_rows)),
            )
            .await;

        match inserted.into_result() {
            Ok(inserted) => {
                receipt.receipt_items = inserted;
                RemoteResult::ok(receipt)
            }
            Err(error) => {
                // Undo step 1 so the half-created receipt doesn't linger.
                let cleanup = self.delete(&receipt.id).await;
                if let Some(cleanup_err) = cleanup.error {
                    warn!(receipt_id = %receipt.id, %cleanup_err, "Orphaned receipt left behind");
                }
                RemoteResult::err(error)
            }
        }
    }

    /// Deletes a receipt and its lines.
    pub async fn delete(&self, id: &str) -> RemoteResult<()> {
        let line_query = vec![("receipt_id".to_string(), format!("eq.{id}"))];
        let result = self
            .client
            .request_no_content(
                Method::DELETE,
                &self.client.rest_url(LINES_TABLE),
                &line_query,
                &[],
                None,
            )
            .await;
        if let Some(error) = result.error {
            return RemoteResult::err(error);
        }

        let query = vec![("id".to_string(), format!("eq.{id}"))];
        self.client
            .request_no_content(Method::DELETE, &self.client.rest_url(TABLE), &query, &[], None)
            .await
    }
}
