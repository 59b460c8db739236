//! Payment service: payments with their invoice/client embeds and
//! date-range stats.

use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

use crate::client::{RemoteClient, RemoteResult};
use crate::filter::ListFilter;
use crate::services::items::first_or_not_found;
use crate::types::{PaymentStats, RemotePayment, RemotePaymentInput};

const TABLE: &str = "payments";
const SEARCH_COLUMN: &str = "method";
const DATE_COLUMN: &str = "paid_at";

/// Embedded select: the payment with its invoice and that invoice's client.
const SELECT_WITH_EMBEDS: &str = "*,invoice:invoices(id,number,client:clients(id,name))";

/// CRUD and aggregates over the owner's payments.
pub struct PaymentsService<'a> {
    client: &'a RemoteClient,
}

impl<'a> PaymentsService<'a> {
    pub fn new(client: &'a RemoteClient) -> Self {
        PaymentsService { client }
    }

    /// Lists the owner's payments with invoice/client embedded.
    pub async fn list(
        &self,
        user_id: &str,
        filter: &ListFilter,
    ) -> RemoteResult<Vec<RemotePayment>> {
        let mut query = vec![
            ("select".to_string(), SELECT_WITH_EMBEDS.to_string()),
            ("user_id".to_string(), format!("eq.{user_id}")),
        ];
        query.extend(filter.to_query(SEARCH_COLUMN, DATE_COLUMN));

        self.client
            .request_json(Method::GET, &self.client.rest_url(TABLE), &query, &[], None)
            .await
    }

    /// Fetches a single payment.
    pub async fn get(&self, id: &str) -> RemoteResult<RemotePayment> {
        let query = vec![
            ("select".to_string(), SELECT_WITH_EMBEDS.to_string()),
            ("id".to_string(), format!("eq.{id}")),
            ("limit".to_string(), "1".to_string()),
        ];

        let rows: RemoteResult<Vec<RemotePayment>> = self
            .client
            .request_json(Method::GET, &self.client.rest_url(TABLE), &query, &[], None)
            .await;

        first_or_not_found(rows, "Payment", id)
    }

    /// Records a payment.
    pub async fn create(
        &self,
        user_id: &str,
        input: &RemotePaymentInput,
    ) -> RemoteResult<RemotePayment> {
        let body = json!({
            "user_id": user_id,
            "invoice_id": input.invoice_id,
            "amount_cents": input.amount_cents,
            "method": input.method,
            "paid_at": input.paid_at,
        });

        let rows: RemoteResult<Vec<RemotePayment>> = self
            .client
            .request_json(
                Method::POST,
                &self.client.rest_url(TABLE),
                &[],
                &[("Prefer", "return=representation".to_string())],
                Some(&body),
            )
            .await;

        first_or_not_found(rows, "Payment", "created")
    }

    /// Updates a payment in place.
    pub async fn update(
        &self,
        id: &str,
        input: &RemotePaymentInput,
    ) -> RemoteResult<RemotePayment> {
        let query = vec![("id".to_string(), format!("eq.{id}"))];
        let body = json!({
            "invoice_id": input.invoice_id,
            "amount_cents": input.amount_cents,
            "method": input.method,
            "paid_at": input.paid_at,
        });

        let rows: RemoteResult<Vec<RemotePayment>> = self
            .client
            .request_json(
                Method::PATCH,
                &self.client.rest_url(TABLE),
                &query,
                &[("Prefer", "return=representation".to_string())],
                Some(&body),
            )
            .await;

        first_or_not_found(rows, "Payment", id)
    }

    /// Deletes a payment.
    pub async fn delete(&self, id: &str) -> RemoteResult<()> {
        let query = vec![("id".to_string(), format!("eq.{id}"))];

        self.client
            .request_no_content(Method::DELETE, &self.client.rest_url(TABLE), &query, &[], None)
            .await
    }

    /// Count and total over a date range. The range filter runs
    /// server-side; only the amounts travel back.
    pub async fn stats(
        &self,
        user_id: &str,
        date_from: &str,
        date_to: &str,
    ) -> RemoteResult<PaymentStats> {
        #[derive(Deserialize)]
        struct AmountRow {
            amount_cents: i64,
        }

        let query = vec![
            ("select".to_string(), "amount_cents".to_string()),
            ("user_id".to_string(), format!("eq.{user_id}")),
            (DATE_COLUMN.to_string(), format!("gte.{date_from}")),
            (DATE_COLUMN.to_string(), format!("lte.{date_to}")),
        ];

        let rows: RemoteResult<Vec<AmountRow>> = self
            .client
            .request_json(Method::GET, &self.client.rest_url(TABLE), &query, &[], None)
            .await;

        match rows.into_result() {
            Err(error) => RemoteResult::err(error),
            Ok(rows) => RemoteResult::ok(PaymentStats {
                count: rows.len() as u64,
                total_cents: rows.iter().map(|r| r.amount_cents).sum(),
            }),
        }
    }
}
