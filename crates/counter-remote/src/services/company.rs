//! Company settings service: the single settings row each owner keeps on
//! the backend, written with upsert semantics.

use reqwest::Method;
use serde_json::json;

use crate::client::{RemoteClient, RemoteResult};
use crate::services::items::first_or_not_found;
use crate::types::{CompanySettings, CompanySettingsInput};

const TABLE: &str = "company_settings";

/// Read/upsert of the owner's company settings row.
pub struct CompanyService<'a> {
    client: &'a RemoteClient,
}

impl<'a> CompanyService<'a> {
    pub fn new(client: &'a RemoteClient) -> Self {
        CompanyService { client }
    }

    /// Fetches the owner's settings row; `None` when none exists yet.
    pub async fn get(&self, user_id: &str) -> RemoteResult<Option<CompanySettings>> {
        let query = vec![
            ("select".to_string(), "*".to_string()),
            ("user_id".to_string(), format!("eq.{user_id}")),
            ("limit".to_string(), "1".to_string()),
        ];

        let rows: RemoteResult<Vec<CompanySettings>> = self
            .client
            .request_json(Method::GET, &self.client.rest_url(TABLE), &query, &[], None)
            .await;

        match rows.into_result() {
            Err(error) => RemoteResult::err(error),
            Ok(mut rows) => RemoteResult::ok(if rows.is_empty() {
                None
            } else {
                Some(rows.swap_remove(0))
            }),
        }
    }

    /// Creates or replaces the owner's settings row, keyed by `user_id`.
    pub async fn upsert(&self, input: &CompanySettingsInput) -> RemoteResult<CompanySettings> {
        let query = vec![("on_conflict".to_string(), "user_id".to_string())];
        let body = json!({
            "user_id": input.user_id,
            "company_name": input.company_name,
            "address": input.address,
            "phone": input.phone,
            "email": input.email,
            "logo_url": input.logo_url,
        });

        let rows: RemoteResult<Vec<CompanySettings>> = self
            .client
            .request_json(
                Method::POST,
                &self.client.rest_url(TABLE),
                &query,
                &[(
                    "Prefer",
                    "resolution=merge-duplicates,return=representation".to_string(),
                )],
                Some(&body),
            )
            .await;

        first_or_not_found(rows, "Company settings", &input.user_id)
    }
}
