//! Catalog item service: CRUD over the `items` table.

use reqwest::Method;
use serde_json::json;

use crate::client::{RemoteClient, RemoteResult};
use crate::error::{RemoteError, RemoteErrorKind};
use crate::filter::ListFilter;
use crate::types::{RemoteItem, RemoteItemInput};

const TABLE: &str = "items";
const SEARCH_COLUMN: &str = "name";
const DATE_COLUMN: &str = "created_at";

/// CRUD over the owner's catalog items.
pub struct ItemsService<'a> {
    client: &'a RemoteClient,
}

impl<'a> ItemsService<'a> {
    pub fn new(client: &'a RemoteClient) -> Self {
        ItemsService { client }
    }

    /// Lists the owner's items; search/date/pagination run server-side.
    pub async fn list(&self, user_id: &str, filter: &ListFilter) -> RemoteResult<Vec<RemoteItem>> {
        let mut query = vec![
            ("select".to_string(), "*".to_string()),
            ("user_id".to_string(), format!("eq.{user_id}")),
        ];
        query.extend(filter.to_query(SEARCH_COLUMN, DATE_COLUMN));

        self.client
            .request_json(Method::GET, &self.client.rest_url(TABLE), &query, &[], None)
            .await
    }

    /// Fetches a single item by id.
    pub async fn get(&self, id: &str) -> RemoteResult<RemoteItem> {
        let query = vec![
            ("select".to_string(), "*".to_string()),
            ("id".to_string(), format!("eq.{id}")),
            ("limit".to_string(), "1".to_string()),
        ];

        let rows: RemoteResult<Vec<RemoteItem>> = self
            .client
            .request_json(Method::GET, &self.client.rest_url(TABLE), &query, &[], None)
            .await;

        first_or_not_found(rows, "Item", id)
    }

    /// Creates an item for the owner; the backend assigns the id.
    pub async fn create(&self, user_id: &str, input: &RemoteItemInput) -> RemoteResult<RemoteItem> {
        let body = json!({
            "user_id": user_id,
            "name": input.name,
            "price_cents": input.price_cents,
            "stock": input.stock,
            "category": input.category,
        });

        let rows: RemoteResult<Vec<RemoteItem>> = self
            .client
            .request_json(
                Method::POST,
                &self.client.rest_url(TABLE),
                &[],
                &[("Prefer", "return=representation".to_string())],
                Some(&body),
            )
            .await;

        first_or_not_found(rows, "Item", "created")
    }

    /// Updates an item in place.
    pub async fn update(&self, id: &str, input: &RemoteItemInput) -> RemoteResult<RemoteItem> {
        let query = vec![("id".to_string(), format!("eq.{id}"))];
        let body = json!({
            "name": input.name,
            "price_cents": input.price_cents,
            "stock": input.stock,
            "category": input.category,
        });

        let rows: RemoteResult<Vec<RemoteItem>> = self
            .client
            .request_json(
                Method::PATCH,
                &self.client.rest_url(TABLE),
                &query,
                &[("Prefer", "return=representation".to_string())],
                Some(&body),
            )
            .await;

        first_or_not_found(rows, "Item", id)
    }

    /// Deletes an item.
    pub async fn delete(&self, id: &str) -> RemoteResult<()> {
        let query = vec![("id".to_string(), format!("eq.{id}"))];

        self.client
            .request_no_content(Method::DELETE, &self.client.rest_url(TABLE), &query, &[], None)
            .await
    }
}

/// The REST layer answers row operations with arrays; a single-row call
/// that comes back empty means the row does not exist.
pub(crate) fn first_or_not_found<T>(
    rows: RemoteResult<Vec<T>>,
    entity: &str,
    id: &str,
) -> RemoteResult<T> {
    match rows.into_result() {
        Err(error) => RemoteResult::err(error),
        Ok(mut rows) => {
            if rows.is_empty() {
                RemoteResult::err(RemoteError::new(
                    RemoteErrorKind::NotFound,
                    format!("{entity} not found: {id}"),
                ))
            } else {
                RemoteResult::ok(rows.swap_remove(0))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_or_not_found() {
        let hit = first_or_not_found(RemoteResult::ok(vec![1, 2]), "Item", "x");
        assert_eq!(hit.into_result().unwrap(), 1);

        let miss: RemoteResult<i32> = first_or_not_found(RemoteResult::ok(vec![]), "Item", "x");
        let err = miss.into_result().unwrap_err();
        assert_eq!(err.kind, RemoteErrorKind::NotFound);
        assert_eq!(err.message, "Item not found: x");
    }
}
