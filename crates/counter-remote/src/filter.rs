//! # List Filters
//!
//! Server-side query parameters for list endpoints.
//!
//! Filtering, pagination and ordering are pushed to the backend's query
//! operators; callers never fetch everything and filter locally.

// =============================================================================
// List Filter
// =============================================================================

/// Filter for list calls: free-text search, a date window, pagination.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    /// Case-insensitive substring match on the entity's search column.
    pub search: Option<String>,

    /// Inclusive lower bound on the entity's date column (ISO date).
    pub date_from: Option<String>,

    /// Inclusive upper bound on the entity's date column (ISO date).
    pub date_to: Option<String>,

    /// Page size.
    pub limit: Option<u32>,

    /// Page start.
    pub offset: Option<u32>,
}

impl ListFilter {
    pub fn new() -> Self {
        ListFilter::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn date_from(mut self, date: impl Into<String>) -> Self {
        self.date_from = Some(date.into());
        self
    }

    pub fn date_to(mut self, date: impl Into<String>) -> Self {
        self.date_to = Some(date.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Renders the filter to query parameters.
    ///
    /// `search_column` takes the `ilike` match, `date_column` the
    /// `gte`/`lte` bounds, and results are ordered by `date_column`
    /// descending (newest first).
    pub fn to_query(&self, search_column: &str, date_column: &str) -> Vec<(String, String)> {
        let mut query = Vec::new();

        if let Some(search) = &self.search {
            let term = search.trim();
            if !term.is_empty() {
                query.push((search_column.to_string(), format!("ilike.*{term}*")));
            }
        }
        if let Some(from) = &self.date_from {
            query.push((date_column.to_string(), format!("gte.{from}")));
        }
        if let Some(to) = &self.date_to {
            query.push((date_column.to_string(), format!("lte.{to}")));
        }

        query.push(("order".to_string(), format!("{date_column}.desc")));

        if let Some(limit) = self.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset".to_string(), offset.to_string()));
        }

        query
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_only_orders() {
        let query = ListFilter::new().to_query("name", "created_at");
        assert_eq!(
            query,
            vec![("order".to_string(), "created_at.desc".to_string())]
        );
    }

    #[test]
    fn test_full_filter_rendering() {
        let query = ListFilter::new()
            .search("rice")
            .date_from("2026-08-01")
            .date_to("2026-08-23")
            .limit(50)
            .offset(100)
            .to_query("name", "created_at");

        assert_eq!(
            query,
            vec![
                ("name".to_string(), "ilike.*rice*".to_string()),
                ("created_at".to_string(), "gte.2026-08-01".to_string()),
                ("created_at".to_string(), "lte.2026-08-23".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
                ("limit".to_string(), "50".to_string()),
                ("offset".to_string(), "100".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_search_is_dropped() {
        let query = ListFilter::new().search("   ").to_query("name", "created_at");
        assert!(!query.iter().any(|(k, _)| k == "name"));
    }
}
