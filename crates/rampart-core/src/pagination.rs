//! Pagination request parsing and response envelopes.
//!
//! List endpoints accept five optional query parameters:
//!
//! | Parameter   | Accepted values                    | Default     |
//! |-------------|------------------------------------|-------------|
//! | `page`      | integer `>= 1`                     | `1`         |
//! | `limit`     | integer in `1..=100`               | `10`        |
//! | `search`    | any string, non-empty once trimmed | none        |
//! | `sortBy`    | any non-empty string               | `createdAt` |
//! | `sortOrder` | exactly `asc` or `desc`            | `desc`      |
//!
//! Parsing never fails. A missing, non-numeric or out-of-range value is
//! replaced by its default, so a malformed query string degrades to the
//! first page of the default listing instead of rejecting the request.
//!
//! # Example
//!
//! ```ignore
//! use rampart_core::pagination::PaginationRequest;
//!
//! async fn list_users(request: PaginationRequest) -> Result<Json<...>, AppError> {
//!     // request.page, request.limit, ... are already bounded
//! }
//! ```

use std::collections::HashMap;

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;
pub const DEFAULT_SORT_FIELD: &str = "createdAt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SortOrder {
    #[serde(rename = "asc")]
    Ascending,
    #[default]
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

/// Sanitized list-query intent. Every field is either defaulted or validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationRequest {
    pub page: u64,
    pub limit: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub sort_by: String,
    pub sort_order: SortOrder,
}

impl Default for PaginationRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: None,
            sort_by: DEFAULT_SORT_FIELD.to_string(),
            sort_order: SortOrder::Descending,
        }
    }
}

/// Reads the leading base-10 integer of `raw`, ignoring whatever follows it,
/// so `"2abc"` is 2 and `"20.5"` is 20.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    let value = rest[..end].parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

fn parse_positive(raw: Option<&String>) -> Option<u64> {
    raw.and_then(|s| parse_leading_int(s))
        .filter(|n| *n > 0)
        .and_then(|n| u64::try_from(n).ok())
}

impl PaginationRequest {
    /// Builds a bounded request from raw query parameters.
    #[must_use]
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        let defaults = Self::default();

        let page = parse_positive(query.get("page")).unwrap_or(defaults.page);

        let limit = parse_positive(query.get("limit"))
            .filter(|n| *n <= MAX_LIMIT)
            .unwrap_or(defaults.limit);

        let search = query
            .get("search")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let sort_by = query
            .get("sortBy")
            .filter(|s| !s.is_empty())
            .cloned()
            .unwrap_or(defaults.sort_by);

        let sort_order = match query.get("sortOrder").map(String::as_str) {
            Some("asc") => SortOrder::Ascending,
            Some("desc") => SortOrder::Descending,
            _ => defaults.sort_order,
        };

        Self {
            page,
            limit,
            search,
            sort_by,
            sort_order,
        }
    }

    /// Number of records to skip for the requested page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Renders the request back into raw query parameters.
    #[must_use]
    pub fn to_query(&self) -> HashMap<String, String> {
        let mut query = HashMap::from([
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
            ("sortBy".to_string(), self.sort_by.clone()),
            ("sortOrder".to_string(), self.sort_order.as_str().to_string()),
        ]);
        if let Some(search) = &self.search {
            query.insert("search".to_string(), search.clone());
        }
        query
    }
}

impl<S> FromRequestParts<S> for PaginationRequest
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map(|Query(query)| query)
            .unwrap_or_default();

        Ok(Self::from_query(&query))
    }
}

/// Metadata describing where a page sits in the full result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u64,
    pub limit: u64,
    /// Total number of matching records across all pages
    pub total: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl PaginationMeta {
    /// Derives page counts and navigation flags from `total`.
    #[must_use]
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }
}

/// Envelope returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, meta: PaginationMeta) -> Self {
        Self {
            data,
            meta,
            success: true,
            message: None,
        }
    }
}

/// Envelope for every non-list payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: Some("Request successful".to_string()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_query_yields_defaults() {
        let request = PaginationRequest::from_query(&HashMap::new());
        assert_eq!(request, PaginationRequest::default());
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, 10);
        assert_eq!(request.search, None);
        assert_eq!(request.sort_by, "createdAt");
        assert_eq!(request.sort_order, SortOrder::Descending);
    }

    #[test]
    fn test_page_boundary_cases() {
        let test_cases = vec![
            ("1", 1),
            ("2", 2),
            (" 7 ", 7),
            ("0", 1),
            ("-5", 1),
            ("abc", 1),
            ("", 1),
            ("2.5", 2),
            ("2abc", 2),
            ("+3", 3),
            ("- 3", 1),
            ("abc2", 1),
            ("99999999999999999999999", 1),
        ];

        for (input, expected) in test_cases {
            let request = PaginationRequest::from_query(&query(&[("page", input)]));
            assert_eq!(request.page, expected, "page={input:?}");
        }
    }

    #[test]
    fn test_limit_boundary_cases() {
        let test_cases = vec![
            ("1", 1),
            ("50", 50),
            ("100", 100),
            ("101", 10),
            ("0", 10),
            ("-1", 10),
            ("abc", 10),
            ("", 10),
            ("20.5", 20),
            ("15items", 15),
            ("101.5", 10),
        ];

        for (input, expected) in test_cases {
            let request = PaginationRequest::from_query(&query(&[("limit", input)]));
            assert_eq!(request.limit, expected, "limit={input:?}");
        }
    }

    #[test]
    fn test_search_is_trimmed_and_blank_dropped() {
        let request = PaginationRequest::from_query(&query(&[("search", "  ada  ")]));
        assert_eq!(request.search.as_deref(), Some("ada"));

        let request = PaginationRequest::from_query(&query(&[("search", "   ")]));
        assert_eq!(request.search, None);

        let request = PaginationRequest::from_query(&query(&[("search", "")]));
        assert_eq!(request.search, None);
    }

    #[test]
    fn test_sort_by_kept_verbatim_unless_empty() {
        let request = PaginationRequest::from_query(&query(&[("sortBy", "email")]));
        assert_eq!(request.sort_by, "email");

        let request = PaginationRequest::from_query(&query(&[("sortBy", "")]));
        assert_eq!(request.sort_by, DEFAULT_SORT_FIELD);
    }

    #[test]
    fn test_sort_order_cases() {
        let test_cases = vec![
            ("asc", SortOrder::Ascending),
            ("desc", SortOrder::Descending),
            ("xyz", SortOrder::Descending),
            ("ASC", SortOrder::Descending),
            ("", SortOrder::Descending),
        ];

        for (input, expected) in test_cases {
            let request = PaginationRequest::from_query(&query(&[("sortOrder", input)]));
            assert_eq!(request.sort_order, expected, "sortOrder={input:?}");
        }
    }

    #[test]
    fn test_fields_are_independent() {
        let request = PaginationRequest::from_query(&query(&[
            ("page", "abc"),
            ("limit", "25"),
            ("sortOrder", "asc"),
        ]));
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, 25);
        assert_eq!(request.sort_order, SortOrder::Ascending);
    }

    #[test]
    fn test_parsing_normalized_query_is_a_fixed_point() {
        let inputs = vec![
            query(&[]),
            query(&[("page", "-3"), ("limit", "500"), ("sortOrder", "up")]),
            query(&[
                ("page", "4"),
                ("limit", "20"),
                ("search", "  smith "),
                ("sortBy", "lastName"),
                ("sortOrder", "asc"),
            ]),
        ];

        for input in inputs {
            let once = PaginationRequest::from_query(&input);
            let twice = PaginationRequest::from_query(&once.to_query());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_offset() {
        let mut request = PaginationRequest::default();
        assert_eq!(request.offset(), 0);

        request.page = 3;
        request.limit = 10;
        assert_eq!(request.offset(), 20);

        request.page = u64::MAX;
        request.limit = 100;
        assert_eq!(request.offset(), u64::MAX);
    }

    #[test]
    fn test_meta_middle_page() {
        let meta = PaginationMeta::new(2, 10, 25);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next_page);
        assert!(meta.has_prev_page);
    }

    #[test]
    fn test_meta_last_page() {
        let meta = PaginationMeta::new(3, 10, 25);
        assert_eq!(meta.total_pages, 3);
        assert!(!meta.has_next_page);
        assert!(meta.has_prev_page);
    }

    #[test]
    fn test_meta_zero_total() {
        let meta = PaginationMeta::new(1, 10, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next_page);
        assert!(!meta.has_prev_page);
    }

    #[test]
    fn test_meta_exact_multiple() {
        let meta = PaginationMeta::new(1, 10, 20);
        assert_eq!(meta.total_pages, 2);
        assert!(meta.has_next_page);
    }

    #[test]
    fn test_meta_serializes_camel_case() {
        let serialized = serde_json::to_string(&PaginationMeta::new(2, 10, 25)).unwrap();
        assert!(serialized.contains(r#""totalPages":3"#));
        assert!(serialized.contains(r#""hasNextPage":true"#));
        assert!(serialized.contains(r#""hasPrevPage":true"#));
    }

    #[test]
    fn test_paginated_response_envelope() {
        let response = PaginatedResponse::new(vec![1, 2, 3], PaginationMeta::new(1, 3, 3));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"].as_array().unwrap().len(), 3);
        assert!(value.get("message").is_none());
    }

    #[test]
    fn test_api_response_envelope() {
        let value = serde_json::to_value(ApiResponse::ok("hello")).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"], "hello");
        assert_eq!(value["message"], "Request successful");
    }

    #[tokio::test]
    async fn test_extractor_never_rejects() {
        let request = axum::http::Request::builder()
            .uri("/api/users?page=%ZZ&limit=5&sortOrder=asc")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let Ok(parsed) = PaginationRequest::from_request_parts(&mut parts, &()).await;
        assert_eq!(parsed.page, DEFAULT_PAGE);
        assert_eq!(parsed.limit, 5);
        assert_eq!(parsed.sort_order, SortOrder::Ascending);
    }
}
