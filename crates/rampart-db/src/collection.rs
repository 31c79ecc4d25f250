//! The document collection seam.
//!
//! The pagination engine only needs two reads from a store: a bounded,
//! sorted fetch and an unbounded count over the same filter. Any backend
//! implementing [`DocumentCollection`] can serve list endpoints.

use async_trait::async_trait;
use rampart_core::{AppError, Filter, SortOrder};

/// Sort key and direction, using the document's public field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

/// A fully built read: filter, sort, window, and relation expansions.
#[derive(Debug, Clone, PartialEq)]
pub struct FindQuery {
    pub filter: Filter,
    pub sort: SortSpec,
    pub skip: u64,
    pub limit: u64,
    /// Related documents to populate on each result. Backends without
    /// relations ignore this.
    pub expand: Vec<String>,
}

#[async_trait]
pub trait DocumentCollection<T>: Send + Sync {
    /// Fetches up to `query.limit` documents matching `query.filter`,
    /// ordered by `query.sort`, after skipping `query.skip`.
    async fn find(&self, query: &FindQuery) -> Result<Vec<T>, AppError>;

    /// Counts every document matching `filter`.
    async fn count(&self, filter: &Filter) -> Result<u64, AppError>;
}

/// Documents that support free-text search.
pub trait Searchable {
    /// Text fields a `search` term is matched against, case-insensitively.
    const SEARCH_FIELDS: &'static [&'static str];
}

impl Searchable for rampart_models::User {
    const SEARCH_FIELDS: &'static [&'static str] = &rampart_models::SEARCHABLE_FIELDS;
}
