//! Query execution for paginated list endpoints.
//!
//! [`paginate`] turns a sanitized [`PaginationRequest`] plus a base filter
//! into one page of documents and the metadata describing it. The page fetch
//! and the total count are independent reads issued concurrently; no
//! snapshot spans them, so a write landing between the two can leave `total`
//! one step ahead of or behind the returned page.

use rampart_core::{AppError, Filter, PaginatedResponse, PaginationMeta, PaginationRequest};
use tracing::{debug, instrument};

use crate::collection::{DocumentCollection, FindQuery, Searchable, SortSpec};

/// OR-group of case-insensitive substring matches over `T`'s searchable fields.
pub fn search_filter<T: Searchable>(term: &str) -> Filter {
    Filter::Or(
        T::SEARCH_FIELDS
            .iter()
            .map(|field| Filter::contains(*field, term))
            .collect(),
    )
}

/// Builds the read for `request` on top of `base_filter`.
///
/// The search group is ANDed with the base filter, so every constraint of the
/// base filter stays mandatory.
pub fn build_find_query<T: Searchable>(
    request: &PaginationRequest,
    base_filter: Filter,
    expand: &[&str],
) -> FindQuery {
    let filter = match &request.search {
        Some(term) => base_filter.and(search_filter::<T>(term)),
        None => base_filter,
    };

    FindQuery {
        filter,
        sort: SortSpec {
            field: request.sort_by.clone(),
            order: request.sort_order,
        },
        skip: request.offset(),
        limit: request.limit,
        expand: expand.iter().map(|s| s.to_string()).collect(),
    }
}

/// Executes a paginated list query against `collection`.
///
/// # Errors
///
/// Any store failure from either read is returned as-is; nothing is retried.
#[instrument(skip(collection, base_filter, expand), fields(page = request.page, limit = request.limit))]
pub async fn paginate<T, C>(
    collection: &C,
    request: &PaginationRequest,
    base_filter: Filter,
    expand: &[&str],
) -> Result<PaginatedResponse<T>, AppError>
where
    T: Searchable + Send,
    C: DocumentCollection<T> + ?Sized,
{
    let query = build_find_query::<T>(request, base_filter, expand);

    let (data, total) = tokio::try_join!(collection.find(&query), collection.count(&query.filter))?;

    let meta = PaginationMeta::new(request.page, request.limit, total);

    debug!(
        total = %total,
        returned = %data.len(),
        has_next_page = %meta.has_next_page,
        "Page fetched"
    );

    Ok(PaginatedResponse::new(data, meta))
}
