//! In-process document collection.
//!
//! Documents are evaluated through their serde representation, so filters
//! and sort keys use the same public field names as every other backend.
//! Collection queries (`find`/`count`) and point lookups are counted
//! separately, and collection queries can be made to fail. Together that
//! lets the guard chain and the pagination engine be exercised without a
//! database.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering as AtomicOrdering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rampart_auth::{AccountLookup, AccountStatus};
use rampart_core::{AppError, Filter, SortOrder};
use rampart_models::{UpdateUserDto, User};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::collection::{DocumentCollection, FindQuery};
use crate::users::UserRepository;

pub struct MemoryCollection<T> {
    docs: RwLock<Vec<T>>,
    queries: AtomicUsize,
    lookups: AtomicUsize,
    queries_failing: AtomicBool,
}

impl<T> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> MemoryCollection<T> {
    pub fn new(docs: Vec<T>) -> Self {
        Self {
            docs: RwLock::new(docs),
            queries: AtomicUsize::new(0),
            lookups: AtomicUsize::new(0),
            queries_failing: AtomicBool::new(false),
        }
    }

    pub async fn insert(&self, doc: T) {
        self.docs.write().await.push(doc);
    }

    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }

    /// Number of `find` and `count` calls served so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(AtomicOrdering::SeqCst)
    }

    /// Number of point lookups and writes served so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(AtomicOrdering::SeqCst)
    }

    /// While set, `find` and `count` fail as an unreachable store would.
    /// Point lookups keep working.
    pub fn set_queries_failing(&self, failing: bool) {
        self.queries_failing.store(failing, AtomicOrdering::SeqCst);
    }

    fn begin_query(&self) -> Result<(), AppError> {
        self.queries.fetch_add(1, AtomicOrdering::SeqCst);
        if self.queries_failing.load(AtomicOrdering::SeqCst) {
            return Err(AppError::database(anyhow::anyhow!(
                "memory collection unavailable"
            )));
        }
        Ok(())
    }

    fn begin_lookup(&self) {
        self.lookups.fetch_add(1, AtomicOrdering::SeqCst);
    }
}

fn to_value<T: Serialize>(doc: &T) -> Result<Value, AppError> {
    serde_json::to_value(doc).map_err(AppError::internal)
}

fn as_datetime(value: &Value) -> Option<DateTime<Utc>> {
    value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Orders two field values. Missing and null sort first; values of different
/// kinds fall back to comparing their JSON text.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        (Some(a), Some(b)) => match (a, b) {
            (Value::Number(x), Value::Number(y)) => x
                .as_f64()
                .partial_cmp(&y.as_f64())
                .unwrap_or(Ordering::Equal),
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            (Value::String(x), Value::String(y)) => match (as_datetime(a), as_datetime(b)) {
                (Some(x), Some(y)) => x.cmp(&y),
                _ => x.cmp(y),
            },
            _ => a.to_string().cmp(&b.to_string()),
        },
    }
}

#[async_trait]
impl<T> DocumentCollection<T> for MemoryCollection<T>
where
    T: Serialize + Clone + Send + Sync,
{
    async fn find(&self, query: &FindQuery) -> Result<Vec<T>, AppError> {
        self.begin_query()?;
        let docs = self.docs.read().await;

        let mut matched = Vec::new();
        for doc in docs.iter() {
            let value = to_value(doc)?;
            if query.filter.matches(&value) {
                matched.push((value, doc));
            }
        }

        matched.sort_by(|(a, _), (b, _)| {
            let ordering = compare_values(a.get(&query.sort.field), b.get(&query.sort.field));
            match query.sort.order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });

        let skip = usize::try_from(query.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);

        Ok(matched
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(|(_, doc)| doc.clone())
            .collect())
    }

    async fn count(&self, filter: &Filter) -> Result<u64, AppError> {
        self.begin_query()?;
        let docs = self.docs.read().await;

        let mut total = 0u64;
        for doc in docs.iter() {
            if filter.matches(&to_value(doc)?) {
                total += 1;
            }
        }
        Ok(total)
    }
}

#[async_trait]
impl AccountLookup for MemoryCollection<User> {
    async fn find_account(&self, id: Uuid) -> Result<Option<AccountStatus>, AppError> {
        self.begin_lookup();
        Ok(self
            .docs
            .read()
            .await
            .iter()
            .find(|user| user.id == id)
            .map(|user| AccountStatus {
                id: user.id,
                email: user.email.clone(),
                role: user.role,
                is_active: user.is_active,
            }))
    }
}

#[async_trait]
impl UserRepository for MemoryCollection<User> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        self.begin_lookup();
        Ok(self.docs.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.begin_lookup();
        Ok(self
            .docs
            .read()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn update(&self, id: Uuid, dto: &UpdateUserDto) -> Result<Option<User>, AppError> {
        self.begin_lookup();
        let mut docs = self.docs.write().await;

        if let Some(email) = &dto.email
            && docs.iter().any(|u| u.id != id && &u.email == email)
        {
            return Err(AppError::bad_request(anyhow::anyhow!("Email already in use")));
        }

        Ok(docs.iter_mut().find(|u| u.id == id).map(|user| {
            user.apply(dto);
            user.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        self.begin_lookup();
        let mut docs = self.docs.write().await;
        let before = docs.len();
        docs.retain(|u| u.id != id);
        Ok(docs.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use rampart_core::{PaginationRequest, Role};

    use super::*;
    use crate::collection::SortSpec;
    use crate::paginate::paginate;

    fn user(n: i64, first: &str, last: &str, email: &str, role: Role) -> User {
        let created = DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
            + Duration::seconds(n);
        User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            role,
            is_active: true,
            last_login_at: None,
            created_at: created,
            updated_at: created,
        }
    }

    /// 25 users created one second apart, numbered 1..=25.
    fn numbered_users() -> Vec<User> {
        (1..=25)
            .map(|n| {
                user(
                    n,
                    &format!("First{n:02}"),
                    &format!("Last{n:02}"),
                    &format!("user{n:02}@example.com"),
                    Role::User,
                )
            })
            .collect()
    }

    fn request(page: u64, limit: u64) -> PaginationRequest {
        PaginationRequest {
            page,
            limit,
            sort_order: SortOrder::Ascending,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_second_page_of_twenty_five() {
        let users = numbered_users();
        let collection = MemoryCollection::new(users.clone());

        let result = paginate(&collection, &request(2, 10), Filter::All, &[])
            .await
            .unwrap();

        assert_eq!(result.data, users[10..20].to_vec());
        assert_eq!(result.meta.page, 2);
        assert_eq!(result.meta.limit, 10);
        assert_eq!(result.meta.total, 25);
        assert_eq!(result.meta.total_pages, 3);
        assert!(result.meta.has_next_page);
        assert!(result.meta.has_prev_page);
    }

    #[tokio::test]
    async fn test_last_partial_page() {
        let collection = MemoryCollection::new(numbered_users());

        let result = paginate(&collection, &request(3, 10), Filter::All, &[])
            .await
            .unwrap();

        assert_eq!(result.data.len(), 5);
        assert_eq!(result.data[0].first_name, "First21");
        assert!(!result.meta.has_next_page);
        assert!(result.meta.has_prev_page);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty_with_consistent_meta() {
        let collection = MemoryCollection::new(numbered_users());

        let result = paginate(&collection, &request(9, 10), Filter::All, &[])
            .await
            .unwrap();

        assert!(result.data.is_empty());
        assert_eq!(result.meta.total, 25);
        assert!(!result.meta.has_next_page);
    }

    #[tokio::test]
    async fn test_default_sort_is_newest_first() {
        let collection = MemoryCollection::new(numbered_users());

        let result = paginate(
            &collection,
            &PaginationRequest::default(),
            Filter::All,
            &[],
        )
        .await
        .unwrap();

        assert_eq!(result.data[0].first_name, "First25");
        assert_eq!(result.data[9].first_name, "First16");
    }

    #[tokio::test]
    async fn test_search_matches_any_single_field() {
        let collection = MemoryCollection::new(vec![
            user(1, "Ada", "Lovelace", "countess@example.com", Role::User),
            user(2, "Grace", "Hopper", "grace@navy.example", Role::User),
            user(3, "Alan", "Turing", "alan@bletchley.example", Role::User),
        ]);

        let search = PaginationRequest {
            search: Some("NAVY".to_string()),
            ..Default::default()
        };
        let result = paginate(&collection, &search, Filter::All, &[]).await.unwrap();

        assert_eq!(result.meta.total, 1);
        assert_eq!(result.data[0].first_name, "Grace");
    }

    #[tokio::test]
    async fn test_search_never_escapes_base_filter() {
        let collection = MemoryCollection::new(vec![
            user(1, "Ada", "Lovelace", "ada@example.com", Role::Admin),
            user(2, "Adam", "Smith", "adam@example.com", Role::User),
            user(3, "Bob", "Adams", "bob@example.com", Role::User),
        ]);

        let search = PaginationRequest {
            search: Some("ada".to_string()),
            sort_by: "firstName".to_string(),
            sort_order: SortOrder::Ascending,
            ..Default::default()
        };
        let result = paginate(&collection, &search, Filter::eq("role", "user"), &[])
            .await
            .unwrap();

        let names: Vec<_> = result.data.iter().map(|u| u.first_name.as_str()).collect();
        assert_eq!(names, vec!["Adam", "Bob"]);
        assert_eq!(result.meta.total, 2);
    }

    #[tokio::test]
    async fn test_unavailable_store_propagates_failure() {
        let collection = MemoryCollection::new(numbered_users());
        collection.set_queries_failing(true);

        let err = paginate(&collection, &request(1, 10), Filter::All, &[])
            .await
            .unwrap_err();

        assert!(err.status.is_server_error());
    }

    #[tokio::test]
    async fn test_find_and_count_are_each_one_query() {
        let collection = MemoryCollection::new(numbered_users());
        paginate(&collection, &request(1, 5), Filter::All, &[])
            .await
            .unwrap();
        assert_eq!(collection.query_count(), 2);
        assert_eq!(collection.lookup_count(), 0);
    }

    #[tokio::test]
    async fn test_sort_by_unknown_field_keeps_insertion_order() {
        let users = numbered_users();
        let collection = MemoryCollection::new(users.clone());
        let query = FindQuery {
            filter: Filter::All,
            sort: SortSpec {
                field: "doesNotExist".to_string(),
                order: SortOrder::Descending,
            },
            skip: 0,
            limit: 3,
            expand: vec![],
        };

        let found = collection.find(&query).await.unwrap();
        assert_eq!(found, users[..3].to_vec());
    }

    #[tokio::test]
    async fn test_datetime_sort_ignores_fraction_width() {
        let early = user(0, "Early", "One", "early@example.com", Role::User);
        let mut late = user(0, "Late", "One", "late@example.com", Role::User);
        late.created_at = early.created_at + Duration::milliseconds(500);

        let collection = MemoryCollection::new(vec![late.clone(), early.clone()]);
        let found = collection
            .find(&FindQuery {
                filter: Filter::All,
                sort: SortSpec {
                    field: "createdAt".to_string(),
                    order: SortOrder::Ascending,
                },
                skip: 0,
                limit: 10,
                expand: vec![],
            })
            .await
            .unwrap();

        assert_eq!(found, vec![early, late]);
    }

    #[tokio::test]
    async fn test_user_repository_operations() {
        let users = numbered_users();
        let target = users[4].clone();
        let collection = MemoryCollection::new(users);

        assert_eq!(
            collection.find_by_id(target.id).await.unwrap(),
            Some(target.clone())
        );
        assert_eq!(
            collection.find_by_email(&target.email).await.unwrap(),
            Some(target.clone())
        );

        let updated = collection
            .update(
                target.id,
                &UpdateUserDto {
                    role: Some(Role::Moderator),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.role, Role::Moderator);

        let clash = collection
            .update(
                target.id,
                &UpdateUserDto {
                    email: Some("user01@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(clash.is_err());

        assert!(collection.delete(target.id).await.unwrap());
        assert!(!collection.delete(target.id).await.unwrap());
        assert_eq!(collection.len().await, 24);
        assert!(collection.update(target.id, &UpdateUserDto::default()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_account_lookup_reflects_stored_state() {
        let mut inactive = user(1, "In", "Active", "inactive@example.com", Role::Admin);
        inactive.is_active = false;
        let collection = MemoryCollection::new(vec![inactive.clone()]);

        let status = collection.find_account(inactive.id).await.unwrap().unwrap();
        assert_eq!(status.role, Role::Admin);
        assert!(!status.is_active);
        assert!(collection.find_account(Uuid::new_v4()).await.unwrap().is_none());
        assert_eq!(collection.lookup_count(), 2);
        assert_eq!(collection.query_count(), 0);
    }
}
