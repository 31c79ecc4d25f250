//! PostgreSQL user store.
//!
//! Filters and sorts arrive with public field names; they are mapped onto
//! columns through a fixed whitelist so no caller-supplied text is ever
//! spliced into SQL. Values always travel as bind parameters.

use anyhow::Context;
use async_trait::async_trait;
use rampart_auth::{AccountLookup, AccountStatus};
use rampart_core::{AppError, Filter, SortOrder};
use rampart_models::{UpdateUserDto, User};
use serde_json::Value;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::collection::{DocumentCollection, FindQuery};
use crate::users::UserRepository;

const USER_COLUMNS: &str =
    "id, email, first_name, last_name, role, is_active, last_login_at, created_at, updated_at";

const DEFAULT_SORT_COLUMN: &str = "created_at";

/// Maps a public field name to its column.
fn column_for(field: &str) -> Option<&'static str> {
    Some(match field {
        "id" => "id",
        "email" => "email",
        "firstName" => "first_name",
        "lastName" => "last_name",
        "role" => "role",
        "isActive" => "is_active",
        "lastLoginAt" => "last_login_at",
        "createdAt" => "created_at",
        "updatedAt" => "updated_at",
        _ => return None,
    })
}

fn unknown_field(field: &str) -> AppError {
    AppError::internal_error(format!("Cannot filter users on unknown field '{field}'"))
}

/// Escapes LIKE wildcards so the needle matches literally.
fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn push_group(
    qb: &mut QueryBuilder<'static, Postgres>,
    filters: &[Filter],
    joiner: &str,
    empty: &str,
) -> Result<(), AppError> {
    if filters.is_empty() {
        qb.push(empty);
        return Ok(());
    }
    qb.push("(");
    for (i, filter) in filters.iter().enumerate() {
        if i > 0 {
            qb.push(joiner);
        }
        push_filter(qb, filter)?;
    }
    qb.push(")");
    Ok(())
}

fn push_filter(qb: &mut QueryBuilder<'static, Postgres>, filter: &Filter) -> Result<(), AppError> {
    match filter {
        Filter::All => {
            qb.push("TRUE");
        }
        Filter::Eq(field, value) => {
            let column = column_for(field).ok_or_else(|| unknown_field(field))?;
            match value {
                Value::Null => {
                    qb.push(column).push(" IS NULL");
                }
                Value::Bool(b) => {
                    qb.push(column).push(" = ").push_bind(*b);
                }
                Value::String(s) => {
                    qb.push(column).push("::text = ").push_bind(s.clone());
                }
                Value::Number(n) => match n.as_i64() {
                    Some(i) => {
                        qb.push(column).push(" = ").push_bind(i);
                    }
                    None => {
                        return Err(AppError::internal_error(format!(
                            "Unsupported numeric filter on '{field}'"
                        )));
                    }
                },
                Value::Array(_) | Value::Object(_) => {
                    return Err(AppError::internal_error(format!(
                        "Unsupported filter value on '{field}'"
                    )));
                }
            }
        }
        Filter::Contains(field, needle) => {
            let column = column_for(field).ok_or_else(|| unknown_field(field))?;
            qb.push(column)
                .push("::text ILIKE ")
                .push_bind(like_pattern(needle))
                .push(" ESCAPE '\\'");
        }
        Filter::And(filters) => push_group(qb, filters, " AND ", "TRUE")?,
        Filter::Or(filters) => push_group(qb, filters, " OR ", "FALSE")?,
    }
    Ok(())
}

fn to_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn find_sql(query: &FindQuery) -> Result<QueryBuilder<'static, Postgres>, AppError> {
    let mut qb = QueryBuilder::new(format!("SELECT {USER_COLUMNS} FROM users WHERE "));
    push_filter(&mut qb, &query.filter)?;

    let sort_column = column_for(&query.sort.field).unwrap_or_else(|| {
        warn!(field = %query.sort.field, "Unknown sort field, using created_at");
        DEFAULT_SORT_COLUMN
    });
    let direction = match query.sort.order {
        SortOrder::Ascending => "ASC",
        SortOrder::Descending => "DESC",
    };
    // id breaks ties so pages never overlap
    qb.push(format!(" ORDER BY {sort_column} {direction}, id {direction}"));
    qb.push(" LIMIT ").push_bind(to_i64(query.limit));
    qb.push(" OFFSET ").push_bind(to_i64(query.skip));
    Ok(qb)
}

fn count_sql(filter: &Filter) -> Result<QueryBuilder<'static, Postgres>, AppError> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM users WHERE ");
    push_filter(&mut qb, filter)?;
    Ok(qb)
}

fn update_sql(id: Uuid, dto: &UpdateUserDto) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("UPDATE users SET ");
    let mut set = qb.separated(", ");
    if let Some(email) = &dto.email {
        set.push("email = ").push_bind_unseparated(email.clone());
    }
    if let Some(first_name) = &dto.first_name {
        set.push("first_name = ").push_bind_unseparated(first_name.clone());
    }
    if let Some(last_name) = &dto.last_name {
        set.push("last_name = ").push_bind_unseparated(last_name.clone());
    }
    if let Some(role) = dto.role {
        set.push("role = ").push_bind_unseparated(role.as_str().to_string());
    }
    if let Some(is_active) = dto.is_active {
        set.push("is_active = ").push_bind_unseparated(is_active);
    }
    set.push("updated_at = NOW()");
    qb.push(" WHERE id = ").push_bind(id);
    qb.push(format!(" RETURNING {USER_COLUMNS}"));
    qb
}

#[derive(Clone, Debug)]
pub struct PgUserCollection {
    pool: PgPool,
}

impl PgUserCollection {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentCollection<User> for PgUserCollection {
    #[instrument(skip(self))]
    async fn find(&self, query: &FindQuery) -> Result<Vec<User>, AppError> {
        let mut qb = find_sql(query)?;
        qb.build_query_as::<User>()
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch users")
            .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &Filter) -> Result<u64, AppError> {
        let mut qb = count_sql(filter)?;
        let total: i64 = qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .context("Failed to count users")
            .map_err(AppError::database)?;
        Ok(u64::try_from(total).unwrap_or(0))
    }
}

#[async_trait]
impl AccountLookup for PgUserCollection {
    async fn find_account(&self, id: Uuid) -> Result<Option<AccountStatus>, AppError> {
        Ok(self.find_by_id(id).await?.map(|user| AccountStatus {
            id: user.id,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
        }))
    }
}

#[async_trait]
impl UserRepository for PgUserCollection {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::database)
    }

    #[instrument(skip(self, dto))]
    async fn update(&self, id: Uuid, dto: &UpdateUserDto) -> Result<Option<User>, AppError> {
        let mut qb = update_sql(id, dto);
        qb.build_query_as::<User>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_unique_violation()
                {
                    return AppError::bad_request(anyhow::anyhow!("Email already in use"));
                }
                AppError::database(e)
            })
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::database)?;
        Ok(result.rows_affected() > 0)
    }
}
