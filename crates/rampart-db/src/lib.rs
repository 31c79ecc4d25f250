//! Storage for the Rampart API.
//!
//! [`DocumentCollection`] is the seam list endpoints read through, and
//! [`paginate`] is the engine that drives it. Two backends implement it:
//! [`PgUserCollection`] on PostgreSQL and [`MemoryCollection`] in process.

pub mod collection;
pub mod memory;
pub mod paginate;
pub mod postgres;
pub mod users;

pub use collection::{DocumentCollection, FindQuery, Searchable, SortSpec};
pub use memory::MemoryCollection;
pub use paginate::{build_find_query, paginate, search_filter};
pub use postgres::PgUserCollection;
pub use users::UserRepository;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

const MAX_CONNECTIONS: u32 = 10;

/// Connects a PostgreSQL pool to `database_url`.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await?;
    info!(max_connections = MAX_CONNECTIONS, "Database pool ready");
    Ok(pool)
}
