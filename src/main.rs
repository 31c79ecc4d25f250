use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use rampart::logging::init_tracing;
use rampart::router::{init_router, route_policies};
use rampart::state::AppState;
use rampart_config::{CorsConfig, JwtConfig, ServerConfig};
use rampart_db::{PgUserCollection, init_db_pool};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing().context("Failed to create log directory")?;

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let policies = route_policies().context("Invalid route policy table")?;
    let state = AppState::new(
        Arc::new(PgUserCollection::new(pool)),
        JwtConfig::from_env(),
        CorsConfig::from_env(),
        policies,
    );
    let app = init_router(state);

    let server = ServerConfig::from_env();
    let address = server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!(address = %address, "Server running");
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
