use crate::modules::health::controller::{get_health, get_status};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_health_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_status))
        .route("/health", get(get_health))
}
