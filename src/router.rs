use crate::logging::logging_middleware;
use crate::middleware::guard::guard_chain;
use crate::middleware::policy::{PolicyError, RoutePolicies};
use crate::modules::health::router::init_health_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use rampart_core::Role;
use tower_http::cors::CorsLayer;

/// Authorization requirements for every route in [`init_router`].
pub fn route_policies() -> Result<RoutePolicies, PolicyError> {
    let staff = [Role::Admin, Role::Moderator];

    RoutePolicies::builder()
        .public(Method::GET, "/")
        .public(Method::GET, "/health")
        .require_roles(Method::GET, "/api/users", staff)
        .authenticated(Method::GET, "/api/users/me")
        .require_roles(Method::GET, "/api/users/{id}", staff)
        .require_roles(Method::PATCH, "/api/users/{id}", [Role::Admin])
        .require_roles(Method::DELETE, "/api/users/{id}", [Role::Admin])
        .build()
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(init_health_router())
        .nest("/api", Router::new().nest("/users", init_users_router()))
        .route_layer(middleware::from_fn_with_state(state.clone(), guard_chain))
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(logging_middleware))
}
