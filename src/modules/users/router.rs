use crate::modules::users::controller::{delete_user, get_me, get_user, list_users, update_user};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/me", get(get_me))
        .route("/{id}", get(get_user).patch(update_user).delete(delete_user))
}
