use axum::{Json, extract::State};
use rampart_core::{ApiResponse, AppError, PaginatedResponse, PaginationRequest};
use rampart_models::{UpdateUserDto, User};
use tracing::instrument;
use uuid::Uuid;

use crate::extract::{PathParam, QueryParams};
use crate::middleware::auth::AuthUser;
use crate::modules::users::service::{UserListFilter, UserService};
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// `GET /api/users?page=&limit=&search=&sortBy=&sortOrder=&role=&isActive=`
#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    pagination: PaginationRequest,
    QueryParams(filter): QueryParams<UserListFilter>,
) -> Result<Json<PaginatedResponse<User>>, AppError> {
    let page = UserService::list_users(state.users.as_ref(), &pagination, &filter).await?;
    Ok(Json(page))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = UserService::get_user(state.users.as_ref(), principal.id).await?;
    Ok(Json(ApiResponse::ok(user)))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = UserService::get_user(state.users.as_ref(), id).await?;
    Ok(Json(ApiResponse::ok(user)))
}

#[instrument(skip(state, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = UserService::update_user(state.users.as_ref(), id, &dto).await?;
    Ok(Json(ApiResponse::ok(user)))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    UserService::delete_user(state.users.as_ref(), id).await?;
    Ok(Json(ApiResponse::message("User deleted successfully")))
}
