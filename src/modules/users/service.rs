use anyhow::anyhow;
use rampart_core::{AppError, Filter, PaginatedResponse, PaginationRequest, Role};
use rampart_db::{UserRepository, paginate};
use rampart_models::{UpdateUserDto, User};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::extract::blank_as_none;

/// Optional exact-match constraints on the user list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListFilter {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub role: Option<Role>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub is_active: Option<bool>,
}

impl UserListFilter {
    pub fn to_filter(&self) -> Filter {
        let mut filter = Filter::All;
        if let Some(role) = self.role {
            filter = filter.and(Filter::eq("role", role.as_str()));
        }
        if let Some(is_active) = self.is_active {
            filter = filter.and(Filter::eq("isActive", is_active));
        }
        filter
    }
}

fn user_not_found(id: Uuid) -> AppError {
    AppError::not_found(anyhow!("User with ID {id} not found"))
}

pub struct UserService;

impl UserService {
    #[instrument(skip(users))]
    pub async fn list_users(
        users: &dyn UserRepository,
        request: &PaginationRequest,
        filter: &UserListFilter,
    ) -> Result<PaginatedResponse<User>, AppError> {
        paginate(users, request, filter.to_filter(), &[]).await
    }

    #[instrument(skip(users))]
    pub async fn get_user(users: &dyn UserRepository, id: Uuid) -> Result<User, AppError> {
        users.find_by_id(id).await?.ok_or_else(|| user_not_found(id))
    }

    #[instrument(skip(users, dto))]
    pub async fn update_user(
        users: &dyn UserRepository,
        id: Uuid,
        dto: &UpdateUserDto,
    ) -> Result<User, AppError> {
        if dto.is_empty() {
            return Err(AppError::bad_request(anyhow!("No fields to update")));
        }

        let user = users
            .update(id, dto)
            .await?
            .ok_or_else(|| user_not_found(id))?;

        info!(user.id = %user.id, "User updated");
        Ok(user)
    }

    #[instrument(skip(users))]
    pub async fn delete_user(users: &dyn UserRepository, id: Uuid) -> Result<(), AppError> {
        if !users.delete(id).await? {
            return Err(user_not_found(id));
        }

        info!(user.id = %id, "User deleted");
        Ok(())
    }
}
