//! User document and request DTOs.
//!
//! Field names serialize in camelCase (`firstName`, `createdAt`, `isActive`)
//! because those names are the contract between list filters/sorts and the
//! store schema. The password hash and refresh token stored alongside a user
//! never appear on this type.

use chrono::{DateTime, Utc};
use rampart_core::Role;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Fields a free-text `search` is matched against.
pub const SEARCHABLE_FIELDS: [&str; 3] = ["firstName", "lastName", "email"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Applies a partial update and bumps `updated_at`.
    pub fn apply(&mut self, dto: &UpdateUserDto) {
        if let Some(email) = &dto.email {
            self.email = email.clone();
        }
        if let Some(first_name) = &dto.first_name {
            self.first_name = first_name.clone();
        }
        if let Some(last_name) = &dto.last_name {
            self.last_name = last_name.clone();
        }
        if let Some(role) = dto.role {
            self.role = role;
        }
        if let Some(is_active) = dto.is_active {
            self.is_active = is_active;
        }
        self.updated_at = Utc::now();
    }
}

/// Partial update of a user. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUserDto {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

impl UpdateUserDto {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.role.is_none()
            && self.is_active.is_none()
    }
}
