use async_trait::async_trait;
use rampart_auth::AccountLookup;
use rampart_core::AppError;
use rampart_models::{UpdateUserDto, User};
use uuid::Uuid;

use crate::collection::DocumentCollection;

/// Everything the API needs from the user record store.
#[async_trait]
pub trait UserRepository: DocumentCollection<User> + AccountLookup {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Exact, case-sensitive point lookup. Kept on the store contract for
    /// callers outside the HTTP surface; no route uses it.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Applies `dto` and returns the updated user, or `None` if no user has `id`.
    async fn update(&self, id: Uuid, dto: &UpdateUserDto) -> Result<Option<User>, AppError>;

    /// Returns `false` if no user has `id`.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}
