//! Principal resolution: bearer credential in, authenticated identity out.
//!
//! Resolution is all-or-nothing. A [`Principal`] is only produced when the
//! token verifies, its subject names an existing account, that account is
//! active, and the role in the token agrees with the stored role. Every other
//! outcome is an [`AuthFailure`]; the reason is kept for logs but callers are
//! expected to collapse it into a single generic rejection.

use async_trait::async_trait;
use uuid::Uuid;

use rampart_config::JwtConfig;
use rampart_core::{AppError, Role};

use crate::jwt::verify_token;

/// The authenticated identity of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
}

/// What the user record store knows about an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountStatus {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
}

/// Point lookup into the user record store, consumed by the resolver.
#[async_trait]
pub trait AccountLookup: Send + Sync {
    async fn find_account(&self, id: Uuid) -> Result<Option<AccountStatus>, AppError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthFailure {
    #[error("token signature, format or expiry invalid")]
    InvalidToken,
    #[error("token subject is not a valid identifier")]
    InvalidSubject,
    #[error("token names a role outside the enumeration")]
    UnknownRole,
    #[error("account does not exist")]
    AccountNotFound,
    #[error("account is inactive")]
    AccountInactive,
    #[error("token role does not match the stored role")]
    RoleMismatch,
    #[error("account lookup failed")]
    LookupFailed,
}

#[derive(Clone, Debug)]
pub struct PrincipalResolver {
    jwt_config: JwtConfig,
}

impl PrincipalResolver {
    pub fn new(jwt_config: JwtConfig) -> Self {
        Self { jwt_config }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    /// Verifies `credential` and confirms the account behind it.
    pub async fn resolve<A>(&self, credential: &str, accounts: &A) -> Result<Principal, AuthFailure>
    where
        A: AccountLookup + ?Sized,
    {
        let claims =
            verify_token(credential, &self.jwt_config).map_err(|_| AuthFailure::InvalidToken)?;

        let id = Uuid::parse_str(&claims.sub).map_err(|_| AuthFailure::InvalidSubject)?;
        let claimed_role: Role = claims.role.parse().map_err(|_| AuthFailure::UnknownRole)?;

        let account = match accounts.find_account(id).await {
            Ok(Some(account)) => account,
            Ok(None) => return Err(AuthFailure::AccountNotFound),
            Err(e) => {
                tracing::warn!(user.id = %id, error = %e.error, "Account lookup failed during authentication");
                return Err(AuthFailure::LookupFailed);
            }
        };

        if !account.is_active {
            return Err(AuthFailure::AccountInactive);
        }

        if account.role != claimed_role {
            return Err(AuthFailure::RoleMismatch);
        }

        Ok(Principal {
            id: account.id,
            email: account.email,
            role: account.role,
            is_active: account.is_active,
        })
    }
}
