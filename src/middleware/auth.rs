use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use rampart_auth::{AccountLookup, Principal, PrincipalResolver};
use rampart_core::AppError;
use tracing::debug;

use crate::middleware::policy::RoutePolicy;

/// Why the guard chain refused a request.
///
/// Messages are deliberately generic; the precise reason is only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Missing or malformed credential")]
    MissingCredential,
    #[error("Invalid or expired credential")]
    InvalidCredential,
    #[error("Insufficient role")]
    InsufficientRole,
    #[error("Access denied")]
    MisconfiguredRoute,
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingCredential | AuthError::InvalidCredential => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientRole | AuthError::MisconfiguredRoute => StatusCode::FORBIDDEN,
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::new(err.status(), err)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

/// Outcome of the authentication stage, handed to the role guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authentication {
    /// The route is public; no credential was examined.
    Exempt,
    Authenticated(Principal),
}

impl Authentication {
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Authentication::Exempt => None,
            Authentication::Authenticated(principal) => Some(principal),
        }
    }

    pub fn into_principal(self) -> Option<Principal> {
        match self {
            Authentication::Exempt => None,
            Authentication::Authenticated(principal) => Some(principal),
        }
    }
}

/// Extracts the token from `Authorization: Bearer <token>`.
///
/// The scheme is matched case-insensitively. Anything other than exactly one
/// non-empty token after the scheme yields `None`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return None;
    }
    Some(token)
}

/// First stage of the guard chain.
///
/// Public routes pass without looking at the request. Everything else needs a
/// bearer credential the resolver accepts.
pub async fn authenticate<A>(
    policy: &RoutePolicy,
    headers: &HeaderMap,
    resolver: &PrincipalResolver,
    accounts: &A,
) -> Result<Authentication, AuthError>
where
    A: AccountLookup + ?Sized,
{
    if policy.public {
        return Ok(Authentication::Exempt);
    }

    let token = bearer_token(headers).ok_or_else(|| {
        debug!("Rejected request without a usable bearer credential");
        AuthError::MissingCredential
    })?;

    let principal = resolver.resolve(token, accounts).await.map_err(|reason| {
        debug!(%reason, "Rejected bearer credential");
        AuthError::InvalidCredential
    })?;

    Ok(Authentication::Authenticated(principal))
}

/// The caller's principal, as established by the guard chain.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(AuthUser)
            .ok_or(AuthError::MissingCredential)
    }
}
