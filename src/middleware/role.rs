//! Role-based authorization, the second stage of the guard chain.

use tracing::{debug, error};

use crate::middleware::auth::{AuthError, Authentication};
use crate::middleware::policy::RoutePolicy;

/// Allows the request iff the route declares no roles or the authenticated
/// principal holds one of them.
///
/// A role-restricted route that skipped authentication has no principal to
/// check. That is a broken route table, and the request is refused.
pub fn authorize(policy: &RoutePolicy, authentication: &Authentication) -> Result<(), AuthError> {
    if policy.roles.is_empty() {
        return Ok(());
    }

    let Some(principal) = authentication.principal() else {
        error!("Role-restricted route reached the role guard without a principal");
        return Err(AuthError::MisconfiguredRoute);
    };

    if policy.roles.contains(&principal.role) {
        Ok(())
    } else {
        debug!(user.id = %principal.id, role = %principal.role, "Role not permitted on route");
        Err(AuthError::InsufficientRole)
    }
}
