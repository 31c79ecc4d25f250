//! Request guards.
//!
//! Every request passes through [`guard::guard_chain`], which looks up the
//! route's [`policy::RoutePolicy`] and then runs two stages in order:
//!
//! 1. [`auth::authenticate`]: public routes pass untouched; any other route
//!    needs a bearer token the principal resolver accepts (401 otherwise).
//! 2. [`role::authorize`]: routes declaring roles admit only principals
//!    holding one of them (403 otherwise).
//!
//! Handlers read the caller through the [`auth::AuthUser`] extractor.
//!
//! ```ignore
//! let policies = RoutePolicies::builder()
//!     .public(Method::GET, "/health")
//!     .require_roles(Method::DELETE, "/api/users/{id}", [Role::Admin])
//!     .build()?;
//! ```

pub mod auth;
pub mod guard;
pub mod policy;
pub mod role;
