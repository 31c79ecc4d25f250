//! # Rampart Auth
//!
//! Credential verification for the Rampart API.
//!
//! - [`claims`]: JWT claim structure carried by access tokens
//! - [`jwt`]: Token creation and verification
//! - [`principal`]: Turning a verified token into an authenticated [`Principal`]
//!
//! # Example
//!
//! ```ignore
//! use rampart_auth::{PrincipalResolver, create_access_token};
//!
//! let resolver = PrincipalResolver::new(JwtConfig::from_env());
//! let principal = resolver.resolve(&token, accounts.as_ref()).await?;
//! println!("{} is a {}", principal.id, principal.role);
//! ```

pub mod claims;
pub mod jwt;
pub mod principal;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, encode_claims, verify_token};
pub use principal::{AccountLookup, AccountStatus, AuthFailure, Principal, PrincipalResolver};
