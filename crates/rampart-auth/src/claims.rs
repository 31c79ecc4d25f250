//! JWT claim structure for access tokens.

use serde::{Deserialize, Serialize};

/// Claims carried by an access token.
///
/// `role` is kept as a raw string so that a token naming a role outside the
/// enumeration still decodes and can be rejected explicitly by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub email: String,
    pub role: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}
