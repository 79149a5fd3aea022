use serde::{Deserialize, Serialize};

/// Verified claims carried by a bearer token.
///
/// Token issuance lives with the identity provider; this service only
/// validates signatures and trusts the resulting claims.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub exp: usize,
    pub admin: bool,
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);
