use serde::{Deserialize, Serialize};

use crate::types::db::user::Role;

/// JWT claims embedded in every bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user ID (UUID)
    pub sub: String,
    /// Email of the authenticated user
    pub email: String,
    /// Role of the authenticated user at issue time
    pub role: Role,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}
