use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use super::user::UserDto;

/// Request model for account registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Email address, unique across the directory
    pub email: String,

    /// Plaintext password, hashed before storage
    pub password: String,

    /// Display name
    pub name: String,

    /// Optional department
    pub department: Option<String>,
}

/// Request model for user login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address used at registration
    pub email: String,

    /// Password for authentication
    pub password: String,
}

/// Response model for login and registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The authenticated user
    pub user: UserDto,

    /// Signed bearer token carrying id, email and role
    pub token: String,
}
