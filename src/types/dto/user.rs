use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::user::Role;

/// User projection returned by the API. Never carries the password hash.
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    /// User ID (UUID)
    pub id: String,

    /// Email address
    pub email: String,

    /// Display name
    pub name: String,

    /// Role governing permitted actions
    pub role: Role,

    /// Optional department
    pub department: Option<String>,

    /// Creation time (Unix timestamp)
    pub created_at: i64,
}

impl From<crate::types::db::user::Model> for UserDto {
    fn from(u: crate::types::db::user::Model) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            role: u.role,
            department: u.department,
            created_at: u.created_at,
        }
    }
}

/// Request model for changing a user's role
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateRoleRequest {
    /// New role for the target user
    pub role: Role,
}
