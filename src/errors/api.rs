use poem_openapi::{payload::Json, ApiResponse, Object};
use sea_orm::DbErr;
use std::fmt;

/// Standardized error response body
#[derive(Object, Debug)]
pub struct ErrorBody {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Error taxonomy for every portal endpoint.
///
/// Unauthenticated -> 401, Forbidden -> 403, NotFound -> 404,
/// InvalidOperation -> 400, StorageFailure -> 500. Storage errors are logged
/// and never expose internals to the caller.
#[derive(ApiResponse, Debug)]
pub enum PortalError {
    /// Request is invalid (e.g. self role-change, duplicate email)
    #[oai(status = 400)]
    InvalidOperation(Json<ErrorBody>),

    /// Missing, invalid or expired credentials
    #[oai(status = 401)]
    Unauthenticated(Json<ErrorBody>),

    /// Valid credentials, disallowed action
    #[oai(status = 403)]
    Forbidden(Json<ErrorBody>),

    /// Referenced entity does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorBody>),

    /// Underlying persistence failure
    #[oai(status = 500)]
    StorageFailure(Json<ErrorBody>),
}

impl PortalError {
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        PortalError::InvalidOperation(Json(ErrorBody {
            error: "invalid_operation".to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    pub fn self_role_change() -> Self {
        PortalError::InvalidOperation(Json(ErrorBody {
            error: "self_role_change".to_string(),
            message: "Cannot change your own role".to_string(),
            status_code: 400,
        }))
    }

    pub fn duplicate_email() -> Self {
        PortalError::InvalidOperation(Json(ErrorBody {
            error: "duplicate_email".to_string(),
            message: "Email already registered".to_string(),
            status_code: 400,
        }))
    }

    pub fn invalid_credentials() -> Self {
        PortalError::Unauthenticated(Json(ErrorBody {
            error: "invalid_credentials".to_string(),
            message: "Invalid email or password".to_string(),
            status_code: 401,
        }))
    }

    pub fn invalid_token() -> Self {
        PortalError::Unauthenticated(Json(ErrorBody {
            error: "invalid_token".to_string(),
            message: "Invalid or malformed token".to_string(),
            status_code: 401,
        }))
    }

    pub fn expired_token() -> Self {
        PortalError::Unauthenticated(Json(ErrorBody {
            error: "expired_token".to_string(),
            message: "Token has expired".to_string(),
            status_code: 401,
        }))
    }

    pub fn forbidden() -> Self {
        PortalError::Forbidden(Json(ErrorBody {
            error: "forbidden".to_string(),
            message: "You are not allowed to perform this action".to_string(),
            status_code: 403,
        }))
    }

    pub fn not_found(entity: &str) -> Self {
        PortalError::NotFound(Json(ErrorBody {
            error: "not_found".to_string(),
            message: format!("{} not found", entity),
            status_code: 404,
        }))
    }

    pub fn storage() -> Self {
        PortalError::StorageFailure(Json(ErrorBody {
            error: "storage_failure".to_string(),
            message: "Internal server error".to_string(),
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            PortalError::InvalidOperation(json) => json.0.message.clone(),
            PortalError::Unauthenticated(json) => json.0.message.clone(),
            PortalError::Forbidden(json) => json.0.message.clone(),
            PortalError::NotFound(json) => json.0.message.clone(),
            PortalError::StorageFailure(json) => json.0.message.clone(),
        }
    }

    /// Get the machine-readable error code from the error variant
    pub fn code(&self) -> &str {
        match self {
            PortalError::InvalidOperation(json) => &json.0.error,
            PortalError::Unauthenticated(json) => &json.0.error,
            PortalError::Forbidden(json) => &json.0.error,
            PortalError::NotFound(json) => &json.0.error,
            PortalError::StorageFailure(json) => &json.0.error,
        }
    }
}

impl From<DbErr> for PortalError {
    fn from(err: DbErr) -> Self {
        tracing::error!(error = %err, "database operation failed");
        PortalError::storage()
    }
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
