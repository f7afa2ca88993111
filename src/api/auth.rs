use poem_openapi::{auth::Bearer, payload::Json, OpenApi, SecurityScheme, Tags};
use std::sync::Arc;

use crate::errors::PortalError;
use crate::services::TokenService;
use crate::stores::UserStore;
use crate::types::db::user::Role;
use crate::types::dto::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::types::dto::user::UserDto;

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

/// Authentication API endpoints
pub struct AuthApi {
    users: Arc<UserStore>,
    tokens: Arc<TokenService>,
}

impl AuthApi {
    pub fn new(users: Arc<UserStore>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }
}

#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Register a new EMPLOYEE account and log it in
    #[oai(path = "/register", method = "post", tag = "AuthTags::Authentication")]
    async fn register(
        &self,
        body: Json<RegisterRequest>,
    ) -> Result<Json<AuthResponse>, PortalError> {
        let body = body.0;
        let user = self
            .users
            .create_user(
                body.email,
                body.name,
                body.password,
                body.department,
                Role::Employee,
            )
            .await?;

        let token = self.tokens.issue(&user)?;
        Ok(Json(AuthResponse {
            user: UserDto::from(user),
            token,
        }))
    }

    /// Login with email and password to receive a bearer token
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<AuthResponse>, PortalError> {
        let user = self
            .users
            .verify_credentials(&body.email, &body.password)
            .await?;

        let token = self.tokens.issue(&user)?;
        Ok(Json(AuthResponse {
            user: UserDto::from(user),
            token,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup() -> AuthApi {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");

        let users = Arc::new(UserStore::new(db));
        let tokens = Arc::new(TokenService::new(
            "test-secret-key-minimum-32-characters-long".to_string(),
        ));
        AuthApi::new(users, tokens)
    }

    #[tokio::test]
    async fn register_then_login() {
        let api = setup().await;

        let registered = api
            .register(Json(RegisterRequest {
                email: "alice@example.com".into(),
                password: "s3cret-pass".into(),
                name: "Alice".into(),
                department: Some("Support".into()),
            }))
            .await
            .unwrap();
        assert_eq!(registered.user.role, Role::Employee);
        assert!(!registered.token.is_empty());

        let logged_in = api
            .login(Json(LoginRequest {
                email: "alice@example.com".into(),
                password: "s3cret-pass".into(),
            }))
            .await
            .unwrap();
        assert_eq!(logged_in.user.id, registered.user.id);
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_unauthorized() {
        let api = setup().await;

        api.register(Json(RegisterRequest {
            email: "alice@example.com".into(),
            password: "s3cret-pass".into(),
            name: "Alice".into(),
            department: None,
        }))
        .await
        .unwrap();

        let result = api
            .login(Json(LoginRequest {
                email: "alice@example.com".into(),
                password: "wrong".into(),
            }))
            .await;
        assert_eq!(result.unwrap_err().code(), "invalid_credentials");
    }

    #[tokio::test]
    async fn register_with_duplicate_email_is_rejected() {
        let api = setup().await;

        let request = || {
            Json(RegisterRequest {
                email: "alice@example.com".into(),
                password: "s3cret-pass".into(),
                name: "Alice".into(),
                department: None,
            })
        };

        api.register(request()).await.unwrap();
        let result = api.register(request()).await;
        assert_eq!(result.unwrap_err().code(), "duplicate_email");
    }

    #[tokio::test]
    async fn issued_token_authenticates_with_embedded_role() {
        let api = setup().await;

        let registered = api
            .register(Json(RegisterRequest {
                email: "alice@example.com".into(),
                password: "s3cret-pass".into(),
                name: "Alice".into(),
                department: None,
            }))
            .await
            .unwrap();

        let claims = api.tokens.authenticate(&registered.token).unwrap();
        assert_eq!(claims.sub, registered.user.id);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.role, Role::Employee);
    }
}
