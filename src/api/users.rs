use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::auth::BearerAuth;
use crate::errors::PortalError;
use crate::policy::{self, Action};
use crate::services::TokenService;
use crate::stores::UserStore;
use crate::types::dto::user::{UpdateRoleRequest, UserDto};

/// User directory API endpoints, SUPER_ADMIN only
pub struct UserApi {
    users: Arc<UserStore>,
    tokens: Arc<TokenService>,
}

impl UserApi {
    pub fn new(users: Arc<UserStore>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }
}

#[derive(Tags)]
enum UserTags {
    /// User directory management
    Users,
}

#[OpenApi(prefix_path = "/users")]
impl UserApi {
    /// List every user, newest first, without credentials
    #[oai(path = "/", method = "get", tag = "UserTags::Users")]
    async fn list_users(&self, auth: BearerAuth) -> Result<Json<Vec<UserDto>>, PortalError> {
        let claims = self.tokens.authenticate(&auth.0.token)?;
        if !policy::allows(claims.role, Action::ManageUsers) {
            return Err(PortalError::forbidden());
        }

        let users = self.users.list_users().await?;
        Ok(Json(users))
    }

    /// Change the role of another user. Self-changes are rejected.
    #[oai(path = "/:id/role", method = "patch", tag = "UserTags::Users")]
    async fn update_role(
        &self,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdateRoleRequest>,
    ) -> Result<Json<UserDto>, PortalError> {
        let claims = self.tokens.authenticate(&auth.0.token)?;
        if !policy::allows(claims.role, Action::ManageUsers) {
            return Err(PortalError::forbidden());
        }

        let updated = self
            .users
            .update_role(&claims.sub, &id.0, body.0.role)
            .await?;
        Ok(Json(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::db::user::Role;
    use migration::{Migrator, MigratorTrait};
    use poem_openapi::auth::Bearer;
    use sea_orm::Database;

    struct Harness {
        api: UserApi,
        users: Arc<UserStore>,
        tokens: Arc<TokenService>,
    }

    impl Harness {
        async fn login_as(&self, email: &str, role: Role) -> (String, String) {
            let user = self
                .users
                .create_user(
                    email.into(),
                    email.split('@').next().unwrap().into(),
                    "pw".into(),
                    None,
                    role,
                )
                .await
                .expect("Failed to create user");
            let token = self.tokens.issue(&user).expect("Failed to issue token");
            (user.id, token)
        }
    }

    fn auth(token: &str) -> BearerAuth {
        BearerAuth(Bearer {
            token: token.to_string(),
        })
    }

    async fn setup() -> Harness {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");

        let users = Arc::new(UserStore::new(db));
        let tokens = Arc::new(TokenService::new(
            "test-secret-key-minimum-32-characters-long".to_string(),
        ));
        Harness {
            api: UserApi::new(users.clone(), tokens.clone()),
            users,
            tokens,
        }
    }

    #[tokio::test]
    async fn listing_requires_super_admin() {
        let h = setup().await;
        let (_, admin) = h.login_as("admin@example.com", Role::Admin).await;
        let (_, root) = h.login_as("root@example.com", Role::SuperAdmin).await;

        let denied = h.api.list_users(auth(&admin)).await;
        assert_eq!(denied.unwrap_err().code(), "forbidden");

        let listed = h.api.list_users(auth(&root)).await.unwrap();
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn super_admin_changes_another_users_role() {
        let h = setup().await;
        let (_, root) = h.login_as("root@example.com", Role::SuperAdmin).await;
        let (bob_id, _) = h.login_as("bob@example.com", Role::Employee).await;

        let updated = h
            .api
            .update_role(
                auth(&root),
                Path(bob_id.clone()),
                Json(UpdateRoleRequest { role: Role::Pm }),
            )
            .await
            .unwrap();
        assert_eq!(updated.id, bob_id);
        assert_eq!(updated.role, Role::Pm);
    }

    #[tokio::test]
    async fn super_admin_cannot_change_own_role() {
        let h = setup().await;
        let (root_id, root) = h.login_as("root@example.com", Role::SuperAdmin).await;

        let result = h
            .api
            .update_role(
                auth(&root),
                Path(root_id.clone()),
                Json(UpdateRoleRequest {
                    role: Role::Employee,
                }),
            )
            .await;
        assert_eq!(result.unwrap_err().code(), "self_role_change");

        // Role is unchanged.
        let listed = h.api.list_users(auth(&root)).await.unwrap();
        let me = listed.iter().find(|u| u.id == root_id).unwrap();
        assert_eq!(me.role, Role::SuperAdmin);
    }

    #[tokio::test]
    async fn non_super_admin_cannot_change_roles() {
        let h = setup().await;
        let (_, reviewer) = h.login_as("bob@example.com", Role::Reviewer).await;
        let (alice_id, _) = h.login_as("alice@example.com", Role::Employee).await;

        let result = h
            .api
            .update_role(
                auth(&reviewer),
                Path(alice_id),
                Json(UpdateRoleRequest { role: Role::Admin }),
            )
            .await;
        assert_eq!(result.unwrap_err().code(), "forbidden");
    }

    #[tokio::test]
    async fn listing_never_exposes_credentials() {
        let h = setup().await;
        let (_, root) = h.login_as("root@example.com", Role::SuperAdmin).await;

        let listed = h.api.list_users(auth(&root)).await.unwrap();
        let serialized = serde_json::to_string(&listed.0).unwrap();
        assert!(!serialized.contains("password"));
        assert!(!serialized.contains("hash"));
    }
}
