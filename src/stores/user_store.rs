use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::PortalError;
use crate::services::crypto;
use crate::types::db::user::{self, Entity as User, Role};
use crate::types::dto::user::UserDto;

/// UserStore manages the user directory: accounts, credentials and roles.
///
/// The password hash never leaves this store; every outward projection is a
/// [`UserDto`].
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a user with the given role. Registration passes
    /// [`Role::Employee`]; seeding may pass an elevated role.
    ///
    /// Returns the full model so the caller can issue a token for it.
    pub async fn create_user(
        &self,
        email: String,
        name: String,
        password: String,
        department: Option<String>,
        role: Role,
    ) -> Result<user::Model, PortalError> {
        let existing = User::find()
            .filter(user::Column::Email.eq(&email))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(PortalError::duplicate_email());
        }

        let now = Utc::now().timestamp();
        let new_user = user::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            email: Set(email),
            name: Set(name),
            password_hash: Set(crypto::hash_password(&password)?),
            role: Set(role),
            department: Set(department),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = new_user.insert(&self.db).await.map_err(|e| {
            // A concurrent insert can still trip the unique constraint.
            if e.to_string().contains("UNIQUE") {
                PortalError::duplicate_email()
            } else {
                PortalError::from(e)
            }
        })?;

        Ok(model)
    }

    /// Verify credentials by email and return the matching user.
    ///
    /// Missing user and wrong password are indistinguishable to the caller.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<user::Model, PortalError> {
        let user = User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .ok_or_else(PortalError::invalid_credentials)?;

        if !crypto::verify_password(password, &user.password_hash) {
            return Err(PortalError::invalid_credentials());
        }

        Ok(user)
    }

    /// List every user, newest first, without credentials.
    pub async fn list_users(&self) -> Result<Vec<UserDto>, PortalError> {
        let users = User::find()
            .order_by_desc(user::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(users.into_iter().map(UserDto::from).collect())
    }

    /// Change the role of `target_id` on behalf of `actor_id`.
    ///
    /// Invariant enforced here, not at the route layer: an actor can never
    /// change their own role, whatever the entry point.
    pub async fn update_role(
        &self,
        actor_id: &str,
        target_id: &str,
        role: Role,
    ) -> Result<UserDto, PortalError> {
        if actor_id == target_id {
            return Err(PortalError::self_role_change());
        }

        let target = User::find_by_id(target_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| PortalError::not_found("User"))?;

        let mut active: user::ActiveModel = target.into();
        active.role = Set(role);
        active.updated_at = Set(Utc::now().timestamp());
        let updated = active.update(&self.db).await?;

        Ok(UserDto::from(updated))
    }

    /// Number of accounts in the directory. Used by startup seeding.
    pub async fn count(&self) -> Result<u64, PortalError> {
        Ok(User::find().count(&self.db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup() -> UserStore {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");
        UserStore::new(db)
    }

    #[tokio::test]
    async fn create_and_verify_credentials() {
        let store = setup().await;

        let created = store
            .create_user(
                "alice@example.com".into(),
                "Alice".into(),
                "s3cret-pass".into(),
                Some("Support".into()),
                Role::Employee,
            )
            .await
            .unwrap();
        assert_eq!(created.role, Role::Employee);

        let verified = store
            .verify_credentials("alice@example.com", "s3cret-pass")
            .await
            .unwrap();
        assert_eq!(verified.id, created.id);

        let wrong = store
            .verify_credentials("alice@example.com", "wrong-pass")
            .await;
        assert_eq!(wrong.unwrap_err().code(), "invalid_credentials");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = setup().await;

        store
            .create_user(
                "alice@example.com".into(),
                "Alice".into(),
                "pw".into(),
                None,
                Role::Employee,
            )
            .await
            .unwrap();

        let dup = store
            .create_user(
                "alice@example.com".into(),
                "Other Alice".into(),
                "pw2".into(),
                None,
                Role::Employee,
            )
            .await;
        assert_eq!(dup.unwrap_err().code(), "duplicate_email");
    }

    #[tokio::test]
    async fn self_role_change_is_rejected_and_role_unchanged() {
        let store = setup().await;

        let admin = store
            .create_user(
                "root@example.com".into(),
                "Root".into(),
                "pw".into(),
                None,
                Role::SuperAdmin,
            )
            .await
            .unwrap();

        let result = store.update_role(&admin.id, &admin.id, Role::Employee).await;
        assert_eq!(result.unwrap_err().code(), "self_role_change");

        let listed = store.list_users().await.unwrap();
        assert_eq!(listed[0].role, Role::SuperAdmin);
    }

    #[tokio::test]
    async fn role_change_for_another_user_succeeds() {
        let store = setup().await;

        let admin = store
            .create_user(
                "root@example.com".into(),
                "Root".into(),
                "pw".into(),
                None,
                Role::SuperAdmin,
            )
            .await
            .unwrap();
        let bob = store
            .create_user(
                "bob@example.com".into(),
                "Bob".into(),
                "pw".into(),
                None,
                Role::Employee,
            )
            .await
            .unwrap();

        let updated = store
            .update_role(&admin.id, &bob.id, Role::Reviewer)
            .await
            .unwrap();
        assert_eq!(updated.role, Role::Reviewer);
        assert_eq!(updated.id, bob.id);
    }

    #[tokio::test]
    async fn role_change_for_unknown_user_is_not_found() {
        let store = setup().await;

        let admin = store
            .create_user(
                "root@example.com".into(),
                "Root".into(),
                "pw".into(),
                None,
                Role::SuperAdmin,
            )
            .await
            .unwrap();

        let result = store
            .update_role(&admin.id, "no-such-user", Role::Reviewer)
            .await;
        assert_eq!(result.unwrap_err().code(), "not_found");
    }
}
