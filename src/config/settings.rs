use std::env;

/// Application settings loaded from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    /// Optional bootstrap super-admin credentials, applied only when the
    /// user directory is empty.
    pub seed_admin: Option<SeedAdmin>,
}

#[derive(Debug, Clone)]
pub struct SeedAdmin {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://portal.db?mode=rwc".to_string());
        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| SettingsError::MissingVar("JWT_SECRET"))?;
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());

        let seed_admin = match (env::var("SEED_ADMIN_EMAIL"), env::var("SEED_ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) => Some(SeedAdmin {
                email,
                password,
                name: env::var("SEED_ADMIN_NAME").unwrap_or_else(|_| "Super Admin".to_string()),
            }),
            _ => None,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr: format!("0.0.0.0:{}", port),
            seed_admin,
        })
    }
}
