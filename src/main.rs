use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;
use sea_orm::{Database, DatabaseConnection};
use tracing::info;

use ideaportal_backend::api::{AuthApi, HealthApi, IdeaApi, UserApi};
use ideaportal_backend::config::{self, Settings};
use ideaportal_backend::services::TokenService;
use ideaportal_backend::stores::{IdeaStore, UserStore};
use ideaportal_backend::types::db::user::Role;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    dotenv::dotenv().ok();

    config::logging::init_logging().expect("Failed to initialize logging");

    let settings = Settings::from_env().expect("Invalid configuration");

    let db: DatabaseConnection = Database::connect(&settings.database_url)
        .await
        .expect("Failed to connect to database");
    info!(database_url = %settings.database_url, "connected to database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    info!("database migrations completed");

    let user_store = Arc::new(UserStore::new(db.clone()));
    let idea_store = Arc::new(IdeaStore::new(db.clone()));
    let token_service = Arc::new(TokenService::new(settings.jwt_secret.clone()));

    seed_super_admin(&settings, &user_store).await;

    let api_service = OpenApiService::new(
        (
            HealthApi,
            AuthApi::new(user_store.clone(), token_service.clone()),
            IdeaApi::new(idea_store.clone(), token_service.clone()),
            UserApi::new(user_store.clone(), token_service.clone()),
        ),
        "Innovation Portal API",
        "1.0.0",
    )
    .server(format!("http://{}/api", settings.bind_addr));

    let ui = api_service.swagger_ui();
    let app = Route::new().nest("/api", api_service).nest("/swagger", ui);

    info!(bind_addr = %settings.bind_addr, "starting server");
    Server::new(TcpListener::bind(settings.bind_addr.clone()))
        .run(app)
        .await
}

/// Create the bootstrap SUPER_ADMIN account when the directory is empty and
/// seed credentials are configured.
async fn seed_super_admin(settings: &Settings, users: &UserStore) {
    let Some(seed) = &settings.seed_admin else {
        return;
    };

    match users.count().await {
        Ok(0) => {}
        Ok(_) => return,
        Err(e) => {
            tracing::warn!(error = %e, "could not check user directory for seeding");
            return;
        }
    }

    match users
        .create_user(
            seed.email.clone(),
            seed.name.clone(),
            seed.password.clone(),
            Some("Management".to_string()),
            Role::SuperAdmin,
        )
        .await
    {
        Ok(user) => info!(email = %user.email, "seeded super admin account"),
        Err(e) => tracing::warn!(error = %e, "failed to seed super admin account"),
    }
}
