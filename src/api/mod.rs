// API layer - HTTP endpoint definitions
pub mod auth;
pub mod health;
pub mod ideas;
pub mod users;

pub use auth::AuthApi;
pub use health::HealthApi;
pub use ideas::IdeaApi;
pub use users::UserApi;
