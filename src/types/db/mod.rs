// Database entities - SeaORM models
pub mod comment;
pub mod idea;
pub mod status_history;
pub mod user;
