// Data transfer objects - API request/response models
pub mod auth;
pub mod common;
pub mod idea;
pub mod user;
