// Services layer - Business logic helpers
pub mod crypto;
pub mod token_service;

pub use token_service::TokenService;
