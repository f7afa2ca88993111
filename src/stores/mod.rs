// Stores layer - Data access and repository pattern
pub mod idea_store;
pub mod user_store;

pub use idea_store::IdeaStore;
pub use user_store::UserStore;
