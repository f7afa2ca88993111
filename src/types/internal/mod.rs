// Internal types - not exposed on the wire
pub mod auth;
