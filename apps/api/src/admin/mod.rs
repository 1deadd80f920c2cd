// Password-derived admin token and the extractor that guards admin routes.

pub mod auth;
pub mod handlers;

pub use auth::RequireAdmin;
