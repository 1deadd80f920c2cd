// Admin-authored long-form articles with React Flow diagram data.

pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;

pub use generator::Articles;
