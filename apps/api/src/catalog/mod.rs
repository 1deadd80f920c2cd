// Agentic security catalog: static guardrail/eval items plus generated detail pages.

pub mod detail;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod seed;

pub use detail::ItemDetails;
pub use seed::Catalog;
