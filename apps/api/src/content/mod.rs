// Generative content core shared by every generated content type.
// Store + parser + assembler helpers + the cache that orchestrates them.

pub mod assemble;
pub mod cache;
pub mod parser;
pub mod single_flight;
pub mod store;

pub use cache::{ContentCache, ContentKind};
pub use parser::Payload;
pub use store::DiskStore;
