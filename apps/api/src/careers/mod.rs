// Career counselor: profession catalog, region-aware career guides, transition
// plans, counselor chat and profession illustrations.

pub mod chat;
pub mod detail;
pub mod handlers;
pub mod image;
pub mod models;
pub mod prompts;
pub mod seed;
pub mod transition;

pub use chat::CareerChat;
pub use detail::CareerDetails;
pub use image::ImageCache;
pub use seed::CareerSeed;
pub use transition::TransitionPlans;
