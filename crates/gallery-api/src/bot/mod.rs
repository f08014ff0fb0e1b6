//! Crawler detection for the snapshot router.

pub mod bypass;
pub mod cache;
pub mod classifier;

pub use bypass::should_bypass_bot_detection;
pub use cache::{BoundedVerdictCache, VerdictCache};
pub use classifier::{BotClassifier, is_crawler_user_agent};
