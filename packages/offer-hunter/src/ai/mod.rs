//! Language model implementations.

mod gemini;
mod rate_limited;

pub use gemini::{GeminiModel, DEFAULT_GEMINI_MODEL};
pub use rate_limited::RateLimitedModel;
