pub mod commentary;
pub mod metrics;
pub mod prompt_builder;
pub mod providers;

pub use commentary::{generate_comment, FALLBACK_COMMENT};
pub use prompt_builder::build_prompt;
