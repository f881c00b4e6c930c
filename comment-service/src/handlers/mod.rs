//! HTTP handlers for the comment service.

pub mod comment;
pub mod health;

pub use comment::comment;
pub use health::{health_check, metrics};
