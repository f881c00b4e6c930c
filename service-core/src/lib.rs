//! service-core: Shared infrastructure for the score commentary service.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
