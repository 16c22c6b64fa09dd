//! # Portalwatch Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The reqwest-backed request executor (`ApiTransport` implementation)
//! - Conversions from HTTP client errors into domain errors
//! - Configuration loading from the environment and files
//!
//! ## Architecture
//! - Implements traits defined in `portalwatch-core`
//! - Contains all "impure" code (network I/O, environment, filesystem)

pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{
    Backoff, RateLimitPolicy, RequestExecutor, RequestExecutorBuilder, Sleeper, TokioSleeper,
};
