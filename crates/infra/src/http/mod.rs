//! Authenticated transport for the portal API
//!
//! - `client`: the request executor (allow-list, auth header, 429 retry)
//! - `body`: depth-limited compact JSON serialization of request bodies
//! - `retry`: rate-limit policy and the injectable sleeper

pub mod body;
pub mod client;
pub mod retry;

pub use client::{RequestExecutor, RequestExecutorBuilder};
pub use retry::{Backoff, RateLimitPolicy, Sleeper, TokioSleeper};
