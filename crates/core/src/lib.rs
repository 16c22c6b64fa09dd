//! # Portalwatch Core
//!
//! Pure query logic - no HTTP or configuration code.
//!
//! This crate contains:
//! - The transport port (`ApiTransport`) implemented by infrastructure
//! - The alert query service: mode dispatch, parameter validation, request
//!   body construction and response normalization
//!
//! ## Architecture Principles
//! - Only depends on `portalwatch-domain`
//! - All network access goes through the `ApiTransport` trait
//! - Pure, testable business logic

pub mod alerts;
pub mod transport;

// Re-export specific items to avoid ambiguity
pub use alerts::AlertService;
pub use transport::ports::ApiTransport;
