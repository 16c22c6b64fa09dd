//! # Portalwatch Domain
//!
//! Business domain types for the Portalwatch alert client.
//!
//! This crate contains:
//! - Credential, allow-list and request/response types for the portal API
//! - Alert records and list query parameters
//! - Domain error types and Result definitions
//! - Configuration structures and constants
//!
//! ## Architecture
//! - No dependencies on other Portalwatch crates
//! - No I/O: pure data structures and validation rules

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
