//! Configuration loading
//!
//! Loads the portal configuration from environment variables and files.

pub mod loader;

pub use loader::{load, load_from_env, load_from_file, load_optional, probe_config_paths};
