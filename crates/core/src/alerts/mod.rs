//! Alert query operation
//!
//! Fetches one alert by identity or lists alerts with server-side filtering,
//! sorting and pagination. Every returned record carries an `Identity` alias
//! of its `_id`.

pub mod request;
pub mod service;

pub use request::{fetch_path, list_request_body};
pub use service::AlertService;
