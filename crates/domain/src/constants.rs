//! Portal API constants
//!
//! Centralized location for the fixed conventions of the portal API.

use std::time::Duration;

// Credential validation
pub const TENANT_DOMAIN_SUFFIX: &str = ".portal.cloudappsecurity.com";
pub const TOKEN_PATTERN: &str = r"^[0-9a-fA-F]{64}$";
pub const AUTHORIZATION_SCHEME: &str = "Token";

// Alert identifiers are 24 hex characters (object ids)
pub const ALERT_IDENTITY_PATTERN: &str = r"^[0-9a-fA-F]{24}$";

// Request defaults
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(3);
pub const DEFAULT_MAX_RATE_LIMIT_RETRIES: u32 = 10;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const BODY_MAX_DEPTH: usize = 2;

// Alert endpoints and record fields
pub const ALERTS_PATH: &str = "/api/v1/alerts/";
pub const RECORD_ID_FIELD: &str = "_id";
pub const RECORD_IDENTITY_FIELD: &str = "Identity";
pub const LIST_DATA_FIELD: &str = "data";

// List pagination bounds
pub const MIN_RESULT_SET_SIZE: u32 = 1;
pub const MAX_RESULT_SET_SIZE: u32 = 100;
