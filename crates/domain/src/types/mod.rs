//! Domain types and models

pub mod alert;
pub mod credential;
pub mod filter;
pub mod http;
pub mod query;

pub use alert::{is_alert_identity, AlertRecord, AliasOutcome};
pub use credential::Credential;
pub use filter::{AlertFilter, ResolutionStatus, Severity};
pub use http::{base_path, AllowList, HttpMethod, RawResponse, RequestDescriptor};
pub use query::{AlertQuery, AlertQueryOutcome, ListAlertsParams, SortDirection, SortField};
