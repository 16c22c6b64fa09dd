//! Server-side filters for alert listing
//!
//! The list endpoint accepts a `filters` object keyed by field name, each
//! holding an operator object:
//!
//! ```json
//! {"severity": {"eq": [2]}, "read": {"eq": false}, "date": {"gte": 1700000000000}}
//! ```

use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

use crate::errors::{PortalwatchError, Result};
use crate::impl_wire_enum_conversions;
use crate::types::alert::is_alert_identity;

/// Alert severity as encoded by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl_wire_enum_conversions!(Severity {
    Low => "low",
    Medium => "medium",
    High => "high",
});

impl Severity {
    pub const fn code(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }
}

/// Alert resolution status as encoded by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResolutionStatus {
    Open,
    Dismissed,
    Resolved,
}

impl_wire_enum_conversions!(ResolutionStatus {
    Open => "open",
    Dismissed => "dismissed",
    Resolved => "resolved",
});

impl ResolutionStatus {
    pub const fn code(self) -> u8 {
        match self {
            Self::Open => 0,
            Self::Dismissed => 1,
            Self::Resolved => 2,
        }
    }
}

/// Optional filter criteria for listing alerts. Empty means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertFilter {
    pub severity: Vec<Severity>,
    pub resolution_status: Vec<ResolutionStatus>,
    pub read: Option<bool>,
    pub date_after: Option<DateTime<Utc>>,
    pub date_before: Option<DateTime<Utc>>,
    pub alert_ids: Vec<String>,
}

impl AlertFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_severity(mut self, severity: impl IntoIterator<Item = Severity>) -> Self {
        self.severity.extend(severity);
        self
    }

    pub fn with_resolution_status(
        mut self,
        status: impl IntoIterator<Item = ResolutionStatus>,
    ) -> Self {
        self.resolution_status.extend(status);
        self
    }

    pub fn with_read(mut self, read: bool) -> Self {
        self.read = Some(read);
        self
    }

    pub fn with_date_range(
        mut self,
        after: Option<DateTime<Utc>>,
        before: Option<DateTime<Utc>>,
    ) -> Self {
        self.date_after = after;
        self.date_before = before;
        self
    }

    pub fn with_alert_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alert_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.severity.is_empty()
            && self.resolution_status.is_empty()
            && self.read.is_none()
            && self.date_after.is_none()
            && self.date_before.is_none()
            && self.alert_ids.is_empty()
    }

    /// # Errors
    /// `InvalidArgument` for an inverted date range or malformed alert ids.
    pub fn validate(&self) -> Result<()> {
        if let (Some(after), Some(before)) = (self.date_after, self.date_before) {
            if after > before {
                return Err(PortalwatchError::InvalidArgument(format!(
                    "date_after ({after}) must not be later than date_before ({before})"
                )));
            }
        }

        if let Some(bad) = self.alert_ids.iter().find(|id| !is_alert_identity(id)) {
            return Err(PortalwatchError::InvalidArgument(format!(
                "alert id '{bad}' is not a 24 character hexadecimal identifier"
            )));
        }

        Ok(())
    }

    /// Wire form of the filter, or `None` when no criteria are set.
    pub fn to_wire(&self) -> Option<Value> {
        if self.is_empty() {
            return None;
        }

        let mut filters = Map::new();

        if !self.severity.is_empty() {
            let codes: Vec<u8> = dedup(&self.severity).into_iter().map(Severity::code).collect();
            filters.insert("severity".into(), json!({ "eq": codes }));
        }
        if !self.resolution_status.is_empty() {
            let codes: Vec<u8> =
                dedup(&self.resolution_status).into_iter().map(ResolutionStatus::code).collect();
            filters.insert("resolutionStatus".into(), json!({ "eq": codes }));
        }
        if let Some(read) = self.read {
            filters.insert("read".into(), json!({ "eq": read }));
        }
        if self.date_after.is_some() || self.date_before.is_some() {
            let mut range = Map::new();
            if let Some(after) = self.date_after {
                range.insert("gte".into(), json!(after.timestamp_millis()));
            }
            if let Some(before) = self.date_before {
                range.insert("lte".into(), json!(before.timestamp_millis()));
            }
            filters.insert("date".into(), Value::Object(range));
        }
        if !self.alert_ids.is_empty() {
            filters.insert("id".into(), json!({ "eq": self.alert_ids }));
        }

        Some(Value::Object(filters))
    }
}

fn dedup<T: Ord + Copy>(values: &[T]) -> Vec<T> {
    let mut values = values.to_vec();
    values.sort_unstable();
    values.dedup();
    values
}
