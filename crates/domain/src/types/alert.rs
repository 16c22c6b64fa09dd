//! Alert records returned by the portal API

use std::sync::OnceLock;

use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::constants::{ALERT_IDENTITY_PATTERN, RECORD_ID_FIELD, RECORD_IDENTITY_FIELD};
use crate::errors::{PortalwatchError, Result};

/// Whether an alert identifier has the 24 hex character object id shape.
pub fn is_alert_identity(value: &str) -> bool {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX
        .get_or_init(|| {
            Regex::new(ALERT_IDENTITY_PATTERN).expect("alert identity pattern is a valid regex")
        })
        .is_match(value)
}

/// Result of adding the `Identity` alias to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasOutcome {
    /// `Identity` now mirrors `_id`
    Added,
    /// The record already had an `Identity` field; left untouched
    AlreadyPresent,
    /// The record has no `_id`; nothing to alias
    MissingId,
    /// The record is not a JSON object; kept exactly as received
    NotAnObject,
}

/// One alert as returned by the API, plus the `Identity` convenience alias.
///
/// Serializes as the underlying JSON value.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertRecord {
    value: Value,
    alias: AliasOutcome,
}

impl AlertRecord {
    /// Wrap a JSON object, adding `Identity` when possible.
    pub fn from_map(mut fields: Map<String, Value>) -> Self {
        let alias = add_identity_alias(&mut fields);
        Self { value: Value::Object(fields), alias }
    }

    /// Wrap a JSON value that must be an object.
    ///
    /// # Errors
    /// Returns `PortalwatchError::InvalidResponse` for anything but an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self::from_map(fields)),
            other => Err(PortalwatchError::InvalidResponse(format!(
                "expected an alert object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Wrap any JSON value. Objects are aliased; anything else is kept
    /// unmodified with [`AliasOutcome::NotAnObject`].
    pub fn from_raw(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self::from_map(fields),
            other => Self { value: other, alias: AliasOutcome::NotAnObject },
        }
    }

    /// The `Identity` alias, falling back to `_id` when aliasing was skipped.
    pub fn identity(&self) -> Option<&str> {
        self.value
            .get(RECORD_IDENTITY_FIELD)
            .or_else(|| self.value.get(RECORD_ID_FIELD))
            .and_then(Value::as_str)
    }

    pub fn id(&self) -> Option<&Value> {
        self.value.get(RECORD_ID_FIELD)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.value.get(key)
    }

    /// Object members; `None` for records that are not objects.
    pub fn fields(&self) -> Option<&Map<String, Value>> {
        self.value.as_object()
    }

    pub fn alias_outcome(&self) -> AliasOutcome {
        self.alias
    }

    /// Short description of the JSON kind, e.g. "an object".
    pub fn kind(&self) -> &'static str {
        json_kind(&self.value)
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}

impl Serialize for AlertRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

fn add_identity_alias(fields: &mut Map<String, Value>) -> AliasOutcome {
    if fields.contains_key(RECORD_IDENTITY_FIELD) {
        return AliasOutcome::AlreadyPresent;
    }
    match fields.get(RECORD_ID_FIELD).cloned() {
        Some(id) => {
            fields.insert(RECORD_IDENTITY_FIELD.to_string(), id);
            AliasOutcome::Added
        }
        None => AliasOutcome::MissingId,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
