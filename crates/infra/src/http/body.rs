//! Request body serialization
//!
//! Bodies are written compactly with nesting bounded to a fixed depth. Level 1
//! is a direct member of the root value; a container nested deeper than the
//! limit is replaced by its compact JSON text. Arrays holding only scalars are
//! treated as leaves and never count towards the depth.

use portalwatch_domain::{PortalwatchError, Result};
use serde_json::Value;

/// Serialize `value` compactly with nesting bounded to `max_depth`.
///
/// # Errors
/// Returns `PortalwatchError::Internal` if serialization fails.
pub fn serialize_body(value: &Value, max_depth: usize) -> Result<Vec<u8>> {
    let limited = limit_depth(value, 0, max_depth);
    serde_json::to_vec(&limited)
        .map_err(|e| PortalwatchError::Internal(format!("failed to serialize request body: {e}")))
}

fn limit_depth(value: &Value, level: usize, max_depth: usize) -> Value {
    match value {
        Value::Array(items) if is_scalar_array(items) => value.clone(),
        Value::Array(_) | Value::Object(_) if level > max_depth => {
            Value::String(value.to_string())
        }
        Value::Array(items) => {
            Value::Array(items.iter().map(|item| limit_depth(item, level + 1, max_depth)).collect())
        }
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), limit_depth(item, level + 1, max_depth)))
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}

fn is_scalar_array(items: &[Value]) -> bool {
    items.iter().all(|item| !matches!(item, Value::Array(_) | Value::Object(_)))
}
