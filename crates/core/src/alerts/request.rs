//! Request construction for the alert endpoints

use portalwatch_domain::constants::ALERTS_PATH;
use portalwatch_domain::ListAlertsParams;
use serde_json::{json, Map, Value};

/// Path of a single alert: `/api/v1/alerts/{identity}/`.
pub fn fetch_path(identity: &str) -> String {
    format!("{ALERTS_PATH}{identity}/")
}

/// Build the list body from already validated parameters.
///
/// `{skip, limit}` always; `sortDirection`/`sortField` only when sorting was
/// requested; `filters` only when the filter has criteria.
pub fn list_request_body(params: &ListAlertsParams) -> Value {
    let mut body = Map::new();
    body.insert("skip".into(), json!(params.skip));
    body.insert("limit".into(), json!(params.size));

    if let Some((field, direction)) = params.sort() {
        body.insert("sortDirection".into(), json!(direction.api_value()));
        body.insert("sortField".into(), json!(field.api_value()));
    }

    if let Some(filters) = params.filter.to_wire() {
        body.insert("filters".into(), filters);
    }

    Value::Object(body)
}
