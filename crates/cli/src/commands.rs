//! Command execution

use anyhow::Context;
use portalwatch_domain::AlertQueryOutcome;
use serde_json::Value;
use tracing::info;

use crate::args::Command;
use crate::session::Session;

/// Run `command` against the session's tenant and return the JSON to print.
///
/// `get` yields the alert object, `list` an array of alerts.
pub async fn run(session: &Session, command: &Command) -> anyhow::Result<Value> {
    let outcome = session
        .alerts()
        .query(session.credential(), command.to_query())
        .await
        .context("alert query failed")?;

    info!(records = outcome.len(), "query complete");

    Ok(match outcome {
        AlertQueryOutcome::One(record) => record.into_value(),
        AlertQueryOutcome::Many(records) => {
            Value::Array(records.into_iter().map(|record| record.into_value()).collect())
        }
    })
}
