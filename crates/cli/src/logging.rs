//! Tracing subscriber setup

use anyhow::anyhow;
use tracing_subscriber::{fmt, EnvFilter};

/// Directives used when `RUST_LOG` is not set.
pub const DEFAULT_DIRECTIVES: &str =
    "warn,portalwatch=info,portalwatch_cli=info,portalwatch_core=info,portalwatch_infra=info";

/// Install the global subscriber, writing to stderr so stdout stays JSON.
pub fn init(json: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_DIRECTIVES))
        .map_err(|e| anyhow!("invalid log filter: {e}"))?;

    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(true);

    let installed = if json { builder.json().try_init() } else { builder.try_init() };
    installed.map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}
