//! `portalwatch` binary
//!
//! Results are printed to stdout as pretty JSON; logs and errors go to
//! stderr.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;

use clap::Parser;
use portalwatch_cli::{logging, run, Cli, Session};
use portalwatch_domain::Credential;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.log_json) {
        eprintln!("{e}");
    }

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "portalwatch failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> anyhow::Result<()> {
    let credential = match (cli.tenant, cli.token) {
        (Some(tenant), Some(token)) => Some(Credential::new(tenant.trim(), token.trim())),
        _ => None,
    };

    let session = Session::open(cli.config, credential)?;
    let output = run(&session, &cli.command).await?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
