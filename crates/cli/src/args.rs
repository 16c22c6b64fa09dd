//! Command line arguments

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use portalwatch_domain::{
    AlertFilter, AlertQuery, ListAlertsParams, ResolutionStatus, Severity, SortDirection,
    SortField,
};

/// Query alerts from a cloud security portal tenant.
#[derive(Debug, Parser)]
#[command(name = "portalwatch", version, about)]
pub struct Cli {
    /// Configuration file (JSON or TOML); probed in standard locations if omitted
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Tenant portal hostname, overriding the configured one
    #[arg(long, global = true, requires = "token")]
    pub tenant: Option<String>,

    /// API token, overriding the configured one
    #[arg(long, global = true, requires = "tenant")]
    pub token: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch one alert by its identity
    Get(GetArgs),
    /// List alerts with optional filters, sorting and paging
    List(ListArgs),
}

#[derive(Debug, Args)]
pub struct GetArgs {
    /// 24 character hexadecimal alert identity
    pub identity: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Maximum number of alerts to return (1-100)
    #[arg(long, default_value_t = 100)]
    pub size: u32,

    /// Number of alerts to skip
    #[arg(long, default_value_t = 0)]
    pub skip: u64,

    /// Sort field: date or severity
    #[arg(long, requires = "sort_direction")]
    pub sort_by: Option<SortField>,

    /// Sort direction: ascending or descending
    #[arg(long, requires = "sort_by")]
    pub sort_direction: Option<SortDirection>,

    /// Comma separated severities: low, medium, high
    #[arg(long, value_delimiter = ',')]
    pub severity: Vec<Severity>,

    /// Comma separated resolution statuses: open, dismissed, resolved
    #[arg(long = "status", value_delimiter = ',')]
    pub resolution_status: Vec<ResolutionStatus>,

    /// Only alerts already marked as read
    #[arg(long, conflicts_with = "unread")]
    pub read: bool,

    /// Only alerts not yet marked as read
    #[arg(long)]
    pub unread: bool,

    /// Only alerts raised at or after this RFC 3339 timestamp
    #[arg(long)]
    pub after: Option<DateTime<Utc>>,

    /// Only alerts raised at or before this RFC 3339 timestamp
    #[arg(long)]
    pub before: Option<DateTime<Utc>>,

    /// Restrict to these alert identities
    #[arg(long = "id", value_delimiter = ',')]
    pub alert_ids: Vec<String>,
}

impl ListArgs {
    pub fn to_params(&self) -> ListAlertsParams {
        let mut filter = AlertFilter::new()
            .with_severity(self.severity.iter().copied())
            .with_resolution_status(self.resolution_status.iter().copied())
            .with_date_range(self.after, self.before)
            .with_alert_ids(self.alert_ids.iter().cloned());

        if self.read {
            filter = filter.with_read(true);
        } else if self.unread {
            filter = filter.with_read(false);
        }

        let mut params =
            ListAlertsParams::new().with_filter(filter).with_size(self.size).with_skip(self.skip);
        params.sort_by = self.sort_by;
        params.sort_direction = self.sort_direction;
        params
    }
}

impl Command {
    pub fn to_query(&self) -> AlertQuery {
        match self {
            Self::Get(args) => AlertQuery::Fetch { identity: args.identity.clone() },
            Self::List(args) => AlertQuery::List(args.to_params()),
        }
    }
}
