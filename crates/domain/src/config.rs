//! Configuration management

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MAX_RATE_LIMIT_RETRIES, DEFAULT_REQUEST_TIMEOUT, DEFAULT_RETRY_INTERVAL,
};
use crate::types::{AllowList, Credential};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tenant: Option<TenantConfig>,
    #[serde(default)]
    pub http: HttpConfig,
    /// Replaces the built-in allow-list when present
    #[serde(default)]
    pub allow_list: Option<AllowList>,
}

impl Config {
    /// Default credential for the session, when one is configured.
    pub fn credential(&self) -> Option<Credential> {
        self.tenant.as_ref().map(TenantConfig::credential)
    }

    pub fn allow_list(&self) -> AllowList {
        self.allow_list.clone().unwrap_or_default()
    }
}

/// Tenant portal and API token
#[derive(Clone, Serialize, Deserialize)]
pub struct TenantConfig {
    pub hostname: String,
    #[serde(skip_serializing)]
    pub token: String,
}

impl TenantConfig {
    /// Credential with surrounding whitespace from files or the environment
    /// removed.
    pub fn credential(&self) -> Credential {
        Credential::new(self.hostname.trim(), self.token.trim())
    }
}

impl fmt::Debug for TenantConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantConfig")
            .field("hostname", &self.hostname)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub retry_interval_seconds: u64,
    pub max_rate_limit_retries: u32,
    pub exponential_backoff: bool,
    pub max_backoff_seconds: u64,
    pub user_agent: Option<String>,
    /// Base URL used instead of `https://{tenant}` (proxies, test servers)
    pub endpoint_override: Option<String>,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval_seconds)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_secs(self.max_backoff_seconds)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_REQUEST_TIMEOUT.as_secs(),
            retry_interval_seconds: DEFAULT_RETRY_INTERVAL.as_secs(),
            max_rate_limit_retries: DEFAULT_MAX_RATE_LIMIT_RETRIES,
            exponential_backoff: false,
            max_backoff_seconds: 60,
            user_agent: None,
            endpoint_override: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_defaults_match_portal_conventions() {
        let http = HttpConfig::default();
        assert_eq!(http.retry_interval(), Duration::from_secs(3));
        assert_eq!(http.timeout(), Duration::from_secs(30));
        assert_eq!(http.max_rate_limit_retries, 10);
        assert!(!http.exponential_backoff);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
[tenant]
hostname = "contoso.portal.cloudappsecurity.com"
token = "abc"

[http]
retry_interval_seconds = 1
"#,
        )
        .unwrap();

        assert_eq!(config.http.retry_interval_seconds, 1);
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.credential().unwrap().tenant(), "contoso.portal.cloudappsecurity.com");
        assert_eq!(config.allow_list(), AllowList::default());
    }

    #[test]
    fn token_is_never_serialized() {
        let config = Config {
            tenant: Some(TenantConfig {
                hostname: "contoso.portal.cloudappsecurity.com".into(),
                token: "secret".into(),
            }),
            ..Default::default()
        };
        let rendered = serde_json::to_string(&config).unwrap();
        assert!(!rendered.contains("secret"));
    }

    const TOKEN: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[test]
    fn debug_output_redacts_token() {
        let config = Config {
            tenant: Some(TenantConfig {
                hostname: "contoso.portal.cloudappsecurity.com".to_string(),
                token: TOKEN.to_string(),
            }),
            ..Config::default()
        };

        let rendered = format!("{config:?}");
        assert!(!rendered.contains(TOKEN));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("contoso.portal.cloudappsecurity.com"));
    }

    #[test]
    fn tenant_credential_trims_configured_values() {
        let tenant = TenantConfig {
            hostname: " contoso.portal.cloudappsecurity.com\n".to_string(),
            token: format!("{TOKEN}\n"),
        };

        let credential = tenant.credential();
        assert_eq!(credential.token(), TOKEN);
        assert!(credential.validate().is_ok());
    }
}
