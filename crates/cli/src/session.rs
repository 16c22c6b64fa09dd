//! Process-wide session: configuration read once plus the default credential

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use portalwatch_core::AlertService;
use portalwatch_domain::{Config, Credential};
use portalwatch_infra::{config, RequestExecutor};
use tracing::debug;

/// Loaded configuration, the default credential and the alert service built
/// from them.
pub struct Session {
    config: Config,
    credential: Credential,
    alerts: AlertService,
}

impl Session {
    /// Load configuration and resolve the default credential.
    ///
    /// An explicit `credential` replaces the configured tenant and allows
    /// running with no configuration at all; a configuration file that exists
    /// but does not parse is always an error.
    pub fn open(config_path: Option<PathBuf>, credential: Option<Credential>) -> anyhow::Result<Self> {
        let config = match (config_path, credential.is_some()) {
            (Some(path), _) => config::load_from_file(Some(path))?,
            (None, false) => config::load()?,
            (None, true) => config::load_optional()?.unwrap_or_else(|| {
                debug!("no configuration found, using defaults");
                Config::default()
            }),
        };

        Self::from_config(config, credential)
    }

    /// Build a session from an already loaded configuration.
    pub fn from_config(config: Config, credential: Option<Credential>) -> anyhow::Result<Self> {
        let Some(credential) = credential.or_else(|| config.credential()) else {
            bail!("no tenant configured: pass --tenant and --token, set PORTALWATCH_TENANT and PORTALWATCH_TOKEN, or add a [tenant] section to the configuration file");
        };
        credential.validate()?;

        let executor =
            RequestExecutor::from_config(&config).context("failed to build request executor")?;
        let alerts = AlertService::new(Arc::new(executor))
            .with_retry_interval(config.http.retry_interval());

        debug!(tenant = %credential.tenant(), "session opened");
        Ok(Self { config, credential, alerts })
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn alerts(&self) -> &AlertService {
        &self.alerts
    }
}

#[cfg(test)]
mod tests {
    use portalwatch_domain::{PortalwatchError, TenantConfig};

    use super::*;

    const TENANT: &str = "contoso.portal.cloudappsecurity.com";
    const TOKEN: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[test]
    fn uses_configured_tenant_by_default() {
        let config = Config {
            tenant: Some(TenantConfig { hostname: TENANT.to_string(), token: TOKEN.to_string() }),
            ..Config::default()
        };

        let session = Session::from_config(config, None).expect("session");
        assert_eq!(session.credential().tenant(), TENANT);
    }

    #[test]
    fn explicit_credential_wins() {
        let config = Config {
            tenant: Some(TenantConfig {
                hostname: "other.portal.cloudappsecurity.com".to_string(),
                token: TOKEN.to_string(),
            }),
            ..Config::default()
        };

        let session =
            Session::from_config(config, Some(Credential::new(TENANT, TOKEN))).expect("session");
        assert_eq!(session.credential().tenant(), TENANT);
    }

    #[test]
    fn missing_tenant_is_an_error() {
        let err = Session::from_config(Config::default(), None).err().expect("error");
        assert!(err.to_string().contains("no tenant configured"));
    }

    #[test]
    fn invalid_credential_is_rejected_up_front() {
        let err = Session::from_config(Config::default(), Some(Credential::new(TENANT, "abc")))
            .err()
            .expect("error");
        assert!(matches!(
            err.downcast_ref::<PortalwatchError>(),
            Some(PortalwatchError::InvalidCredential(_))
        ));
    }

    #[test]
    fn explicit_credential_still_reports_broken_config_file() {
        std::env::remove_var("PORTALWATCH_TENANT");
        std::env::remove_var("PORTALWATCH_TOKEN");

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("portalwatch.toml"), "[http\ntimeout_seconds = ").unwrap();
        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();

        let result = Session::open(None, Some(Credential::new(TENANT, TOKEN)));
        std::env::set_current_dir(previous).unwrap();

        let err = result.err().expect("broken file should be reported");
        assert!(matches!(
            err.downcast_ref::<PortalwatchError>(),
            Some(PortalwatchError::Config(msg)) if msg.contains("Invalid TOML format")
        ));
    }
}
