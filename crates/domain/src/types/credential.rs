//! Tenant credential for the portal API

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{AUTHORIZATION_SCHEME, TENANT_DOMAIN_SUFFIX, TOKEN_PATTERN};
use crate::errors::{PortalwatchError, Result};

/// Tenant hostname and API token pair.
///
/// Constructing a credential never validates it; [`Credential::validate`] is
/// run by the request executor before anything is sent. The token is omitted
/// from `Debug` output and from serialization.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    tenant: String,
    #[serde(skip_serializing)]
    token: String,
}

impl Credential {
    pub fn new(tenant: impl Into<String>, token: impl Into<String>) -> Self {
        Self { tenant: tenant.into(), token: token.into() }
    }

    /// Build a credential and validate it in one step.
    pub fn parse(tenant: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let credential = Self::new(tenant, token);
        credential.validate()?;
        Ok(credential)
    }

    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value of the `Authorization` header, e.g. `Token 0123...`.
    pub fn authorization_header(&self) -> String {
        format!("{AUTHORIZATION_SCHEME} {}", self.token)
    }

    /// Check the tenant suffix and the token pattern.
    ///
    /// # Errors
    /// Returns `PortalwatchError::InvalidCredential`; the message never
    /// contains the token itself.
    pub fn validate(&self) -> Result<()> {
        let tenant = self.tenant.to_ascii_lowercase();
        let has_host_label = tenant.len() > TENANT_DOMAIN_SUFFIX.len();
        let well_formed = !tenant.contains(['/', ':', ' ', '@']);

        if !(tenant.ends_with(TENANT_DOMAIN_SUFFIX) && has_host_label && well_formed) {
            return Err(PortalwatchError::InvalidCredential(format!(
                "tenant '{}' must be a host name ending in '{}'",
                self.tenant, TENANT_DOMAIN_SUFFIX
            )));
        }

        if !token_regex().is_match(&self.token) {
            return Err(PortalwatchError::InvalidCredential(format!(
                "token must be 64 hexadecimal characters (got {} characters)",
                self.token.chars().count()
            )));
        }

        Ok(())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("tenant", &self.tenant)
            .field("token", &"<redacted>")
            .finish()
    }
}

fn token_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is a valid regex"))
}
