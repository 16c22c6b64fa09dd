//! Conversions from external infrastructure errors into domain errors.

use portalwatch_domain::{PortalwatchError, RequestError};
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PortalwatchError);

impl From<InfraError> for PortalwatchError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PortalwatchError> for InfraError {
    fn from(value: PortalwatchError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoPortalwatchError {
    fn into_portalwatch(self) -> PortalwatchError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → PortalwatchError */
/* -------------------------------------------------------------------------- */

impl IntoPortalwatchError for HttpError {
    fn into_portalwatch(self) -> PortalwatchError {
        if self.is_builder() {
            return PortalwatchError::Request(RequestError::Build(self.to_string()));
        }

        if self.is_timeout() {
            return PortalwatchError::Request(RequestError::Transport(
                "HTTP request timed out".into(),
            ));
        }

        if self.is_connect() {
            return PortalwatchError::Request(RequestError::Transport(format!(
                "HTTP connection failure: {}",
                describe_url(&self)
            )));
        }

        if let Some(status) = self.status() {
            return PortalwatchError::Request(RequestError::Status {
                status: status.as_u16(),
                url: describe_url(&self),
                body: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        PortalwatchError::Request(RequestError::Transport(self.to_string()))
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_portalwatch())
    }
}

fn describe_url(err: &HttpError) -> String {
    err.url().map(|url| url.as_str().to_string()).unwrap_or_else(|| "<unknown url>".into())
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
