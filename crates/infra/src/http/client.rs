use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use portalwatch_core::ApiTransport;
use portalwatch_domain::constants::{BODY_MAX_DEPTH, DEFAULT_REQUEST_TIMEOUT};
use portalwatch_domain::{
    AllowList, Config, Credential, HttpMethod, PortalwatchError, RawResponse, RequestDescriptor,
    RequestError, Result,
};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, StatusCode};
use tracing::{debug, instrument, warn};

use super::body::serialize_body;
use super::retry::{RateLimitPolicy, Sleeper, TokioSleeper};
use crate::errors::InfraError;

/// Executes authenticated calls against the portal API.
///
/// Every call is checked against the allow-list and the credential rules
/// before anything is sent. HTTP 429 responses are retried according to the
/// [`RateLimitPolicy`]; every other failure is returned as is.
#[derive(Clone)]
pub struct RequestExecutor {
    client: ReqwestClient,
    allow_list: Arc<AllowList>,
    policy: RateLimitPolicy,
    sleeper: Arc<dyn Sleeper>,
    endpoint_override: Option<String>,
}

impl RequestExecutor {
    /// Start building a new executor.
    pub fn builder() -> RequestExecutorBuilder {
        RequestExecutorBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Build an executor from the transport section and allow-list of a
    /// loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = Self::builder()
            .timeout(config.http.timeout())
            .allow_list(config.allow_list())
            .rate_limit_policy(RateLimitPolicy::from_config(&config.http));

        if let Some(agent) = &config.http.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        if let Some(endpoint) = &config.http.endpoint_override {
            builder = builder.endpoint_override(endpoint.clone());
        }

        builder.build()
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    pub fn rate_limit_policy(&self) -> RateLimitPolicy {
        self.policy
    }

    /// Validate, send and (on 429) retry one request.
    ///
    /// # Errors
    /// - `InvalidCredential` / `UnsupportedOperation` before any network call
    /// - `Request` for transport failures and non-429 error statuses
    /// - `RateLimitExceeded` once the retry bound is reached
    #[instrument(skip(self, credential, request), fields(method = %request.method, path = %request.path))]
    pub async fn send(
        &self,
        credential: &Credential,
        request: &RequestDescriptor,
    ) -> Result<RawResponse> {
        credential.validate()?;
        self.check_allowed(request)?;

        let url = self.url_for(credential, &request.path);
        let body = match (request.method, &request.body) {
            (HttpMethod::Get, _) | (_, None) => None,
            (_, Some(value)) => Some(serialize_body(value, BODY_MAX_DEPTH)?),
        };

        let mut retries = 0u32;
        loop {
            let attempt = retries + 1;
            let builder = self.compose(credential, request, &url, body.as_deref());
            debug!(attempt, %url, "sending portal request");

            let response = builder.send().await.map_err(|err| {
                debug!(attempt, %url, error = %err, "portal request failed");
                PortalwatchError::from(InfraError::from(err))
            })?;

            let status = response.status();
            debug!(attempt, %url, %status, "received portal response");

            if status == StatusCode::TOO_MANY_REQUESTS {
                if retries >= self.policy.max_retries {
                    warn!(attempts = attempt, %url, "rate limit retries exhausted");
                    return Err(PortalwatchError::RateLimitExceeded {
                        path: request.path.clone(),
                        attempts: attempt,
                    });
                }
                retries += 1;
                let delay = self.policy.delay_for(retries, request.retry_interval);
                warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "rate limited by portal API, retrying after delay"
                );
                self.sleeper.sleep(delay).await;
                continue;
            }

            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value.to_str().ok().map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let bytes = response
                .bytes()
                .await
                .map_err(|err| PortalwatchError::from(InfraError::from(err)))?;

            if !status.is_success() {
                return Err(RequestError::Status {
                    status: status.as_u16(),
                    url,
                    body: String::from_utf8_lossy(&bytes).into_owned(),
                }
                .into());
            }

            return Ok(RawResponse { status: status.as_u16(), headers, body: bytes.to_vec() });
        }
    }

    fn check_allowed(&self, request: &RequestDescriptor) -> Result<()> {
        if self.allow_list.permits(&request.path, request.method) {
            return Ok(());
        }

        Err(PortalwatchError::UnsupportedOperation {
            method: request.method,
            base_path: request.base_path(),
            allow_list: self.allow_list.to_string(),
        })
    }

    fn url_for(&self, credential: &Credential, path: &str) -> String {
        let path = if path.starts_with('/') { path.to_string() } else { format!("/{path}") };
        match &self.endpoint_override {
            Some(endpoint) => format!("{}{}", endpoint.trim_end_matches('/'), path),
            None => format!("https://{}{}", credential.tenant(), path),
        }
    }

    fn compose(
        &self,
        credential: &Credential,
        request: &RequestDescriptor,
        url: &str,
        body: Option<&[u8]>,
    ) -> RequestBuilder {
        let builder = self
            .client
            .request(to_reqwest_method(request.method), url)
            .header(AUTHORIZATION, credential.authorization_header())
            .header(CONTENT_TYPE, request.content_type.as_str());

        match body {
            Some(bytes) => builder.body(bytes.to_vec()),
            None => builder,
        }
    }
}

#[async_trait]
impl ApiTransport for RequestExecutor {
    async fn execute(
        &self,
        credential: &Credential,
        request: RequestDescriptor,
    ) -> Result<RawResponse> {
        self.send(credential, &request).await
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// Builder for [`RequestExecutor`].
pub struct RequestExecutorBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    allow_list: AllowList,
    policy: RateLimitPolicy,
    sleeper: Arc<dyn Sleeper>,
    endpoint_override: Option<String>,
}

impl Default for RequestExecutorBuilder {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: None,
            allow_list: AllowList::default(),
            policy: RateLimitPolicy::default(),
            sleeper: Arc::new(TokioSleeper),
            endpoint_override: None,
        }
    }
}

impl RequestExecutorBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn allow_list(mut self, allow_list: AllowList) -> Self {
        self.allow_list = allow_list;
        self
    }

    pub fn rate_limit_policy(mut self, policy: RateLimitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the sleeper used between rate-limited attempts.
    pub fn sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Send requests to `endpoint` instead of `https://{tenant}`.
    pub fn endpoint_override(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint_override = Some(endpoint.into());
        self
    }

    pub fn build(self) -> Result<RequestExecutor> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(|err| {
            PortalwatchError::Config(format!("failed to build HTTP client: {err}"))
        })?;

        Ok(RequestExecutor {
            client,
            allow_list: Arc::new(self.allow_list),
            policy: self.policy,
            sleeper: self.sleeper,
            endpoint_override: self.endpoint_override,
        })
    }
}
