//! Alert query service - fetch and list modes over the transport port

use std::sync::Arc;
use std::time::Duration;

use portalwatch_domain::constants::{
    ALERTS_PATH, DEFAULT_RETRY_INTERVAL, LIST_DATA_FIELD, RECORD_IDENTITY_FIELD,
};
use portalwatch_domain::{
    is_alert_identity, AlertQuery, AlertQueryOutcome, AlertRecord, AliasOutcome, Credential,
    ListAlertsParams, PortalwatchError, RawResponse, RequestDescriptor, Result,
};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::request::{fetch_path, list_request_body};
use crate::transport::ports::ApiTransport;

/// Alert query service
pub struct AlertService {
    transport: Arc<dyn ApiTransport>,
    retry_interval: Duration,
}

impl AlertService {
    /// Create a new alert service over a transport
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport, retry_interval: DEFAULT_RETRY_INTERVAL }
    }

    /// Interval the transport waits between rate-limited attempts.
    pub fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    /// Run one query; the mode is fixed by the [`AlertQuery`] variant.
    pub async fn query(
        &self,
        credential: &Credential,
        query: AlertQuery,
    ) -> Result<AlertQueryOutcome> {
        match query {
            AlertQuery::Fetch { identity } => {
                self.fetch_alert(credential, &identity).await.map(AlertQueryOutcome::One)
            }
            AlertQuery::List(params) => {
                self.list_alerts(credential, &params).await.map(AlertQueryOutcome::Many)
            }
        }
    }

    /// Fetch a single alert by its 24 character hexadecimal identity.
    ///
    /// # Errors
    /// - `InvalidArgument` for a malformed identity (no request is sent)
    /// - `Query` wrapping transport or rate-limit failures
    /// - `InvalidResponse` when the body is not a JSON object
    #[instrument(skip(self, credential), fields(tenant = %credential.tenant()))]
    pub async fn fetch_alert(&self, credential: &Credential, identity: &str) -> Result<AlertRecord> {
        if !is_alert_identity(identity) {
            return Err(PortalwatchError::InvalidArgument(format!(
                "alert identity '{identity}' is not a 24 character hexadecimal identifier"
            )));
        }

        let request =
            RequestDescriptor::get(fetch_path(identity)).with_retry_interval(self.retry_interval);
        let response = self.call(credential, request).await?;

        let record = AlertRecord::from_value(response.json::<Value>()?)?;
        log_alias_fallback(&record);

        info!(identity, "fetched alert");
        Ok(record)
    }

    /// List alerts with optional filter, sort and paging.
    ///
    /// Returns at most `params.size` records in server order.
    ///
    /// # Errors
    /// - `InvalidArgument` when the parameters are invalid (no request is sent)
    /// - `Query` wrapping transport or rate-limit failures
    /// - `InvalidResponse` when the body is not JSON or `data` is not an array
    #[instrument(
        skip(self, credential, params),
        fields(tenant = %credential.tenant(), size = params.size, skip = params.skip)
    )]
    pub async fn list_alerts(
        &self,
        credential: &Credential,
        params: &ListAlertsParams,
    ) -> Result<Vec<AlertRecord>> {
        params.validate()?;

        let body = list_request_body(params);
        debug!(body = %body, "listing alerts");

        let request = RequestDescriptor::post(ALERTS_PATH, body)
            .with_retry_interval(self.retry_interval);
        let response = self.call(credential, request).await?;

        let mut records = parse_list_response(&response)?;
        if records.len() > params.size as usize {
            records.truncate(params.size as usize);
        }
        records.iter().for_each(log_alias_fallback);

        info!(count = records.len(), "listed alerts");
        Ok(records)
    }

    async fn call(
        &self,
        credential: &Credential,
        request: RequestDescriptor,
    ) -> Result<RawResponse> {
        self.transport.execute(credential, request).await.map_err(|err| match err {
            PortalwatchError::Request(_) | PortalwatchError::RateLimitExceeded { .. } => {
                warn!(error = %err, "alert query failed");
                PortalwatchError::query(err)
            }
            other => other,
        })
    }
}

fn parse_list_response(response: &RawResponse) -> Result<Vec<AlertRecord>> {
    let body: Value = response.json()?;

    match body.get(LIST_DATA_FIELD) {
        Some(Value::Array(items)) => {
            Ok(items.iter().cloned().map(AlertRecord::from_raw).collect())
        }
        Some(Value::Null) | None => {
            debug!("list response has no data field; returning no records");
            Ok(Vec::new())
        }
        Some(_) => Err(PortalwatchError::InvalidResponse(format!(
            "list response field '{LIST_DATA_FIELD}' is not an array"
        ))),
    }
}

fn log_alias_fallback(record: &AlertRecord) {
    match record.alias_outcome() {
        AliasOutcome::Added => {}
        AliasOutcome::AlreadyPresent => {
            debug!(field = RECORD_IDENTITY_FIELD, "record already has an alias field; left as is");
        }
        AliasOutcome::MissingId => {
            debug!(field = RECORD_IDENTITY_FIELD, "record has no _id; alias not added");
        }
        AliasOutcome::NotAnObject => {
            debug!(kind = record.kind(), "record is not a JSON object; returned unmodified");
        }
    }
}
