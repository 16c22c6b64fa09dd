//! Shared test helpers for `portalwatch-core` integration tests.
//!
//! `ScriptedTransport` replays queued responses and records every request it
//! receives so tests can assert on paths, methods and bodies without a
//! network.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use portalwatch_core::ApiTransport;
use portalwatch_domain::{Credential, RawResponse, RequestDescriptor, Result};
use serde_json::Value;

pub const TENANT: &str = "contoso.portal.cloudappsecurity.com";
pub const TOKEN: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";
pub const ALERT_ID: &str = "572caf4588011e452ec18ef0";

pub fn credential() -> Credential {
    Credential::new(TENANT, TOKEN)
}

/// Transport double that returns scripted results in order.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<RawResponse>>>,
    requests: Mutex<Vec<RequestDescriptor>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_json(self, status: u16, body: Value) -> Self {
        self.respond(Ok(RawResponse::new(status, body.to_string())))
    }

    pub fn respond(self, result: Result<RawResponse>) -> Self {
        self.responses.lock().unwrap().push_back(result);
        self
    }

    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ApiTransport for ScriptedTransport {
    async fn execute(
        &self,
        _credential: &Credential,
        request: RequestDescriptor,
    ) -> Result<RawResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(RawResponse::new(200, "{}")))
    }
}
