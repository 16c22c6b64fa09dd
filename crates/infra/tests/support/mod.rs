//! Shared helpers for `portalwatch-infra` integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use portalwatch_domain::Credential;
use portalwatch_infra::{RequestExecutor, Sleeper};
use wiremock::MockServer;

pub const TENANT: &str = "contoso.portal.cloudappsecurity.com";
pub const TOKEN: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";
pub const ALERT_ID: &str = "572caf4588011e452ec18ef0";

pub fn credential() -> Credential {
    Credential::new(TENANT, TOKEN)
}

/// Sleeper that records requested delays instead of waiting.
#[derive(Default)]
pub struct RecordingSleeper {
    calls: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn calls(&self) -> Vec<Duration> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.calls.lock().unwrap().push(duration);
    }
}

/// Executor pointed at a mock server with a recording sleeper.
pub fn executor_for(server: &MockServer) -> (RequestExecutor, Arc<RecordingSleeper>) {
    let sleeper = Arc::new(RecordingSleeper::default());
    let executor = RequestExecutor::builder()
        .endpoint_override(server.uri())
        .sleeper(sleeper.clone())
        .build()
        .expect("executor should build");
    (executor, sleeper)
}
