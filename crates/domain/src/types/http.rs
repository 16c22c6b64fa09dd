//! Request and response types for the portal transport

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{DEFAULT_CONTENT_TYPE, DEFAULT_RETRY_INTERVAL};
use crate::errors::{PortalwatchError, Result};

/// HTTP methods accepted by the portal API
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[serde(alias = "Get", alias = "get")]
    Get,
    #[serde(alias = "Post", alias = "post")]
    Post,
    #[serde(alias = "Put", alias = "put")]
    Put,
    #[serde(alias = "Delete", alias = "delete")]
    Delete,
}

impl HttpMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = PortalwatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            _ => Err(PortalwatchError::InvalidArgument(format!("unsupported HTTP method: {s}"))),
        }
    }
}

/// Base path of a request path: its first three non-empty segments.
///
/// `/api/v1/alerts/572caf4588011e452ec18ef0/` → `/api/v1/alerts/`.
/// Paths with fewer segments yield what they have (`/api/` for `/api`).
pub fn base_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).take(3).collect();
    if segments.is_empty() {
        return "/".to_string();
    }
    format!("/{}/", segments.join("/"))
}

/// Static table of the methods permitted per base path.
///
/// Lookups are exact: no wildcard or prefix matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllowList(BTreeMap<String, BTreeSet<HttpMethod>>);

impl AllowList {
    /// Empty allow-list; nothing is permitted.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Add (or extend) an entry.
    pub fn with_entry(
        mut self,
        base_path: impl Into<String>,
        methods: impl IntoIterator<Item = HttpMethod>,
    ) -> Self {
        self.0.entry(base_path.into()).or_default().extend(methods);
        self
    }

    /// Methods permitted for an exact base path.
    pub fn methods_for(&self, base_path: &str) -> Option<&BTreeSet<HttpMethod>> {
        self.0.get(base_path)
    }

    /// Whether `method` may be used against `path` (any depth below its base).
    pub fn permits(&self, path: &str, method: HttpMethod) -> bool {
        self.methods_for(&base_path(path)).is_some_and(|methods| methods.contains(&method))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<HttpMethod>)> {
        self.0.iter()
    }
}

impl Default for AllowList {
    fn default() -> Self {
        use HttpMethod::{Delete, Get, Post, Put};

        Self::empty()
            .with_entry("/api/v1/alerts/", [Get, Post])
            .with_entry("/api/v1/activities/", [Get, Post])
            .with_entry("/api/v1/files/", [Get, Post])
            .with_entry("/api/v1/entities/", [Get, Post])
            .with_entry("/api/v1/discovery/", [Get, Post])
            .with_entry("/api/v1/subnet/", [Get, Post, Put, Delete])
            .with_entry("/api/v1/manage_admin_access/", [Get, Post, Delete])
    }
}

impl fmt::Display for AllowList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (path, methods) in &self.0 {
            let methods: Vec<&str> = methods.iter().map(|m| m.as_str()).collect();
            writeln!(f, "  {path}: {}", methods.join(", "))?;
        }
        Ok(())
    }
}

/// One call to the portal API, built fresh per request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub path: String,
    pub method: HttpMethod,
    pub body: Option<Value>,
    pub content_type: String,
    pub retry_interval: Duration,
}

impl RequestDescriptor {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            body: None,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            retry_interval: DEFAULT_RETRY_INTERVAL,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Post, path).with_body(body)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    pub fn base_path(&self) -> String {
        base_path(&self.path)
    }
}

/// Raw HTTP response handed back by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self { status, headers: Vec::new(), body: body.into() }
    }

    /// First header value with a case-insensitive name match.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserialize the body as JSON.
    ///
    /// # Errors
    /// Returns `PortalwatchError::InvalidResponse` when the body is not valid
    /// JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| {
            PortalwatchError::InvalidResponse(format!(
                "failed to parse response body (status {}): {e}",
                self.status
            ))
        })
    }
}
