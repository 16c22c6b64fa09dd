//! Port interfaces for the portal transport
//!
//! These traits define the boundary between core query logic and the HTTP
//! implementation in `portalwatch-infra`.

use async_trait::async_trait;
use portalwatch_domain::{Credential, RawResponse, RequestDescriptor, Result};

/// Trait for issuing one authenticated call against the portal API
///
/// Implementations validate the credential and the allow-list before any
/// network I/O, and handle rate-limit retries internally. Resource-specific
/// query wrappers call this with a path, method and optional body.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Execute a request and return the raw success response
    async fn execute(
        &self,
        credential: &Credential,
        request: RequestDescriptor,
    ) -> Result<RawResponse>;
}
