//! # contract: collaborator seams for the reconciliation engine
//!
//! This module defines the traits the engine depends on (`Transport`,
//! `TokenProvider`) and the plain data types that cross those seams. The
//! engine itself never constructs an HTTP client or reads credentials; it is
//! handed capabilities and treats them as opaque.
//!
//! ## Interface & Extensibility
//! - Implement [`Transport`] for a new remote surface (real API, recorder,
//!   test double). All methods are async and return boxed error objects.
//! - Implement [`TokenProvider`] for a new credential source. The engine only
//!   asks for the token once per run, before any artifact is processed.
//!
//! ## Mocking & Testing
//! - Both traits are annotated for `mockall` so tests can generate
//!   deterministic mocks, including call-count enforcement for the
//!   "no network call" properties.

use async_trait::async_trait;
use serde::Deserialize;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::dispatch::OperationDescriptor;

/// Uniform boxed error for collaborator failures.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// One outgoing request: the engine supplies everything the transport needs
/// to address and describe the item, borrowed for the duration of the call.
#[derive(Debug, Clone)]
pub struct RequestPayload<'a> {
    pub workspace_id: &'a str,
    /// Deployment environment label (DEV/PROD), carried for audit fields.
    pub environment: &'a str,
    pub item_name: &'a str,
    pub item_type: &'a str,
    /// Raw file contents for publish operations; `None` for deletes.
    pub content: Option<&'a [u8]>,
    /// Remote item id for delete operations; `None` for publishes.
    pub item_id: Option<&'a str>,
}

/// HTTP-shaped result of one remote call. The engine interprets 200/201 as
/// success and uses the body only as an error message on anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/// An item already present in the target workspace, from the listing call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteItem {
    pub id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "type")]
    pub item_type: String,
}

/// Capability to reach the remote workspace API.
///
/// Implementations must not retry, redirect, or reinterpret responses: the
/// engine's error semantics rely on seeing the literal result of exactly one
/// attempt per call.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue one request described by `op` with the bearer token attached
    /// verbatim to the authorization header.
    async fn send<'a>(
        &self,
        op: &'a OperationDescriptor,
        payload: RequestPayload<'a>,
        token: &'a str,
    ) -> Result<ApiResponse, TransportError>;

    /// List the items currently present in the workspace.
    async fn list_items(
        &self,
        workspace_id: &str,
        token: &str,
    ) -> Result<Vec<RemoteItem>, TransportError>;
}

/// Capability to supply a bearer token. The engine treats the token as
/// opaque text.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait TokenProvider: Send + Sync {
    fn bearer_token(&self) -> Result<String, TransportError>;
}
