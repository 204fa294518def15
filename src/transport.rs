//! Production collaborators: reqwest transport against the Fabric REST item
//! surface, and the env-backed token provider.

use async_trait::async_trait;
use serde::Deserialize;
use std::env;
use tracing::debug;

use crate::contract::{ApiResponse, RemoteItem, RequestPayload, TokenProvider, Transport, TransportError};
use crate::dispatch::OperationDescriptor;

const DEFAULT_BASE_URL: &str = "https://api.fabric.microsoft.com/v1";

/// HTTP implementation of [`Transport`].
///
/// One request per call, no retries, no redirect handling beyond the client
/// defaults. The base URL is overridable for tests and sovereign clouds.
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Construct from the environment: `FABRIC_API_BASE_URL` when set,
    /// otherwise the public endpoint.
    pub fn new_from_env() -> Self {
        dotenvy::dotenv().ok();
        let base_url = env::var("FABRIC_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }
}

#[derive(Debug, Deserialize)]
struct ListItemsResponse {
    #[serde(default)]
    value: Vec<RemoteItem>,
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send<'a>(
        &self,
        op: &'a OperationDescriptor,
        payload: RequestPayload<'a>,
        token: &'a str,
    ) -> Result<ApiResponse, TransportError> {
        let request = match op.method {
            "DELETE" => {
                let item_id = payload.item_id.ok_or("delete operation requires an item id")?;
                let url = format!(
                    "{}/workspaces/{}/{}/{}",
                    self.base_url, payload.workspace_id, op.resource, item_id
                );
                debug!(%url, operation = op.description, "Issuing delete request");
                self.http.delete(url)
            }
            _ => {
                let url = format!(
                    "{}/workspaces/{}/{}",
                    self.base_url, payload.workspace_id, op.resource
                );
                // Item content travels as UTF-8 text in the definition part.
                let body = serde_json::json!({
                    "displayName": payload.item_name,
                    "type": payload.item_type,
                    "description": format!("Deployed from Git ({})", payload.environment),
                    "definition": payload.content.map(|content| serde_json::json!({
                        "parts": [{
                            "path": "content",
                            "payload": String::from_utf8_lossy(content),
                        }],
                    })),
                });
                debug!(%url, operation = op.description, item = payload.item_name, "Issuing publish request");
                self.http.post(url).json(&body)
            }
        };

        let response = request.bearer_auth(token).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }

    async fn list_items(
        &self,
        workspace_id: &str,
        token: &str,
    ) -> Result<Vec<RemoteItem>, TransportError> {
        let url = format!("{}/workspaces/{}/items", self.base_url, workspace_id);
        debug!(%url, "Listing workspace items");
        let response = self.http.get(url).bearer_auth(token).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("listing items failed with status {status}: {body}").into());
        }
        let listing: ListItemsResponse = response.json().await?;
        Ok(listing.value)
    }
}

/// Reads the bearer token from `FABRIC_TOKEN` (dotenv-loaded).
pub struct EnvTokenProvider {
    var: String,
}

impl EnvTokenProvider {
    pub fn new_from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            var: "FABRIC_TOKEN".to_string(),
        }
    }
}

impl TokenProvider for EnvTokenProvider {
    fn bearer_token(&self) -> Result<String, TransportError> {
        let token = env::var(&self.var)
            .map_err(|_| format!("environment variable {} is not set", self.var))?;
        Ok(token)
    }
}
