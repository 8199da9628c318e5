//! Registry trait and HTTP implementation

use crate::error::{RegistryError, Result};
use crate::request::{BlockchainRequest, CloudRequest, NodeRequest};
use async_trait::async_trait;
use catena_core::{Blockchain, Cloud, Node};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Node and chain types offered by a blockchain backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendInfo {
    #[serde(default)]
    pub chain_types: Vec<String>,

    #[serde(default)]
    pub node_types: Vec<String>,
}

/// Backend metadata keyed by backend name
pub type Backends = BTreeMap<String, BackendInfo>;

/// Operations offered by the resource registry
///
/// Each method is one request/response exchange. Callers are responsible for
/// confirming destructive calls with the operator beforehand.
#[async_trait]
pub trait Registry: Send + Sync {
    async fn list_clouds(&self) -> Result<Vec<Cloud>>;

    async fn create_cloud(&self, request: &CloudRequest) -> Result<()>;

    async fn cloud_types(&self) -> Result<Vec<String>>;

    async fn node_flavours(&self, cloud_id: &str) -> Result<Vec<String>>;

    /// Instances running in a cloud (jumpbox candidates)
    async fn instances(&self, cloud_id: &str) -> Result<Vec<String>>;

    async fn networks(&self, cloud_id: &str) -> Result<Vec<String>>;

    async fn list_blockchains(&self) -> Result<Vec<Blockchain>>;

    async fn get_blockchain(&self, id: &str) -> Result<Blockchain>;

    async fn create_blockchain(&self, request: &BlockchainRequest) -> Result<()>;

    /// Delete a blockchain, returning the registry's deletion result
    async fn remove_blockchain(&self, blockchain: &Blockchain) -> Result<Value>;

    async fn list_nodes(&self, blockchain: &Blockchain) -> Result<Vec<Node>>;

    async fn get_node(&self, blockchain: &Blockchain, id: &str) -> Result<Node>;

    /// Request a new node. The response is not inspected.
    async fn add_node(&self, blockchain: &Blockchain, request: &NodeRequest) -> Result<()>;

    async fn remove_node(&self, blockchain: &Blockchain, node: &Node) -> Result<()>;

    async fn backends_info(&self) -> Result<Backends>;
}

/// Registry client speaking JSON over HTTP
pub struct HttpRegistry {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRegistry {
    /// Create a client for the registry at `endpoint` (e.g. `http://localhost:1989`)
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let response = ensure_success(response).await?;
        decode(&url, response).await
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<reqwest::Response> {
        let url = self.url(path);
        tracing::debug!("POST {}", url);

        Ok(self.client.post(&url).json(body).send().await?)
    }

    async fn delete(&self, path: &str) -> Result<reqwest::Response> {
        let url = self.url(path);
        tracing::debug!("DELETE {}", url);

        let response = self.client.delete(&url).send().await?;
        ensure_success(response).await
    }
}

/// Turn a non-2xx response into [`RegistryError::Status`]
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    Err(RegistryError::Status {
        status: status.as_u16(),
        url,
        body: body.trim().to_string(),
    })
}

async fn decode<T: DeserializeOwned>(url: &str, response: reqwest::Response) -> Result<T> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|source| RegistryError::Decode {
        url: url.to_string(),
        source,
    })
}

#[async_trait]
impl Registry for HttpRegistry {
    async fn list_clouds(&self) -> Result<Vec<Cloud>> {
        self.get("/v1/clouds").await
    }

    async fn create_cloud(&self, request: &CloudRequest) -> Result<()> {
        let response = self.post("/v1/clouds", request).await?;
        ensure_success(response).await?;
        tracing::info!(name = %request.name, cloud_type = %request.cloud_type, "Created cloud");
        Ok(())
    }

    async fn cloud_types(&self) -> Result<Vec<String>> {
        self.get("/v1/clouds/types").await
    }

    async fn node_flavours(&self, cloud_id: &str) -> Result<Vec<String>> {
        self.get(&format!("/v1/clouds/{}/node_flavours", cloud_id))
            .await
    }

    async fn instances(&self, cloud_id: &str) -> Result<Vec<String>> {
        self.get(&format!("/v1/clouds/{}/instances", cloud_id)).await
    }

    async fn networks(&self, cloud_id: &str) -> Result<Vec<String>> {
        self.get(&format!("/v1/clouds/{}/networks", cloud_id)).await
    }

    async fn list_blockchains(&self) -> Result<Vec<Blockchain>> {
        self.get("/v1/chains").await
    }

    async fn get_blockchain(&self, id: &str) -> Result<Blockchain> {
        self.get(&format!("/v1/chains/{}", id)).await
    }

    async fn create_blockchain(&self, request: &BlockchainRequest) -> Result<()> {
        let response = self.post("/v1/chains", request).await?;
        ensure_success(response).await?;
        tracing::info!(name = %request.name, backend = %request.backend, "Created blockchain");
        Ok(())
    }

    async fn remove_blockchain(&self, blockchain: &Blockchain) -> Result<Value> {
        let path = format!("/v1/chains/{}", blockchain.id);
        let response = self.delete(&path).await?;
        let text = response.text().await?;
        tracing::info!(id = %blockchain.id, "Removed blockchain");

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        // The deletion already happened, so a plain text body is still a result
        Ok(serde_json::from_str(&text).unwrap_or_else(|e| {
            tracing::warn!(id = %blockchain.id, "Removal result is not JSON: {}", e);
            Value::String(text.trim().to_string())
        }))
    }

    async fn list_nodes(&self, blockchain: &Blockchain) -> Result<Vec<Node>> {
        self.get(&format!("/v1/chains/{}/nodes", blockchain.id))
            .await
    }

    async fn get_node(&self, blockchain: &Blockchain, id: &str) -> Result<Node> {
        self.get(&format!("/v1/chains/{}/nodes/{}", blockchain.id, id))
            .await
    }

    async fn add_node(&self, blockchain: &Blockchain, request: &NodeRequest) -> Result<()> {
        let response = self
            .post(&format!("/v1/chains/{}/nodes", blockchain.id), request)
            .await?;

        if !response.status().is_success() {
            tracing::warn!(
                status = response.status().as_u16(),
                "Registry did not accept node {}",
                request.name
            );
        } else {
            tracing::info!(blockchain = %blockchain.id, name = %request.name, "Requested node");
        }
        Ok(())
    }

    async fn remove_node(&self, blockchain: &Blockchain, node: &Node) -> Result<()> {
        self.delete(&format!("/v1/chains/{}/nodes/{}", blockchain.id, node.id))
            .await?;
        tracing::info!(blockchain = %blockchain.id, node = %node.id, "Removed node");
        Ok(())
    }

    async fn backends_info(&self) -> Result<Backends> {
        self.get("/v1/backends/").await
    }
}
