use resolvd_error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::backend::ChainGateway;

/// Provider credentials for Ethereum-family JSON-RPC endpoints.
///
/// Exactly one source is needed; they are tried in declaration order.
#[derive(Debug, Clone, Default)]
pub struct EthereumProviderConfig {
    /// Infura project id
    pub infura_id: Option<String>,
    /// Alchemy API key
    pub alchemy_id: Option<String>,
    /// Fully specified endpoint, overriding the hosted providers
    pub endpoint: Option<String>,
}

impl EthereumProviderConfig {
    /// Config backed by an Infura project id.
    pub fn infura(id: impl Into<String>) -> Self {
        Self { infura_id: Some(id.into()), ..Default::default() }
    }

    /// Config backed by an Alchemy API key.
    pub fn alchemy(id: impl Into<String>) -> Self {
        Self { alchemy_id: Some(id.into()), ..Default::default() }
    }

    /// Config pointing at an explicit JSON-RPC endpoint.
    pub fn endpoint(url: impl Into<String>) -> Self {
        Self { endpoint: Some(url.into()), ..Default::default() }
    }

    /// The JSON-RPC URL this configuration resolves to.
    pub fn provider_url(&self) -> Result<String> {
        if let Some(url) = &self.endpoint {
            return Ok(url.clone());
        }
        if let Some(id) = &self.infura_id {
            return Ok(format!("https://mainnet.infura.io/v3/{id}"));
        }
        if let Some(id) = &self.alchemy_id {
            return Ok(format!("https://eth-mainnet.alchemyapi.io/v2/{id}"));
        }
        Err(Error::MissingCredential(
            "ethereum provider (infura id, alchemy id, or explicit endpoint)",
        ))
    }
}

/// JSON-RPC request payload
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version
    pub jsonrpc: &'static str,
    /// Method name
    pub method: String,
    /// Parameters
    pub params: Value,
    /// Request ID
    pub id: u64,
}

impl JsonRpcRequest {
    /// Creates a new JSON-RPC request.
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self { jsonrpc: "2.0", method: method.into(), params, id: 1 }
    }
}

/// JSON-RPC response payload
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    /// Result (if successful)
    pub result: Option<Value>,
    /// Error (if failed)
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error object
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcError {
    /// Error code
    pub code: i64,
    /// Error message
    pub message: String,
}

impl ChainGateway {
    /// Issues a JSON-RPC call against the provider the config resolves to.
    ///
    /// A response-level error object becomes [`Error::Api`]; a missing
    /// `result` is reported the same way.
    pub async fn eth_rpc(
        &self,
        provider: &EthereumProviderConfig,
        method: &str,
        params: Value,
    ) -> Result<Value> {
        let url = provider.provider_url()?;
        let request = serde_json::to_value(JsonRpcRequest::new(method, params))?;
        let response = self.client().post(&url, &[], &request).await?;
        let rpc: JsonRpcResponse = serde_json::from_value(response.body)?;
        if let Some(error) = rpc.error {
            return Err(Error::Api { code: 404, message: error.message });
        }
        rpc.result.ok_or(Error::Api { code: 404, message: "no result in response".into() })
    }
}
