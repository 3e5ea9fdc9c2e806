use resolvd_error::{Error, Result};
use serde_json::Value;

use crate::client::{ApiResponse, HttpClient};
use crate::config::{Backend, Credentials, GatewayConfig};

/// The canonical body-shaping rule, applied uniformly to every indexer
/// response: a one-element JSON array unwraps to its element, anything
/// else passes through unchanged.
pub(crate) fn normalize(body: Value) -> Value {
    match body {
        Value::Array(mut items) if items.len() == 1 => items.remove(0),
        other => other,
    }
}

/// The chain data gateway.
///
/// One instance per network/credential pair. All indexer, directory,
/// name-service and JSON-RPC traffic goes through here so the fixed
/// request delay and timeout apply everywhere.
#[derive(Debug, Clone)]
pub struct ChainGateway {
    client: HttpClient,
    config: GatewayConfig,
}

impl ChainGateway {
    /// Creates a gateway from its configuration.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        config.validate()?;
        let client = HttpClient::new(config.request_delay_ms, config.timeout_ms)?;
        Ok(Self { client, config })
    }

    /// The gateway configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The backend serving indexer queries, derived from credentials.
    pub fn backend(&self) -> Backend {
        self.config.backend()
    }

    pub(crate) fn client(&self) -> &HttpClient {
        &self.client
    }

    // ========================================================================
    // Koios (free public indexer)
    // ========================================================================

    /// GET against the Koios API; `route` carries its own query string.
    pub async fn koios_get(&self, route: &str) -> Result<ApiResponse> {
        let url = format!("{}/{}", self.config.koios_base(), route);
        let response = self.client.get(&url, &[]).await?;
        Ok(ApiResponse { code: response.code, body: normalize(response.body) })
    }

    /// POST against the Koios API (bulk routes such as `tx_info`).
    pub async fn koios_post(&self, route: &str, body: Value) -> Result<ApiResponse> {
        let url = format!("{}/{}", self.config.koios_base(), route);
        let response = self.client.post(&url, &[], &body).await?;
        Ok(ApiResponse { code: response.code, body: normalize(response.body) })
    }

    // ========================================================================
    // Blockfrost (paid, project-id header)
    // ========================================================================

    /// GET against the Blockfrost API. Requires Blockfrost credentials.
    pub async fn blockfrost_get(&self, route: &str) -> Result<ApiResponse> {
        let Credentials::Blockfrost { project_id } = &self.config.credentials else {
            return Err(Error::MissingCredential("blockfrost project id"));
        };
        let url = format!("{}/{}", self.config.blockfrost_base(), route);
        let response = self
            .client
            .get(&url, &[("project_id", project_id.as_str())])
            .await?;
        Ok(ApiResponse { code: response.code, body: normalize(response.body) })
    }

    // ========================================================================
    // Tangocrypto (paid, app-id path + api-key header)
    // ========================================================================

    /// GET against the Tangocrypto API. Requires Tangocrypto credentials.
    pub async fn tangocrypto_get(&self, route: &str) -> Result<ApiResponse> {
        let Credentials::Tangocrypto { app_id, api_key } = &self.config.credentials else {
            return Err(Error::MissingCredential("tangocrypto app id and api key"));
        };
        let url = format!("{}/{}", self.config.tangocrypto_base(app_id), route);
        let response = self
            .client
            .get(&url, &[("x-api-key", api_key.as_str())])
            .await?;
        Ok(ApiResponse { code: response.code, body: normalize(response.body) })
    }
}
