use resolvd_error::{Error, Result};
use serde_json::{json, Value};

use crate::backend::ChainGateway;
use crate::config::Backend;
use crate::network::Network;

/// Testnet AdaHandle minting policy id.
pub const ADAHANDLE_POLICY_TESTNET: &str =
    "8d18d786e92776c824607fd8e193ec535c79dc61ea2405ddf3b09fe3";
/// Mainnet AdaHandle minting policy id.
pub const ADAHANDLE_POLICY_MAINNET: &str =
    "f0ff48bbb7bbe9d59a40f1ce90e9e9d0ff5002ec48f232b49ca0fb9a";

/// The handle policy id for a network.
pub fn handle_policy(network: Network) -> &'static str {
    match network {
        Network::Testnet => ADAHANDLE_POLICY_TESTNET,
        Network::Mainnet => ADAHANDLE_POLICY_MAINNET,
    }
}

impl ChainGateway {
    /// Resolves the address currently holding the handle asset.
    ///
    /// `asset_name_hex` is the hex-encoded handle body (no `$`). The paid
    /// backends serve the asset-address route directly; Tangocrypto falls
    /// back to the public indexer when its route fails.
    pub async fn handle_address(&self, asset_name_hex: &str) -> Result<String> {
        let policy = handle_policy(self.config().network);
        match self.backend() {
            Backend::Blockfrost => {
                let route = format!("assets/{policy}{asset_name_hex}/addresses");
                let response = self.blockfrost_get(&route).await?;
                extract_address(&response.body, &["address"])
            }
            Backend::Tangocrypto => {
                let route = format!("assets/{policy}{asset_name_hex}/addresses");
                match self.tangocrypto_get(&route).await {
                    Ok(response) if response.is_success() => {
                        extract_address(&response.body, &["address"])
                    }
                    _ => {
                        tracing::debug!(asset_name_hex, "tangocrypto handle route failed, using public indexer");
                        self.koios_handle_address(policy, asset_name_hex).await
                    }
                }
            }
            Backend::Koios => self.koios_handle_address(policy, asset_name_hex).await,
        }
    }

    async fn koios_handle_address(&self, policy: &str, asset_name_hex: &str) -> Result<String> {
        let route =
            format!("asset_address_list?_asset_policy={policy}&_asset_name={asset_name_hex}");
        let response = self.koios_get(&route).await?;
        extract_address(&response.body, &["payment_address"])
    }
}

fn extract_address(body: &Value, keys: &[&str]) -> Result<String> {
    for key in keys {
        if let Some(address) = body.get(key).and_then(Value::as_str) {
            return Ok(address.to_string());
        }
        // lists that the canonical normalization left intact
        if let Some(address) = body
            .get(0)
            .and_then(|entry| entry.get(key))
            .and_then(Value::as_str)
        {
            return Ok(address.to_string());
        }
    }
    Err(Error::Api { code: 404, message: "no owning address in asset record".into() })
}
