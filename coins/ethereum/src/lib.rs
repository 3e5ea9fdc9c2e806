//! # Resolvd Ethereum
//!
//! Thin Ethereum-family support for the resolvd SDK: transaction lookup
//! over JSON-RPC and the same fixed-interval confirmation polling
//! contract the Cardano crate honors. Transaction *construction* for EVM
//! chains is out of scope; BSC and Polygon are declared-but-unsupported
//! stubs that surface as configuration errors.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::time::Duration;

use resolvd_error::{Error, Result};
use resolvd_gateway::{ChainGateway, EthereumProviderConfig};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as Json};

/// Enforced floor for the polling interval, shared with the Cardano
/// polling contract.
pub const MIN_POLL_SECONDS: u64 = 20;

/// Default number of polling attempts.
pub const DEFAULT_POLL_TRIES: u32 = 45;

const ETHERSCAN_TX: &str = "https://etherscan.io/tx/";

/// Explorer links for an Ethereum transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EthExplorerLinks {
    /// Etherscan transaction page
    pub etherscan: String,
}

/// A transaction looked up by hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EthTransactionInfo {
    /// The JSON-RPC transaction object
    pub info: Json,
    /// Derived explorer URLs
    pub explorers: EthExplorerLinks,
}

/// Polling controls; same contract as the Cardano loop but without a
/// cancellation channel (this is the thin chain).
#[derive(Debug, Clone, Copy)]
pub struct EthPollOptions {
    /// Seconds between attempts; must be at least [`MIN_POLL_SECONDS`]
    pub seconds: u64,
    /// Maximum number of attempts
    pub tries: u32,
}

impl Default for EthPollOptions {
    fn default() -> Self {
        Self { seconds: MIN_POLL_SECONDS, tries: DEFAULT_POLL_TRIES }
    }
}

/// Ethereum chain queries over the gateway's JSON-RPC path.
#[derive(Debug, Clone)]
pub struct EthereumChainData {
    gateway: ChainGateway,
    provider: EthereumProviderConfig,
}

impl EthereumChainData {
    /// Binds a gateway to a JSON-RPC provider configuration.
    pub fn new(gateway: ChainGateway, provider: EthereumProviderConfig) -> Self {
        Self { gateway, provider }
    }

    /// Transaction record by hash via `eth_getTransactionByHash`.
    pub async fn transaction_info(&self, tx: &str) -> Result<EthTransactionInfo> {
        let result = self
            .gateway
            .eth_rpc(&self.provider, "eth_getTransactionByHash", json!([tx]))
            .await
            .map_err(|err| match err {
                err @ Error::MissingCredential(_) => err,
                Error::Api { message, .. } => Error::TransactionNotFound(message),
                other => other,
            })?;
        if result.is_null() {
            return Err(Error::TransactionNotFound(tx.to_string()));
        }
        Ok(EthTransactionInfo {
            info: result,
            explorers: EthExplorerLinks { etherscan: format!("{ETHERSCAN_TX}{tx}") },
        })
    }

    /// One-shot check: is the transaction known to the node?
    pub async fn verify_tx_created(&self, tx: &str) -> bool {
        self.transaction_info(tx).await.is_ok()
    }

    /// Fixed-interval polling until the transaction appears or the
    /// attempt budget runs out; intervals below the floor are rejected
    /// before the first query.
    pub async fn verify_tx_created_every(
        &self,
        tx: &str,
        options: EthPollOptions,
    ) -> Result<EthTransactionInfo> {
        if options.seconds < MIN_POLL_SECONDS {
            return Err(Error::InvalidPollInterval {
                min: MIN_POLL_SECONDS,
                got: options.seconds,
            });
        }
        let tries = options.tries.max(1);
        for attempt in 1..=tries {
            match self.transaction_info(tx).await {
                Ok(found) => {
                    tracing::info!(%tx, attempt, "transaction confirmed");
                    return Ok(found);
                }
                Err(err) => tracing::debug!(%tx, attempt, %err, "transaction not yet visible"),
            }
            if attempt < tries {
                tokio::time::sleep(Duration::from_secs(options.seconds)).await;
            }
        }
        Err(Error::TransactionNotFound(tx.to_string()))
    }
}

/// The error every BSC entry point reports until the chain is
/// implemented.
pub fn bsc_unsupported() -> Error {
    Error::ChainNotSupported("bsc (transaction lookup supports cardano and ethereum)".into())
}

/// The error every Polygon entry point reports until the chain is
/// implemented.
pub fn polygon_unsupported() -> Error {
    Error::ChainNotSupported("polygon (transaction lookup supports cardano and ethereum)".into())
}
