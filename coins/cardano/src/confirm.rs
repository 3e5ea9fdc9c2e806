use std::time::Duration;

use resolvd_error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use tokio::sync::watch;

use crate::chaindata::CardanoChainData;
use crate::config::ExplorerLinks;

/// Enforced floor for the polling interval.
pub const MIN_POLL_SECONDS: u64 = 20;

/// Default number of polling attempts.
pub const DEFAULT_POLL_TRIES: u32 = 45;

/// Controls for the confirmation polling loop.
#[derive(Debug, Clone)]
pub struct PollOptions {
    /// Seconds between attempts; must be at least [`MIN_POLL_SECONDS`]
    pub seconds: u64,
    /// Maximum number of attempts
    pub tries: u32,
    /// Optional cancellation flag; flipping it to `true` stops the loop
    /// at the next tick
    pub cancel: Option<watch::Receiver<bool>>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self { seconds: MIN_POLL_SECONDS, tries: DEFAULT_POLL_TRIES, cancel: None }
    }
}

/// A confirmed transaction as the polling loop reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Confirmation {
    /// Always true on success
    pub created: bool,
    /// Backend transaction record
    pub info: Json,
    /// Derived explorer URLs
    pub explorers: ExplorerLinks,
}

/// One-shot check: is the transaction visible on chain?
pub async fn verify_tx_created(chain: &CardanoChainData, tx: &str) -> bool {
    chain.transaction_info(tx).await.is_ok()
}

/// Polls for a transaction until it appears or the attempt budget runs
/// out.
///
/// This is the system's only retry construct: a fixed-interval loop with
/// no jitter and no backoff. The interval floor exists to keep pollers
/// from hammering the public indexers; anything below it is rejected
/// before the first query. Exhausting the budget (or cancellation)
/// reports not-found.
pub async fn verify_tx_created_every(
    chain: &CardanoChainData,
    tx: &str,
    mut options: PollOptions,
) -> Result<Confirmation> {
    if options.seconds < MIN_POLL_SECONDS {
        return Err(Error::InvalidPollInterval {
            min: MIN_POLL_SECONDS,
            got: options.seconds,
        });
    }
    let tries = options.tries.max(1);
    let interval = Duration::from_secs(options.seconds);

    for attempt in 1..=tries {
        match chain.transaction_info(tx).await {
            Ok(found) => {
                tracing::info!(%tx, attempt, "transaction confirmed");
                return Ok(Confirmation {
                    created: true,
                    info: found.info,
                    explorers: found.explorers,
                });
            }
            Err(err) => {
                tracing::debug!(%tx, attempt, %err, "transaction not yet visible");
            }
        }
        if attempt == tries {
            break;
        }
        match options.cancel.as_mut() {
            Some(cancel) => {
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    changed = cancel.changed() => {
                        if changed.is_err() || *cancel.borrow() {
                            tracing::debug!(%tx, "confirmation polling cancelled");
                            return Err(Error::TransactionNotFound(tx.to_string()));
                        }
                    }
                }
            }
            None => tokio::time::sleep(interval).await,
        }
    }

    Err(Error::TransactionNotFound(tx.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use resolvd_gateway::{ChainGateway, GatewayConfig, Network};

    fn offline_chain() -> CardanoChainData {
        // points at a closed port; every query fails fast
        let endpoints = resolvd_gateway::Endpoints {
            koios_mainnet: "http://127.0.0.1:9".into(),
            koios_testnet: "http://127.0.0.1:9".into(),
            ..Default::default()
        };
        let config = GatewayConfig::new(Network::Mainnet)
            .with_endpoints(endpoints)
            .with_request_delay_ms(0)
            .with_timeout_ms(200);
        CardanoChainData::new(ChainGateway::new(config).unwrap())
    }

    #[tokio::test]
    async fn test_interval_below_floor_rejected_without_polling() {
        let chain = offline_chain();
        let err = verify_tx_created_every(
            &chain,
            "aa00",
            PollOptions { seconds: 5, tries: 3, cancel: None },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::InvalidPollInterval { min: 20, got: 5 }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_loop() {
        let chain = offline_chain();
        let (tx_cancel, rx_cancel) = watch::channel(false);
        let handle = tokio::spawn({
            let chain = chain.clone();
            async move {
                verify_tx_created_every(
                    &chain,
                    "aa00",
                    PollOptions { seconds: 20, tries: 10, cancel: Some(rx_cancel) },
                )
                .await
            }
        });
        tx_cancel.send(true).unwrap();
        let result = handle.await.unwrap();
        assert!(matches!(result, Err(Error::TransactionNotFound(_))));
    }
}
