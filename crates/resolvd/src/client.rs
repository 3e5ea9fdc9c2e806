use resolvd_error::{Error, Result};
use resolvd_gateway::{ChainGateway, EthereumProviderConfig, GatewayConfig};
use resolvd_resolver::Resolver;
use serde_json::Value as Json;

/// The chains the dispatch surface knows about. Only Cardano (fully) and
/// Ethereum (lookup-only) are implemented; the rest are declared stubs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chain {
    /// Cardano (primary)
    Cardano,
    /// Ethereum (lookup + ENS)
    Ethereum,
    /// BNB Smart Chain (stub)
    Bsc,
    /// Polygon (stub)
    Polygon,
    /// Solana (stub)
    Solana,
}

impl std::str::FromStr for Chain {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        Ok(match name.to_ascii_lowercase().as_str() {
            "cardano" | "ada" => Chain::Cardano,
            "ethereum" | "eth" => Chain::Ethereum,
            "bsc" => Chain::Bsc,
            "polygon" | "matic" => Chain::Polygon,
            "solana" | "sol" => Chain::Solana,
            other => return Err(Error::ChainNotSupported(other.to_string())),
        })
    }
}

/// The top-level client: one gateway, one resolver, per-chain query
/// surfaces behind a single dispatch API.
#[derive(Debug, Clone)]
pub struct Resolvd {
    gateway: ChainGateway,
    resolver: Resolver,
    eth_provider: Option<EthereumProviderConfig>,
    #[cfg(feature = "cardano")]
    cardano: resolvd_cardano::CardanoChainData,
}

impl Resolvd {
    /// Builds a client from gateway configuration.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let gateway = ChainGateway::new(config)?;
        Ok(Self {
            resolver: Resolver::new(gateway.clone()),
            #[cfg(feature = "cardano")]
            cardano: resolvd_cardano::CardanoChainData::new(gateway.clone()),
            eth_provider: None,
            gateway,
        })
    }

    /// Enables Ethereum JSON-RPC (transaction lookup and ENS).
    pub fn with_eth_provider(mut self, provider: EthereumProviderConfig) -> Self {
        self.resolver = self.resolver.with_eth_provider(provider.clone());
        self.eth_provider = Some(provider);
        self
    }

    /// The shared gateway.
    pub fn gateway(&self) -> &ChainGateway {
        &self.gateway
    }

    /// The identifier resolver.
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// The Cardano query surface.
    #[cfg(feature = "cardano")]
    pub fn cardano(&self) -> &resolvd_cardano::CardanoChainData {
        &self.cardano
    }

    /// The Ethereum query surface, if a provider is configured.
    #[cfg(feature = "ethereum")]
    pub fn ethereum(&self) -> Result<resolvd_ethereum::EthereumChainData> {
        let provider = self.eth_provider.clone().ok_or(Error::MissingCredential(
            "ethereum provider (infura id, alchemy id, or explicit endpoint)",
        ))?;
        Ok(resolvd_ethereum::EthereumChainData::new(self.gateway.clone(), provider))
    }

    // ========================================================================
    // Resolution dispatch
    // ========================================================================

    /// Resolves an identifier to an address on the given chain.
    pub async fn resolve(&self, chain: Chain, identifier: &str) -> Result<String> {
        match chain {
            Chain::Cardano => self.resolver.resolve_ada(identifier).await,
            Chain::Ethereum => self.resolver.resolve_eth(identifier).await,
            Chain::Bsc => self.resolver.resolve_bsc(identifier).await,
            Chain::Polygon => self.resolver.resolve_matic(identifier).await,
            Chain::Solana => self.resolver.resolve_sol(identifier).await,
        }
    }

    // ========================================================================
    // Transaction lookup dispatch
    // ========================================================================

    /// Transaction record by hash, with explorer links, on any supported
    /// chain.
    pub async fn transaction_info(&self, chain: Chain, tx: &str) -> Result<Json> {
        match chain {
            #[cfg(feature = "cardano")]
            Chain::Cardano => Ok(serde_json::to_value(
                self.cardano.transaction_info(tx).await?,
            )?),
            #[cfg(feature = "ethereum")]
            Chain::Ethereum => Ok(serde_json::to_value(
                self.ethereum()?.transaction_info(tx).await?,
            )?),
            other => Err(unsupported(other)),
        }
    }

    /// One-shot confirmation check.
    pub async fn verify_tx_created(&self, chain: Chain, tx: &str) -> Result<bool> {
        match chain {
            #[cfg(feature = "cardano")]
            Chain::Cardano => Ok(resolvd_cardano::verify_tx_created(&self.cardano, tx).await),
            #[cfg(feature = "ethereum")]
            Chain::Ethereum => Ok(self.ethereum()?.verify_tx_created(tx).await),
            other => Err(unsupported(other)),
        }
    }

    /// Fixed-interval confirmation polling: query every `seconds` (20 s
    /// floor) up to `tries` attempts, stopping early on the first hit.
    pub async fn verify_tx_created_every(
        &self,
        chain: Chain,
        tx: &str,
        seconds: u64,
        tries: u32,
    ) -> Result<Json> {
        match chain {
            #[cfg(feature = "cardano")]
            Chain::Cardano => {
                let confirmation = resolvd_cardano::verify_tx_created_every(
                    &self.cardano,
                    tx,
                    resolvd_cardano::PollOptions { seconds, tries, cancel: None },
                )
                .await?;
                Ok(serde_json::to_value(confirmation)?)
            }
            #[cfg(feature = "ethereum")]
            Chain::Ethereum => {
                let confirmation = self
                    .ethereum()?
                    .verify_tx_created_every(
                        tx,
                        resolvd_ethereum::EthPollOptions { seconds, tries },
                    )
                    .await?;
                Ok(serde_json::to_value(confirmation)?)
            }
            other => Err(unsupported(other)),
        }
    }

    // ========================================================================
    // Transfer dispatch
    // ========================================================================

    /// Builds, signs and submits a transfer through the wallet named by
    /// `wallet_name`, choosing the path the wallet supports: the
    /// payment-intent wallet gets structured outputs, every other
    /// Cardano wallet goes through the full selection/builder pipeline.
    #[cfg(feature = "cardano")]
    pub async fn transfer(
        &self,
        wallet_name: &str,
        wallet: crate::wallets::WalletHandle<'_>,
        codec: &dyn resolvd_cardano::CardanoCodec,
        request: &resolvd_cardano::TransferRequest,
    ) -> Result<resolvd_cardano::TransactionReceipt> {
        use crate::wallets::{uses_payment_intent, wallet_chain, WalletHandle};

        match wallet_chain(wallet_name)? {
            Chain::Cardano => match wallet {
                WalletHandle::Intent(intent_wallet) if uses_payment_intent(wallet_name) => {
                    resolvd_cardano::submit_transfer_intent(
                        self.gateway.config().network,
                        intent_wallet,
                        request,
                    )
                    .await
                }
                WalletHandle::Hex(hex_wallet) => {
                    resolvd_cardano::submit_transfer(
                        &self.cardano,
                        codec,
                        hex_wallet,
                        request,
                        &mut rand::thread_rng(),
                    )
                    .await
                }
                _ => Err(Error::WalletNotSupported(format!(
                    "{wallet_name} (handle kind does not match the wallet's API)"
                ))),
            },
            other => Err(Error::WalletNotSupported(format!(
                "{wallet_name} (transfers are not implemented for {other:?})"
            ))),
        }
    }
}

fn unsupported(chain: Chain) -> Error {
    Error::ChainNotSupported(format!(
        "{chain:?} (transaction lookup supports cardano and ethereum)"
    ))
}
