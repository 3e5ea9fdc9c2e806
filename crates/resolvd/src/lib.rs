//! # Resolvd — Multi-Chain Address Resolution and Transfers
//!
//! Resolvd turns human-friendly identifiers (handles, name-service
//! domains, directory names, raw addresses) into canonical on-chain
//! addresses, and assembles, signs and submits funds transfers through a
//! connected wallet. Cardano is the primary chain; Ethereum-family
//! support is a thin lookup layer.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `cardano` | Cardano resolution, queries and transaction pipeline |
//! | `ethereum` | Ethereum transaction lookup + ENS |
//! | `all-chains` | Everything above |
//!
//! ## Quick Start
//!
//! ```no_run
//! use resolvd::{Chain, GatewayConfig, Network, Resolvd};
//!
//! # async fn run() -> resolvd::Result<()> {
//! let client = Resolvd::new(GatewayConfig::new(Network::Mainnet))?;
//!
//! // handle → address
//! let address = client.resolve(Chain::Cardano, "$cardano").await?;
//! println!("{address}");
//!
//! // transaction lookup with explorer links
//! let tx = client
//!     .transaction_info(Chain::Cardano, "f1e2d3c4b5a697887766554433221100")
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use resolvd_error::{Error, ErrorKind, Result};
pub use resolvd_gateway::{
    Backend, ChainGateway, Credentials, Endpoints, EthereumProviderConfig, GatewayConfig, Network,
};
pub use resolvd_resolver::{detect_chain, ChainModel, Detected, Resolver};

/// Cardano chain support
#[cfg(feature = "cardano")]
pub mod cardano {
    pub use resolvd_cardano::*;
}

/// Ethereum chain support
#[cfg(feature = "ethereum")]
pub mod ethereum {
    pub use resolvd_ethereum::*;
}

mod client;
mod wallets;

pub use client::{Chain, Resolvd};
pub use wallets::{
    uses_payment_intent, wallet_chain, WalletHandle, CARDANO_WALLETS, ETHEREUM_WALLETS,
    PAYMENT_INTENT_WALLET, SOLANA_WALLETS,
};
