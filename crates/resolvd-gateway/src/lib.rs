//! # Resolvd Gateway
//!
//! The chain data gateway for the resolvd SDK. It unifies the alternate
//! indexer backends (the free public Koios indexer and the API-key
//! Blockfrost/Tangocrypto indexers) behind one request surface, and hosts
//! the other outbound HTTP collaborators: the ART directory service, the
//! Unstoppable Domains resolution API, and Ethereum JSON-RPC providers.
//!
//! Backend choice is a pure function of the supplied [`Credentials`] —
//! callers never name a backend directly. Every response is normalized to
//! an [`ApiResponse`] with one canonical body-shaping rule; network and
//! timeout failures surface as errors that callers convert to their
//! not-found envelopes. The gateway itself never retries: retry and
//! polling policy belong to the orchestration layer.
//!
//! ## Example
//!
//! ```no_run
//! use resolvd_gateway::{ChainGateway, GatewayConfig, Network};
//!
//! # async fn run() -> resolvd_error::Result<()> {
//! let gateway = ChainGateway::new(GatewayConfig::new(Network::Mainnet))?;
//! let tip = gateway.koios_get("tip").await?;
//! println!("{}", tip.body);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod art;
mod backend;
mod client;
mod config;
mod ethrpc;
mod handle;
mod network;
mod unstoppable;

pub use art::DirectoryRecord;
pub use backend::ChainGateway;
pub use client::{ApiResponse, HttpClient};
pub use config::{select_backend, Backend, Credentials, Endpoints, GatewayConfig};
pub use ethrpc::{EthereumProviderConfig, JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use handle::{handle_policy, ADAHANDLE_POLICY_MAINNET, ADAHANDLE_POLICY_TESTNET};
pub use network::Network;
