//! # Resolvd Resolver
//!
//! Maps arbitrary user-supplied identifiers — raw addresses, `$handles`,
//! name-service domains, directory names — to canonical on-chain
//! addresses, one resolution chain per supported network.
//!
//! The resolution order is strict and short-circuits on first success;
//! in particular a syntactically valid native address is returned without
//! issuing a single network request.
//!
//! ## Example
//!
//! ```no_run
//! use resolvd_gateway::{ChainGateway, GatewayConfig, Network};
//! use resolvd_resolver::Resolver;
//!
//! # async fn run() -> resolvd_error::Result<()> {
//! let gateway = ChainGateway::new(GatewayConfig::new(Network::Mainnet))?;
//! let resolver = Resolver::new(gateway);
//! let address = resolver.resolve_ada("$cardano").await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod ens;
mod names;
mod resolver;
mod validate;

pub use ens::{namehash, resolve_ens};
pub use names::{ends_with_any, ipfs_gateway, UNSTOPPABLE_SUFFIXES};
pub use resolver::Resolver;
pub use validate::{
    detect_chain, is_cardano_address, is_ethereum_address, is_solana_address,
    to_checksum_address, ChainModel, Detected,
};
