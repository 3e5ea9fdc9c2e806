use resolvd_error::{Error, Result};
use resolvd_gateway::{ChainGateway, EthereumProviderConfig};

use crate::ens::resolve_ens;
use crate::names::{ends_with_any, ipfs_gateway, UNSTOPPABLE_SUFFIXES};
use crate::validate::{is_cardano_address, is_ethereum_address, is_solana_address};

/// Turns arbitrary user-supplied identifiers into canonical addresses.
///
/// Each `resolve_*` method applies the same strict order and
/// short-circuits on the first success:
///
/// 1. a syntactically valid native address returns as-is, with no
///    network traffic
/// 2. a chain-specific handle (`$name` on Cardano) resolves through the
///    handle-asset registry
/// 3. a recognized name-service domain resolves through its service
/// 4. everything else falls back to the directory service; a directory
///    record holding a `$handle` recurses into step 2
///
/// No branch lets an error escape un-typed: every failure is one of the
/// not-found/validation variants.
#[derive(Debug, Clone)]
pub struct Resolver {
    gateway: ChainGateway,
    eth_provider: Option<EthereumProviderConfig>,
}

impl Resolver {
    /// A resolver over a gateway, without Ethereum JSON-RPC access (ENS
    /// lookups will report a missing credential).
    pub fn new(gateway: ChainGateway) -> Self {
        Self { gateway, eth_provider: None }
    }

    /// Enables ENS lookups through the given provider.
    pub fn with_eth_provider(mut self, provider: EthereumProviderConfig) -> Self {
        self.eth_provider = Some(provider);
        self
    }

    /// The underlying gateway.
    pub fn gateway(&self) -> &ChainGateway {
        &self.gateway
    }

    // ========================================================================
    // Per-chain resolution
    // ========================================================================

    /// Cardano: raw address → `$handle` → directory.
    pub async fn resolve_ada(&self, identifier: &str) -> Result<String> {
        if is_cardano_address(identifier) {
            return Ok(identifier.to_string());
        }
        if identifier.starts_with('$') {
            return self.resolve_handle(identifier).await;
        }
        self.directory_lookup("ada", identifier).await
    }

    /// Ethereum: raw address → Unstoppable domain → ENS → directory.
    pub async fn resolve_eth(&self, identifier: &str) -> Result<String> {
        if is_ethereum_address(identifier) {
            return Ok(identifier.to_string());
        }
        if ends_with_any(&UNSTOPPABLE_SUFFIXES, identifier) {
            return self
                .gateway
                .ud_address(identifier, "ETH")
                .await
                .map_err(|err| not_found_domain(identifier, err));
        }
        if identifier.ends_with(".eth") {
            return self.resolve_ens_domain(identifier).await;
        }
        self.directory_lookup("eth", identifier).await
    }

    /// BNB Smart Chain: raw address → directory.
    pub async fn resolve_bsc(&self, identifier: &str) -> Result<String> {
        if is_ethereum_address(identifier) {
            return Ok(identifier.to_string());
        }
        self.directory_lookup("bsc", identifier).await
    }

    /// Solana: raw address → directory.
    pub async fn resolve_sol(&self, identifier: &str) -> Result<String> {
        if is_solana_address(identifier) {
            return Ok(identifier.to_string());
        }
        self.directory_lookup("sol", identifier).await
    }

    /// Polygon: raw address → directory.
    pub async fn resolve_matic(&self, identifier: &str) -> Result<String> {
        if is_ethereum_address(identifier) {
            return Ok(identifier.to_string());
        }
        self.directory_lookup("matic", identifier).await
    }

    // ========================================================================
    // Handle / name-service branches
    // ========================================================================

    /// Resolves a `$handle` through the network-scoped handle-asset
    /// registry: the handle body is hex-encoded and looked up as an asset
    /// name under the handle policy.
    pub async fn resolve_handle(&self, handle: &str) -> Result<String> {
        let Some(body) = handle.strip_prefix('$') else {
            return Err(Error::InvalidHandle(handle.to_string()));
        };
        if body.is_empty() {
            return Err(Error::InvalidHandle(handle.to_string()));
        }
        let asset_name_hex = hex::encode(body.as_bytes());
        self.gateway
            .handle_address(&asset_name_hex)
            .await
            .map_err(|err| {
                tracing::debug!(handle, %err, "handle lookup failed");
                Error::HandleNotFound(handle.to_string())
            })
    }

    /// Resolves a `.eth` domain through the on-chain ENS registry.
    pub async fn resolve_ens_domain(&self, domain: &str) -> Result<String> {
        let Some(provider) = &self.eth_provider else {
            return Err(Error::MissingCredential(
                "ethereum provider (required for ENS lookups)",
            ));
        };
        resolve_ens(&self.gateway, provider, domain)
            .await
            .map_err(|err| match err {
                err @ (Error::InvalidDomain(_) | Error::DomainNotFound(_)) => err,
                other => not_found_domain(domain, other),
            })
    }

    // ========================================================================
    // Directory fallback
    // ========================================================================

    /// Looks the identifier up in the directory service under a chain
    /// symbol. A stored `$handle` is resolved one step further.
    pub async fn directory_lookup(&self, symbol: &str, identifier: &str) -> Result<String> {
        let record = self
            .gateway
            .art_domain_lookup(identifier)
            .await
            .map_err(|err| {
                tracing::debug!(identifier, %err, "directory lookup failed");
                Error::ResolverNotFound(symbol.to_uppercase())
            })?;
        match record.assets.get(symbol) {
            Some(stored) if stored.starts_with('$') => self.resolve_handle(stored).await,
            Some(stored) if !stored.is_empty() => Ok(stored.clone()),
            _ => Err(Error::ResolverNotFound(symbol.to_uppercase())),
        }
    }

    // ========================================================================
    // IPFS records
    // ========================================================================

    /// The IPFS content hash an identifier points at: Unstoppable
    /// Domains records first, directory records otherwise.
    pub async fn ipfs_hash(&self, identifier: &str) -> Result<String> {
        if ends_with_any(&UNSTOPPABLE_SUFFIXES, identifier) {
            return self
                .gateway
                .ud_ipfs_hash(identifier)
                .await
                .map_err(|err| not_found_domain(identifier, err));
        }
        self.directory_lookup("ipfs_hash", identifier).await
    }

    /// The content hash joined onto a named public gateway.
    pub async fn ipfs_url(&self, identifier: &str, gateway_name: &str) -> Result<String> {
        let prefix = ipfs_gateway(gateway_name).ok_or(Error::MissingCredential(
            "known ipfs gateway name (pinata, cloudflare, ipfs, dweb, cf, astyanax)",
        ))?;
        let hash = self.ipfs_hash(identifier).await?;
        Ok(format!("{prefix}{hash}"))
    }
}

fn not_found_domain(domain: &str, err: Error) -> Error {
    match err {
        err @ Error::MissingCredential(_) => err,
        _ => Error::DomainNotFound(domain.to_string()),
    }
}
