use resolvd_error::{Error, Result};
use resolvd_gateway::{ChainGateway, EthereumProviderConfig};
use serde_json::{json, Value};
use sha3::{Digest, Keccak256};

use crate::validate::to_checksum_address;

/// The ENS registry contract, fixed across deployments.
const ENS_REGISTRY: &str = "0x00000000000C2E074eC69A0dFb2997BA6C7d2e1e";
/// `resolver(bytes32)` selector
const SELECTOR_RESOLVER: &str = "0178b8bf";
/// `addr(bytes32)` selector
const SELECTOR_ADDR: &str = "3b3b57de";

/// EIP-137 namehash.
pub fn namehash(name: &str) -> [u8; 32] {
    let mut node = [0u8; 32];
    if name.is_empty() {
        return node;
    }
    for label in name.rsplit('.') {
        let mut hasher = Keccak256::new();
        hasher.update(label.as_bytes());
        let label_hash = hasher.finalize();

        let mut outer = Keccak256::new();
        outer.update(node);
        outer.update(label_hash);
        node = outer.finalize().into();
    }
    node
}

/// Resolves a `.eth` domain through the on-chain registry: look up the
/// domain's resolver contract, then ask it for the address record.
pub async fn resolve_ens(
    gateway: &ChainGateway,
    provider: &EthereumProviderConfig,
    domain: &str,
) -> Result<String> {
    if !domain.ends_with(".eth") {
        return Err(Error::InvalidDomain(format!("{domain} (expected a .eth name)")));
    }
    let node = hex::encode(namehash(domain));

    let resolver_word =
        eth_call(gateway, provider, ENS_REGISTRY, SELECTOR_RESOLVER, &node).await?;
    let resolver = word_to_address(&resolver_word)
        .ok_or_else(|| Error::DomainNotFound(domain.to_string()))?;

    let addr_word = eth_call(gateway, provider, &resolver, SELECTOR_ADDR, &node).await?;
    let address = word_to_address(&addr_word)
        .ok_or_else(|| Error::DomainNotFound(domain.to_string()))?;

    Ok(address)
}

async fn eth_call(
    gateway: &ChainGateway,
    provider: &EthereumProviderConfig,
    to: &str,
    selector: &str,
    node_hex: &str,
) -> Result<String> {
    let params = json!([
        { "to": to, "data": format!("0x{selector}{node_hex}") },
        "latest"
    ]);
    let result = gateway.eth_rpc(provider, "eth_call", params).await?;
    match result {
        Value::String(word) => Ok(word),
        other => Err(Error::Json(format!("unexpected eth_call result: {other}"))),
    }
}

/// Extracts the address from a 32-byte ABI word; `None` for the zero
/// address (ENS's "no record" marker) or malformed words.
fn word_to_address(word: &str) -> Option<String> {
    let body = word.strip_prefix("0x").unwrap_or(word);
    if body.len() != 64 || !body.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let tail = &body[24..];
    if tail.chars().all(|c| c == '0') {
        return None;
    }
    Some(to_checksum_address(tail))
}
