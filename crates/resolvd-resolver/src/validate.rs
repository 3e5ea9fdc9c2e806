use sha3::{Digest, Keccak256};

/// Syntactic check for a Shelley-era Cardano payment address: bech32
/// decodes cleanly under the `addr` / `addr_test` prefix.
pub fn is_cardano_address(address: &str) -> bool {
    if !address.starts_with("addr") {
        return false;
    }
    match bech32::decode(address) {
        Ok((hrp, data)) => {
            let hrp = hrp.as_str();
            (hrp == "addr" || hrp == "addr_test") && !data.is_empty()
        }
        Err(_) => false,
    }
}

/// Syntactic check for an Ethereum address: `0x` + 40 hex digits, with
/// the EIP-55 checksum verified whenever the address is mixed-case.
pub fn is_ethereum_address(address: &str) -> bool {
    let Some(body) = address.strip_prefix("0x") else {
        return false;
    };
    if body.len() != 40 || !body.chars().all(|c| c.is_ascii_hexdigit()) {
        return false;
    }
    let has_lower = body.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = body.chars().any(|c| c.is_ascii_uppercase());
    if !has_lower || !has_upper {
        // single-case addresses carry no checksum
        return true;
    }
    to_checksum_address(body) == address
}

/// EIP-55 checksum encoding of a 40-hex-digit address body.
pub fn to_checksum_address(body: &str) -> String {
    let lower = body.to_ascii_lowercase();
    let mut hasher = Keccak256::new();
    hasher.update(lower.as_bytes());
    let hash = hasher.finalize();

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = if i % 2 == 0 { hash[i / 2] >> 4 } else { hash[i / 2] & 0x0F };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Syntactic check for a Solana address: base58 decoding to exactly 32
/// bytes.
pub fn is_solana_address(address: &str) -> bool {
    match bs58::decode(address).into_vec() {
        Ok(bytes) => bytes.len() == 32,
        Err(_) => false,
    }
}

/// Chains an address can be recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainModel {
    /// Cardano
    Ada,
    /// Ethereum
    Eth,
    /// BNB Smart Chain (Ethereum address format)
    Bsc,
    /// Polygon (Ethereum address format)
    Matic,
    /// Solana
    Sol,
}

impl std::fmt::Display for ChainModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ChainModel::Ada => "ada",
            ChainModel::Eth => "eth",
            ChainModel::Bsc => "bsc",
            ChainModel::Matic => "matic",
            ChainModel::Sol => "sol",
        };
        write!(f, "{name}")
    }
}

/// A recognized address with its chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detected {
    /// The address as supplied
    pub address: String,
    /// The chain it parses as
    pub model: ChainModel,
}

/// Recognizes which chain an address belongs to, trying Cardano, then
/// Ethereum, then Solana.
///
/// EVM addresses are indistinguishable across Ethereum-family chains;
/// `eth_target` lets callers label a match as BSC or Polygon instead of
/// the Ethereum default.
pub fn detect_chain(address: &str, eth_target: Option<ChainModel>) -> Option<Detected> {
    if is_cardano_address(address) {
        return Some(Detected { address: address.to_string(), model: ChainModel::Ada });
    }
    if is_ethereum_address(address) {
        let model = match eth_target {
            Some(target @ (ChainModel::Bsc | ChainModel::Matic)) => target,
            _ => ChainModel::Eth,
        };
        return Some(Detected { address: address.to_string(), model });
    }
    if is_solana_address(address) {
        return Some(Detected { address: address.to_string(), model: ChainModel::Sol });
    }
    None
}
