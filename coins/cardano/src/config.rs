use resolvd_gateway::Network;
use serde::{Deserialize, Serialize};

/// Lovelace is the smallest unit (1 ADA = 1,000,000 Lovelace)
pub const LOVELACE_PER_ADA: u64 = 1_000_000;

/// Converts a caller-supplied ADA amount to lovelace, truncating
/// sub-lovelace precision.
pub fn ada_to_lovelace(ada: f64) -> u64 {
    (ada * LOVELACE_PER_ADA as f64).floor() as u64
}

/// Converts lovelace to ADA.
pub fn lovelace_to_ada(lovelace: u64) -> f64 {
    lovelace as f64 / LOVELACE_PER_ADA as f64
}

const EXPLORER_CARDANO: [&str; 2] = [
    "https://explorer.cardano-testnet.iohkdev.io/en/transaction?id=",
    "https://explorer.cardano.org/en/transaction?id=",
];
const EXPLORER_CARDANOSCAN: [&str; 2] = [
    "https://testnet.cardanoscan.io/transaction/",
    "https://cardanoscan.io/transaction/",
];
const EXPLORER_ADAEX: [&str; 2] = [
    "https://testnet.adaex.org/transaction/",
    "https://adaex.org/transaction/",
];

/// Derived explorer URLs for a transaction hash. Never fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerLinks {
    /// IOHK Cardano explorer
    pub cardano: String,
    /// Cardanoscan
    pub cardanoscan: String,
    /// ADAex
    pub adaex: String,
}

/// Builds the explorer link set for a transaction on a network.
pub fn explorer_links(network: Network, tx: &str) -> ExplorerLinks {
    let idx = network.id() as usize;
    ExplorerLinks {
        cardano: format!("{}{tx}", EXPLORER_CARDANO[idx]),
        cardanoscan: format!("{}{tx}", EXPLORER_CARDANOSCAN[idx]),
        adaex: format!("{}{tx}", EXPLORER_ADAEX[idx]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ada_to_lovelace_truncates() {
        assert_eq!(ada_to_lovelace(1.0), 1_000_000);
        assert_eq!(ada_to_lovelace(0.5), 500_000);
        assert_eq!(ada_to_lovelace(1.000_000_9), 1_000_000);
    }

    #[test]
    fn test_explorer_links_keyed_by_network() {
        let mainnet = explorer_links(Network::Mainnet, "abc123");
        assert_eq!(mainnet.cardanoscan, "https://cardanoscan.io/transaction/abc123");
        let testnet = explorer_links(Network::Testnet, "abc123");
        assert!(testnet.cardanoscan.contains("testnet"));
        assert!(testnet.adaex.ends_with("abc123"));
    }
}
