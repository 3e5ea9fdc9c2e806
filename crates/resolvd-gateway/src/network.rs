use serde::{Deserialize, Serialize};

/// Network discriminator carried by every chain query.
///
/// The wire protocols encode this as `0` (testnet) / `1` (mainnet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    /// Test network (id 0)
    Testnet,
    /// Main network (id 1)
    Mainnet,
}

impl Network {
    /// Numeric network id as used by wallets and explorers.
    pub fn id(self) -> u8 {
        match self {
            Network::Testnet => 0,
            Network::Mainnet => 1,
        }
    }

    /// Maps a wallet-reported network id; anything other than 0 is mainnet.
    pub fn from_id(id: u8) -> Self {
        if id == 0 {
            Network::Testnet
        } else {
            Network::Mainnet
        }
    }

    /// True for [`Network::Mainnet`].
    pub fn is_mainnet(self) -> bool {
        matches!(self, Network::Mainnet)
    }
}

impl Default for Network {
    fn default() -> Self {
        Network::Mainnet
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Network::Testnet => write!(f, "testnet"),
            Network::Mainnet => write!(f, "mainnet"),
        }
    }
}
