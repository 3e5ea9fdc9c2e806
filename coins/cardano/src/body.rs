use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Reference to a UTXO being spent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    /// Hash of the transaction that created the output
    pub tx_hash: String,
    /// Index of the output within that transaction
    pub output_index: u32,
}

/// One transaction output: a destination address and the value it carries.
/// Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutput {
    /// Bech32 destination address
    pub address: String,
    /// Value carried by the output
    pub value: Value,
}

impl TxOutput {
    /// Convenience constructor.
    pub fn new(address: impl Into<String>, value: Value) -> Self {
        Self { address: address.into(), value }
    }
}

/// Staking certificates the builder can attach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Certificate {
    /// Registers the stake key (required before first delegation)
    StakeRegistration {
        /// Hex-encoded stake key hash
        stake_key_hash: String,
    },
    /// Delegates the stake key to a pool
    StakeDelegation {
        /// Hex-encoded stake key hash
        stake_key_hash: String,
        /// Hex-encoded pool key hash
        pool_key_hash: String,
    },
}

/// Labeled auxiliary payload attached outside the ledger-accounting
/// portion of the transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Numeric metadata label
    pub label: u64,
    /// Arbitrary JSON payload
    pub payload: serde_json::Value,
}

/// The complete transaction body handed to the codec collaborator for
/// serialization. The signature covers exactly this structure; the
/// orchestrator never rebuilds it after signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxBody {
    /// Spent inputs
    pub inputs: Vec<TxInput>,
    /// All outputs, including change splits and the final change
    pub outputs: Vec<TxOutput>,
    /// Fee in lovelace
    pub fee: u64,
    /// Staking certificates, usually empty
    pub certificates: Vec<Certificate>,
    /// Optional auxiliary data
    pub metadata: Option<Metadata>,
}
