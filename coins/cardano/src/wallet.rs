use async_trait::async_trait;
use resolvd_error::{Error, Result};
use resolvd_gateway::{handle_policy, Network};
use serde::{Deserialize, Serialize};

use crate::body::Metadata;

/// The hex-in/hex-out browser wallet capability interface.
///
/// This is the boundary to the wallet extension: the SDK never touches
/// keys. Implementations are provided by the embedding application (or by
/// the in-memory wallet in the testing crate).
#[async_trait]
pub trait Cip30Wallet: Send + Sync {
    /// Spendable UTXOs, each hex-encoded in the wallet's binary format.
    async fn get_utxos(&self) -> Result<Vec<String>>;

    /// The wallet's change address (bech32).
    async fn get_change_address(&self) -> Result<String>;

    /// An unused receive address (bech32).
    async fn get_unused_address(&self) -> Result<String>;

    /// The wallet's reward (stake) address (bech32).
    async fn get_reward_address(&self) -> Result<String>;

    /// Network id: 0 testnet, 1 mainnet.
    async fn get_network_id(&self) -> Result<u8>;

    /// Signs the hex-encoded unsigned transaction, returning the
    /// hex-encoded witness set.
    async fn sign_transaction(&self, tx_hex: &str) -> Result<String>;

    /// Submits the hex-encoded signed transaction, returning the
    /// transaction hash.
    async fn submit_transaction(&self, tx_hex: &str) -> Result<String>;

    /// Native assets held by the wallet.
    async fn assets(&self) -> Result<Vec<WalletAsset>>;
}

/// One native asset held by a wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAsset {
    /// Minting policy id (56 hex chars)
    pub policy_id: String,
    /// Human-readable asset name
    pub asset_name: String,
    /// Hex-encoded asset name
    pub asset_hex: String,
    /// Quantity held
    pub quantity: u64,
}

/// The distinguished richer wallet: it accepts structured payment intents
/// and performs its own internal coin selection, bypassing this crate's
/// selector and builder entirely.
#[async_trait]
pub trait PaymentWallet: Send + Sync {
    /// Hands the wallet a structured payment intent; the wallet builds,
    /// signs and submits internally.
    async fn payment_transaction(&self, intent: PaymentIntent) -> Result<PaymentReceipt>;
}

/// A structured multi-output payment request for a [`PaymentWallet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Requested outputs
    pub outputs: Vec<IntentOutput>,
    /// Optional labeled auxiliary data
    pub metadata: Option<Metadata>,
}

/// One output of a payment intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentOutput {
    /// Destination address
    pub address: String,
    /// Lovelace amount as a decimal string; absent for token-only outputs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    /// Native assets carried by the output
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tokens: Vec<IntentToken>,
}

/// One native asset inside an intent output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentToken {
    /// Minting policy id
    pub policy_id: String,
    /// Hex-encoded asset name
    pub asset_name: String,
    /// Quantity as a decimal string
    pub amount: String,
}

/// The wallet's answer to a payment intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    /// Hash of the submitted transaction
    pub transaction_id: String,
}

// ============================================================================
// Wallet introspection
// ============================================================================

/// The wallet's change address, rejecting empty answers.
pub async fn change_address(wallet: &dyn Cip30Wallet) -> Result<String> {
    non_empty(wallet.get_change_address().await?)
}

/// An unused receive address, rejecting empty answers.
pub async fn unused_address(wallet: &dyn Cip30Wallet) -> Result<String> {
    non_empty(wallet.get_unused_address().await?)
}

/// The reward (stake) address, rejecting empty answers.
pub async fn reward_address(wallet: &dyn Cip30Wallet) -> Result<String> {
    non_empty(wallet.get_reward_address().await?)
}

/// The wallet's network, mapped from its numeric id.
pub async fn wallet_network(wallet: &dyn Cip30Wallet) -> Result<Network> {
    let id = wallet.get_network_id().await?;
    if id > 1 {
        return Err(Error::WalletNotSupported(format!("unknown network id {id}")));
    }
    Ok(Network::from_id(id))
}

/// All handles held by the wallet: assets under the network's handle
/// policy, `$`-prefixed.
pub async fn wallet_handles(wallet: &dyn Cip30Wallet, network: Network) -> Result<Vec<String>> {
    let policy = handle_policy(network);
    let handles: Vec<String> = wallet
        .assets()
        .await?
        .into_iter()
        .filter(|asset| asset.policy_id == policy)
        .map(|asset| format!("${}", asset.asset_name))
        .collect();
    if handles.is_empty() {
        return Err(Error::WalletHandleMissing);
    }
    Ok(handles)
}

/// Which asset field [`search_wallet_assets`] matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetField {
    /// Match the human-readable asset name
    AssetName,
    /// Match the hex-encoded asset name
    AssetHex,
    /// Match the minting policy id
    PolicyId,
}

/// Filters the wallet's assets by one field. A leading `%` in the query
/// switches from exact match to substring match.
pub async fn search_wallet_assets(
    wallet: &dyn Cip30Wallet,
    query: &str,
    field: AssetField,
) -> Result<Vec<WalletAsset>> {
    let (needle, contains) = match query.strip_prefix('%') {
        Some(rest) => (rest, true),
        None => (query, false),
    };
    let matched: Vec<WalletAsset> = wallet
        .assets()
        .await?
        .into_iter()
        .filter(|asset| {
            let haystack = match field {
                AssetField::AssetName => &asset.asset_name,
                AssetField::AssetHex => &asset.asset_hex,
                AssetField::PolicyId => &asset.policy_id,
            };
            if contains {
                haystack.contains(needle)
            } else {
                haystack == needle
            }
        })
        .collect();
    if matched.is_empty() {
        return Err(Error::AssetNotFound);
    }
    Ok(matched)
}

fn non_empty(address: String) -> Result<String> {
    if address.is_empty() {
        return Err(Error::WalletAddressMissing);
    }
    Ok(address)
}
