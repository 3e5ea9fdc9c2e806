//! # Resolvd Testing Infrastructure
//!
//! Test doubles for the resolvd SDK:
//!
//! - [`StubCodec`] — a deterministic stand-in for the binary value codec
//!   collaborator, with stable size accounting and a JSON body encoding
//!   so decode/assemble round-trip honestly
//! - [`MemoryWallet`] — an in-memory hex-capability wallet with canned
//!   UTXOs, scripted signing/submission answers, and call counters
//! - [`MemoryPaymentWallet`] — a recording payment-intent wallet
//! - fixture builders for UTXOs and protocol parameters
//!
//! Everything here is deterministic: the same inputs always produce the
//! same bytes, sizes and answers, which the builder's change-splitting
//! and size-validation tests rely on.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use resolvd_cardano::{
    AssetAmount, CardanoCodec, Certificate, Cip30Wallet, PaymentIntent, PaymentReceipt,
    PaymentWallet, ProtocolParameters, TxBody, Utxo, Value, WalletAsset, LOVELACE,
};
use resolvd_error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;

// ============================================================================
// Stub codec
// ============================================================================

/// Deterministic codec stand-in.
///
/// Sizes follow a compact-binary estimate (9 bytes per quantity, 28 per
/// policy id); bodies and UTXOs are carried as JSON so decoding is an
/// honest inverse of encoding.
#[derive(Debug, Default, Clone)]
pub struct StubCodec;

impl StubCodec {
    /// Creates the codec.
    pub fn new() -> Self {
        Self
    }

    /// Encodes a UTXO in the format [`CardanoCodec::decode_utxo`] reads.
    pub fn encode_utxo(&self, utxo: &Utxo) -> Vec<u8> {
        let wire = UtxoWire {
            tx_hash: utxo.tx_hash.clone(),
            output_index: utxo.output_index,
            address: utxo.address.clone(),
            amount: utxo.value.flatten(),
        };
        serde_json::to_vec(&wire).unwrap_or_default()
    }

    /// Hex form of [`StubCodec::encode_utxo`], as wallets hand it over.
    pub fn encode_utxo_hex(&self, utxo: &Utxo) -> String {
        hex::encode(self.encode_utxo(utxo))
    }

    fn body_json(&self, body: &TxBody) -> serde_json::Value {
        let certificates: Vec<serde_json::Value> = body
            .certificates
            .iter()
            .map(|cert| match cert {
                Certificate::StakeRegistration { stake_key_hash } => {
                    json!({"stake_registration": stake_key_hash})
                }
                Certificate::StakeDelegation { stake_key_hash, pool_key_hash } => {
                    json!({"stake_delegation": {"stake": stake_key_hash, "pool": pool_key_hash}})
                }
            })
            .collect();
        json!({
            "inputs": body.inputs,
            "outputs": body
                .outputs
                .iter()
                .map(|output| json!({"address": output.address, "amount": output.value.flatten()}))
                .collect::<Vec<_>>(),
            "fee": body.fee,
            "certificates": certificates,
            "metadata": body.metadata,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct UtxoWire {
    tx_hash: String,
    output_index: u32,
    address: String,
    amount: Vec<AssetAmount>,
}

impl CardanoCodec for StubCodec {
    fn decode_utxo(&self, bytes: &[u8]) -> Result<Utxo> {
        let wire: UtxoWire = serde_json::from_slice(bytes)?;
        let lovelace = wire
            .amount
            .iter()
            .filter(|a| a.unit == LOVELACE)
            .map(|a| a.quantity)
            .sum();
        let assets: Vec<AssetAmount> = wire
            .amount
            .into_iter()
            .filter(|a| a.unit != LOVELACE)
            .collect();
        Ok(Utxo {
            tx_hash: wire.tx_hash,
            output_index: wire.output_index,
            address: wire.address,
            value: Value::from_assets(lovelace, &assets)?,
        })
    }

    fn value_size(&self, value: &Value) -> usize {
        if value.has_no_assets() {
            return 9;
        }
        let mut size = 9 + 2;
        for (_, names) in value.assets() {
            size += 30;
            for (name, _) in names {
                size += 2 + name.len() / 2 + 9;
            }
        }
        size
    }

    fn min_ada(&self, value: &Value, min_utxo: u64) -> u64 {
        if value.has_no_assets() {
            return min_utxo;
        }
        min_utxo + 2_000 * self.value_size(value) as u64
    }

    fn serialize_body(&self, body: &TxBody) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.body_json(body))?)
    }

    fn assemble(&self, body: &TxBody, witness_set_hex: &str) -> Result<Vec<u8>> {
        let signed = json!({
            "tx": self.body_json(body),
            "witnesses": witness_set_hex,
        });
        Ok(serde_json::to_vec(&signed)?)
    }
}

// ============================================================================
// In-memory wallets
// ============================================================================

/// An in-memory hex-capability wallet.
///
/// Canned data in, scripted answers out, with counters so tests can
/// assert how often signing and submission happened.
#[derive(Debug)]
pub struct MemoryWallet {
    network_id: u8,
    change_address: String,
    utxos_hex: Vec<String>,
    witness_hex: String,
    submit_response: String,
    assets: Vec<WalletAsset>,
    sign_calls: AtomicUsize,
    submit_calls: AtomicUsize,
}

impl MemoryWallet {
    /// A mainnet wallet with no UTXOs.
    pub fn new(change_address: impl Into<String>) -> Self {
        Self {
            network_id: 1,
            change_address: change_address.into(),
            utxos_hex: Vec::new(),
            witness_hex: "a100".into(),
            submit_response: "d0d0cafe0123456789abcdef".into(),
            assets: Vec::new(),
            sign_calls: AtomicUsize::new(0),
            submit_calls: AtomicUsize::new(0),
        }
    }

    /// Sets the reported network id.
    pub fn with_network_id(mut self, id: u8) -> Self {
        self.network_id = id;
        self
    }

    /// Loads UTXOs, encoding them through the stub codec.
    pub fn with_utxos(mut self, codec: &StubCodec, utxos: &[Utxo]) -> Self {
        self.utxos_hex = utxos.iter().map(|u| codec.encode_utxo_hex(u)).collect();
        self
    }

    /// Scripts the submission answer (a hash, or garbage for failure
    /// tests).
    pub fn with_submit_response(mut self, response: impl Into<String>) -> Self {
        self.submit_response = response.into();
        self
    }

    /// Loads wallet assets for handle/search tests.
    pub fn with_assets(mut self, assets: Vec<WalletAsset>) -> Self {
        self.assets = assets;
        self
    }

    /// How many times the wallet signed.
    pub fn sign_calls(&self) -> usize {
        self.sign_calls.load(Ordering::SeqCst)
    }

    /// How many times the wallet submitted.
    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Cip30Wallet for MemoryWallet {
    async fn get_utxos(&self) -> Result<Vec<String>> {
        Ok(self.utxos_hex.clone())
    }

    async fn get_change_address(&self) -> Result<String> {
        Ok(self.change_address.clone())
    }

    async fn get_unused_address(&self) -> Result<String> {
        Ok(format!("{}u", self.change_address))
    }

    async fn get_reward_address(&self) -> Result<String> {
        Ok(self.change_address.replacen("addr", "stake", 1))
    }

    async fn get_network_id(&self) -> Result<u8> {
        Ok(self.network_id)
    }

    async fn sign_transaction(&self, _tx_hex: &str) -> Result<String> {
        self.sign_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.witness_hex.clone())
    }

    async fn submit_transaction(&self, _tx_hex: &str) -> Result<String> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.submit_response.clone())
    }

    async fn assets(&self) -> Result<Vec<WalletAsset>> {
        Ok(self.assets.clone())
    }
}

/// A recording payment-intent wallet.
#[derive(Debug, Default)]
pub struct MemoryPaymentWallet {
    transaction_id: String,
    fail_with: Option<String>,
    last_intent: Mutex<Option<PaymentIntent>>,
}

impl MemoryPaymentWallet {
    /// A wallet that accepts every intent with the given transaction id.
    pub fn new(transaction_id: impl Into<String>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            fail_with: None,
            last_intent: Mutex::new(None),
        }
    }

    /// A wallet that declines every intent with the given reason.
    pub fn declining(reason: impl Into<String>) -> Self {
        Self {
            transaction_id: String::new(),
            fail_with: Some(reason.into()),
            last_intent: Mutex::new(None),
        }
    }

    /// The most recent intent the wallet saw.
    pub fn last_intent(&self) -> Option<PaymentIntent> {
        self.last_intent.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl PaymentWallet for MemoryPaymentWallet {
    async fn payment_transaction(&self, intent: PaymentIntent) -> Result<PaymentReceipt> {
        if let Ok(mut guard) = self.last_intent.lock() {
            *guard = Some(intent);
        }
        if let Some(reason) = &self.fail_with {
            return Err(Error::Submission(reason.clone()));
        }
        Ok(PaymentReceipt { transaction_id: self.transaction_id.clone() })
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// A lovelace-only UTXO with a synthetic hash derived from `index`.
pub fn lovelace_utxo(index: u32, coin: u64) -> Utxo {
    Utxo {
        tx_hash: format!("{index:064x}"),
        output_index: index,
        address: "addr1payer".into(),
        value: Value::from_lovelace(coin),
    }
}

/// A UTXO carrying lovelace plus one native asset.
pub fn asset_utxo(index: u32, coin: u64, policy_id: &str, asset_name: &str, quantity: u64) -> Utxo {
    let mut value = Value::from_lovelace(coin);
    value.add_asset(policy_id, asset_name, quantity);
    Utxo { value, ..lovelace_utxo(index, coin) }
}

/// Protocol parameters resembling a mainnet epoch snapshot.
pub fn test_params() -> ProtocolParameters {
    ProtocolParameters {
        min_fee_a: 44,
        min_fee_b: 155_381,
        min_utxo: 1_000_000,
        pool_deposit: 500_000_000,
        key_deposit: 2_000_000,
        max_tx_size: 16_384,
        max_val_size: 5_000,
        price_mem: 0.0577,
        price_step: 0.000_072_1,
        coins_per_utxo_word: 34_482,
        current_slot: 50_000_000,
    }
}
