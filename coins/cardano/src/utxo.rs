use resolvd_error::Result;
use serde::{Deserialize, Serialize};

use crate::body::TxInput;
use crate::codec::CardanoCodec;
use crate::value::Value;

/// An unspent transaction output owned by the connected wallet.
///
/// Immutable once fetched; removed from the spendable set the moment coin
/// selection picks it as an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utxo {
    /// Hash of the creating transaction
    pub tx_hash: String,
    /// Output index within the creating transaction
    pub output_index: u32,
    /// Address holding the output
    pub address: String,
    /// Value carried, base currency plus native assets
    pub value: Value,
}

impl Utxo {
    /// The input reference spending this UTXO.
    pub fn input(&self) -> TxInput {
        TxInput { tx_hash: self.tx_hash.clone(), output_index: self.output_index }
    }
}

/// Wallet-facing flattened view of a UTXO.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtxoSummary {
    /// Hash of the creating transaction
    pub tx_hash: String,
    /// Output index within the creating transaction
    pub output_index: u32,
    /// `(unit, quantity)` pairs, lovelace first
    pub amount: Vec<crate::value::AssetAmount>,
}

/// Decodes the wallet's hex-encoded UTXO list through the codec
/// collaborator.
pub fn decode_wallet_utxos(codec: &dyn CardanoCodec, hex_utxos: &[String]) -> Result<Vec<Utxo>> {
    let mut utxos = Vec::with_capacity(hex_utxos.len());
    for encoded in hex_utxos {
        let bytes = hex::decode(encoded)?;
        utxos.push(codec.decode_utxo(&bytes)?);
    }
    Ok(utxos)
}

/// Decodes and flattens the wallet's UTXOs for display.
pub fn summarize_wallet_utxos(
    codec: &dyn CardanoCodec,
    hex_utxos: &[String],
) -> Result<Vec<UtxoSummary>> {
    let utxos = decode_wallet_utxos(codec, hex_utxos)?;
    Ok(utxos
        .into_iter()
        .map(|utxo| UtxoSummary {
            tx_hash: utxo.tx_hash,
            output_index: utxo.output_index,
            amount: utxo.value.flatten(),
        })
        .collect())
}
