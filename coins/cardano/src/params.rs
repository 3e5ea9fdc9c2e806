use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;

/// Protocol parameters for one epoch, fetched fresh per transaction build.
///
/// The wire encodes the integer fields as arbitrary-precision decimal
/// strings; deserialization accepts either strings or plain numbers. The
/// snapshot is read-only once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolParameters {
    /// Linear fee coefficient (lovelace per byte)
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub min_fee_a: u64,
    /// Linear fee constant (lovelace)
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub min_fee_b: u64,
    /// Base minimum lovelace per output
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub min_utxo: u64,
    /// Deposit for registering a stake pool
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub pool_deposit: u64,
    /// Deposit for registering a stake key
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub key_deposit: u64,
    /// Maximum serialized transaction size
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_tx_size: u64,
    /// Maximum serialized size of a single output value
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_val_size: u64,
    /// Script execution memory price
    pub price_mem: f64,
    /// Script execution step price
    pub price_step: f64,
    /// Lovelace cost per UTXO storage word
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub coins_per_utxo_word: u64,
    /// Absolute slot at the time of the snapshot
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub current_slot: u64,
}

impl ProtocolParameters {
    /// Linear fee for a serialized size: `min_fee_a * size + min_fee_b`.
    pub fn linear_fee(&self, size: usize) -> u64 {
        self.min_fee_a.saturating_mul(size as u64).saturating_add(self.min_fee_b)
    }

    /// Protocol upper bound on any single transaction's fee, used as the
    /// selection headroom before the real size is known.
    pub fn max_fee(&self) -> u64 {
        self.min_fee_a.saturating_mul(self.max_tx_size).saturating_add(self.min_fee_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_from_strings_and_numbers() {
        let params: ProtocolParameters = serde_json::from_str(
            r#"{
                "min_fee_a": "44",
                "min_fee_b": 155381,
                "min_utxo": "1000000",
                "pool_deposit": "500000000",
                "key_deposit": "2000000",
                "max_tx_size": 16384,
                "max_val_size": "5000",
                "price_mem": 0.0577,
                "price_step": 0.0000721,
                "coins_per_utxo_word": "34482",
                "current_slot": "12345678"
            }"#,
        )
        .unwrap();
        assert_eq!(params.min_fee_a, 44);
        assert_eq!(params.min_fee_b, 155_381);
        assert_eq!(params.max_tx_size, 16_384);
        assert_eq!(params.current_slot, 12_345_678);
    }

    #[test]
    fn test_linear_fee() {
        let params: ProtocolParameters = serde_json::from_str(
            r#"{
                "min_fee_a": 44, "min_fee_b": 155381, "min_utxo": 1000000,
                "pool_deposit": 500000000, "key_deposit": 2000000,
                "max_tx_size": 16384, "max_val_size": 5000,
                "price_mem": 0.0, "price_step": 0.0,
                "coins_per_utxo_word": 34482, "current_slot": 0
            }"#,
        )
        .unwrap();
        assert_eq!(params.linear_fee(300), 44 * 300 + 155_381);
        assert_eq!(params.max_fee(), 44 * 16_384 + 155_381);
    }
}
