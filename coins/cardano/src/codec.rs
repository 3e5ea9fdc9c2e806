use resolvd_error::Result;

use crate::body::TxBody;
use crate::utxo::Utxo;
use crate::value::Value;

/// The binary value codec collaborator.
///
/// Transaction and value serialization (CBOR on the wire) lives outside
/// this crate; the builder and orchestrator only ever talk to it through
/// this trait. Implementations must be deterministic: the same input must
/// always produce the same bytes and the same reported sizes, because the
/// change-splitting and size-validation logic budget against them.
pub trait CardanoCodec: Send + Sync {
    /// Decodes one wallet-provided UTXO from its binary encoding.
    fn decode_utxo(&self, bytes: &[u8]) -> Result<Utxo>;

    /// Serialized byte length of a value, as it would appear inside an
    /// output.
    fn value_size(&self, value: &Value) -> usize;

    /// Minimum lovelace an output carrying `value` must hold, given the
    /// protocol's base minimum.
    fn min_ada(&self, value: &Value, min_utxo: u64) -> u64;

    /// Serializes the full unsigned transaction (body, empty witness set,
    /// auxiliary data).
    fn serialize_body(&self, body: &TxBody) -> Result<Vec<u8>>;

    /// Merges the already-built body with the wallet's witness set into
    /// the submittable transaction. The body is reused byte-for-byte; the
    /// signature must cover exactly what was built.
    fn assemble(&self, body: &TxBody, witness_set_hex: &str) -> Result<Vec<u8>>;
}
