//! # Resolvd Cardano
//!
//! Cardano chain support for the resolvd SDK: multi-asset value
//! accounting, coin selection, transaction construction, and the
//! normalized chain-data queries behind them.
//!
//! ## The transaction pipeline
//!
//! A transfer runs through a fixed sequence, each step feeding the next:
//!
//! 1. fetch the latest protocol parameters (fresh per build, no caching)
//! 2. fetch and decode the wallet's UTXOs
//! 3. random-improve coin selection over the spendable set
//! 4. assemble the body: outputs, certificates, metadata, change splits
//!    under the per-output size ceiling, minimum-lovelace enforcement,
//!    linear fee, final size validation
//! 5. wallet signs the built body; the witness set is merged in
//! 6. wallet submits; the result is polled for confirmation on request
//!
//! Binary serialization is a collaborator behind the [`CardanoCodec`]
//! trait — this crate budgets against the sizes the codec reports but
//! never encodes CBOR itself. Wallet connectivity is likewise consumed
//! through the [`Cip30Wallet`] / [`PaymentWallet`] capability traits.
//!
//! ## Note on the UTXO model
//!
//! Cardano uses a UTXO model rather than an account model: every spend
//! consumes whole outputs, so transaction building is coin selection plus
//! change computation, and every native asset riding along on a selected
//! input must be conserved somewhere in the outputs.

pub mod body;
pub mod builder;
pub mod chaindata;
pub mod codec;
pub mod config;
pub mod confirm;
pub mod params;
pub mod select;
pub mod transaction;
pub mod utxo;
pub mod value;
pub mod wallet;

pub use body::{Certificate, Metadata, TxBody, TxInput, TxOutput};
pub use builder::{
    build_transaction, BuildRequest, BuiltTransaction, DelegationIntent,
    BASE_SELECTION_ATTEMPTS, DEFAULT_METADATA_LABEL, VALUE_SIZE_CEILING,
};
pub use chaindata::{
    AccountInformation, AssetInfo, CardanoChainData, EpochSummary, PoolInfo, TransactionInfo,
};
pub use codec::CardanoCodec;
pub use config::{
    ada_to_lovelace, explorer_links, lovelace_to_ada, ExplorerLinks, LOVELACE_PER_ADA,
};
pub use confirm::{
    verify_tx_created, verify_tx_created_every, Confirmation, PollOptions, DEFAULT_POLL_TRIES,
    MIN_POLL_SECONDS,
};
pub use params::ProtocolParameters;
pub use select::{random_improve, Selection};
pub use transaction::{
    submit_transfer, submit_transfer_intent, Recipient, TransactionReceipt, TransferRequest,
};
pub use utxo::{decode_wallet_utxos, summarize_wallet_utxos, Utxo, UtxoSummary};
pub use value::{AssetAmount, Unit, Value, LOVELACE};
pub use wallet::{
    change_address, reward_address, search_wallet_assets, unused_address, wallet_handles,
    wallet_network, AssetField, Cip30Wallet, IntentOutput, IntentToken, PaymentIntent,
    PaymentReceipt, PaymentWallet, WalletAsset,
};
