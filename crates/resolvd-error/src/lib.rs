//! # Resolvd Error
//!
//! This crate provides unified error types for the resolvd multi-chain
//! resolution and transaction SDK. Every component — gateway, resolver,
//! coin selection, transaction building, orchestration — reports failures
//! through the single [`Error`] enum so callers can branch on
//! [`Error::kind`] alone.
//!
//! ## Example
//!
//! ```
//! use resolvd_error::{Error, ErrorKind, Result};
//!
//! fn require_handle_prefix(handle: &str) -> Result<()> {
//!     if !handle.starts_with('$') {
//!         return Err(Error::InvalidHandle(handle.to_string()));
//!     }
//!     Ok(())
//! }
//!
//! let err = require_handle_prefix("cardano").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Validation);
//! assert_eq!(err.code(), 404);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use thiserror::Error;

/// The main error type for resolvd operations.
#[derive(Error, Debug)]
pub enum Error {
    // ============ Resolution Errors ============
    /// An AdaHandle lookup found no owning address
    #[error("The handle {0} not found")]
    HandleNotFound(String),

    /// A name-service domain has no address record
    #[error("Domain {0} not found")]
    DomainNotFound(String),

    /// The directory service has no record for this chain symbol
    #[error("Resolver {0} address not found")]
    ResolverNotFound(String),

    // ============ Validation Errors ============
    /// Address failed the chain's syntax/checksum check
    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress {
        /// The rejected address
        address: String,
        /// Reason for rejection
        reason: String,
    },

    /// Handle without the `$` prefix, or empty handle body
    #[error("The handle must be passed with $ at the beginning, e.g. $cardano (got '{0}')")]
    InvalidHandle(String),

    /// Domain with an unrecognized suffix
    #[error("Invalid domain '{0}'")]
    InvalidDomain(String),

    /// Polling interval below the enforced floor
    #[error("Polling interval must be at least {min} seconds (got {got})")]
    InvalidPollInterval {
        /// Enforced minimum
        min: u64,
        /// Requested interval
        got: u64,
    },

    // ============ Chain Data Errors ============
    /// Account/stake data missing for an address
    #[error("No account data found for this address; an address with no transaction history has none, and the lookup must target the right network")]
    AccountNotFound,

    /// No stake pool delegation found
    #[error("Stake pool not found for this address")]
    PoolNotFound,

    /// Epoch/protocol-parameter query failed
    #[error("Could not fetch epoch data: {0}")]
    EpochUnavailable(String),

    /// Asset lookup by unit returned nothing
    #[error("Asset not found")]
    AssetNotFound,

    /// Transaction hash unknown to the chain
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    // ============ Coin Selection / Builder Errors ============
    /// Wallet balance cannot cover the requested outputs plus fees
    #[error("Insufficient funds: required {required} lovelace, available {available}")]
    InsufficientFunds {
        /// Lovelace needed to cover outputs + fee headroom
        required: u64,
        /// Lovelace present across spendable UTXOs
        available: u64,
    },

    /// An asset named in the outputs does not exist among the wallet's UTXOs
    #[error("Asset {0} is not available in the wallet")]
    AssetNotAvailable(String),

    /// Selection exhausted its iteration budget without covering the target
    #[error("Coin selection failed: {0}")]
    SelectionFailed(String),

    /// Serialized transaction exceeds the protocol size ceiling
    #[error("Transaction too large: {size} > {max}")]
    TransactionTooLarge {
        /// Serialized size (hex characters)
        size: usize,
        /// Protocol maximum
        max: usize,
    },

    // ============ Wallet Errors ============
    /// Wallet declined or failed to sign
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Wallet declined or failed to submit
    #[error("Submission failed: {0}")]
    Submission(String),

    /// Submission returned something that is not a transaction hash
    #[error("Malformed transaction hash from wallet: {0}")]
    MalformedTxHash(String),

    /// Wallet produced no usable address
    #[error("No address found for this wallet")]
    WalletAddressMissing,

    /// Wallet holds no asset under the handle policy
    #[error("No handle found on this wallet")]
    WalletHandleMissing,

    // ============ Configuration Errors ============
    /// A backend requires a credential that was not supplied
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    /// Requested chain has no implementation
    #[error("Chain not supported: {0}")]
    ChainNotSupported(String),

    /// Requested wallet name is not in any dispatch table
    #[error("Wallet not supported: {0}")]
    WalletNotSupported(String),

    // ============ Transport Errors ============
    /// HTTP-level failure (connect, timeout, TLS)
    #[error("Request problem, check parameters: {0}")]
    Http(String),

    /// Response body could not be parsed
    #[error("Malformed response body: {0}")]
    Json(String),

    /// Backend answered with a non-success status
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status returned by the backend
        code: u16,
        /// Backend-provided message, if any
        message: String,
    },
}

/// Convenient Result type using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// The failure taxonomy, independent of the concrete variant.
///
/// Mirrors the categories callers are expected to branch on; the wire-level
/// `{code, data}` envelope collapses all of these to code 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A resource is absent (handle, domain, account, pool, epoch, tx)
    NotFound,
    /// Malformed input (address, handle, domain, poll interval)
    Validation,
    /// Coin selection cannot satisfy the requested outputs
    InsufficientFunds,
    /// Built transaction exceeds the protocol size ceiling
    TransactionTooLarge,
    /// Wallet signing or submission failure
    SigningOrSubmission,
    /// Missing credential or unsupported chain/wallet
    Configuration,
    /// Transport or decoding failure
    Network,
}

impl Error {
    /// Returns the taxonomy bucket for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::HandleNotFound(_)
            | Error::DomainNotFound(_)
            | Error::ResolverNotFound(_)
            | Error::AccountNotFound
            | Error::PoolNotFound
            | Error::EpochUnavailable(_)
            | Error::AssetNotFound
            | Error::WalletHandleMissing
            | Error::TransactionNotFound(_) => ErrorKind::NotFound,

            Error::InvalidAddress { .. }
            | Error::InvalidHandle(_)
            | Error::InvalidDomain(_)
            | Error::InvalidPollInterval { .. } => ErrorKind::Validation,

            Error::InsufficientFunds { .. }
            | Error::AssetNotAvailable(_)
            | Error::SelectionFailed(_) => ErrorKind::InsufficientFunds,

            Error::TransactionTooLarge { .. } => ErrorKind::TransactionTooLarge,

            Error::Signing(_)
            | Error::Submission(_)
            | Error::MalformedTxHash(_)
            | Error::WalletAddressMissing => ErrorKind::SigningOrSubmission,

            Error::MissingCredential(_)
            | Error::ChainNotSupported(_)
            | Error::WalletNotSupported(_) => ErrorKind::Configuration,

            Error::Http(_) | Error::Json(_) | Error::Api { .. } => ErrorKind::Network,
        }
    }

    /// Wire-level status code. Success is 200; every failure is 404.
    pub fn code(&self) -> u16 {
        404
    }

    /// True when the error means "the resource does not exist" rather than
    /// "the request was wrong".
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Fatal errors must never be retried by a caller's polling logic.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::TransactionTooLarge | ErrorKind::Validation | ErrorKind::Configuration
        )
    }
}

// ============ From implementations for common error types ============

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

impl From<hex::FromHexError> for Error {
    fn from(err: hex::FromHexError) -> Self {
        Error::Json(format!("hex decode: {err}"))
    }
}
