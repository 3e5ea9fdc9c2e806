use resolvd_error::{Error, Result};

use crate::client::Chain;

/// Cardano browser wallets the dispatch table recognizes.
pub const CARDANO_WALLETS: [&str; 7] =
    ["nami", "gerowallet", "flint", "typhon", "ccvault", "cardwallet", "yoroi"];

/// Ethereum wallets the dispatch table recognizes.
pub const ETHEREUM_WALLETS: [&str; 1] = ["metamask"];

/// Solana wallets the dispatch table recognizes.
pub const SOLANA_WALLETS: [&str; 2] = ["phantom", "solflare"];

/// The one wallet that takes structured payment intents instead of the
/// hex signing protocol.
pub const PAYMENT_INTENT_WALLET: &str = "typhon";

/// Maps a wallet name to its chain.
pub fn wallet_chain(name: &str) -> Result<Chain> {
    let lower = name.to_ascii_lowercase();
    if CARDANO_WALLETS.contains(&lower.as_str()) {
        return Ok(Chain::Cardano);
    }
    if ETHEREUM_WALLETS.contains(&lower.as_str()) {
        return Ok(Chain::Ethereum);
    }
    if SOLANA_WALLETS.contains(&lower.as_str()) {
        return Ok(Chain::Solana);
    }
    Err(Error::WalletNotSupported(name.to_string()))
}

/// Whether a wallet is driven through the payment-intent API rather than
/// the hex signing protocol.
pub fn uses_payment_intent(name: &str) -> bool {
    name.eq_ignore_ascii_case(PAYMENT_INTENT_WALLET)
}

/// A connected wallet, in whichever of the two wallet APIs it speaks.
#[cfg(feature = "cardano")]
pub enum WalletHandle<'a> {
    /// Hex-capability wallet (UTXO enumeration, hex sign/submit)
    Hex(&'a dyn resolvd_cardano::Cip30Wallet),
    /// Structured payment-intent wallet
    Intent(&'a dyn resolvd_cardano::PaymentWallet),
}

/// A connected wallet placeholder when no chain features are enabled.
#[cfg(not(feature = "cardano"))]
pub enum WalletHandle<'a> {
    /// No wallet APIs available without a chain feature
    None(std::marker::PhantomData<&'a ()>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_dispatch_tables() {
        assert_eq!(wallet_chain("nami").unwrap(), Chain::Cardano);
        assert_eq!(wallet_chain("Typhon").unwrap(), Chain::Cardano);
        assert_eq!(wallet_chain("metamask").unwrap(), Chain::Ethereum);
        assert_eq!(wallet_chain("phantom").unwrap(), Chain::Solana);
        assert!(wallet_chain("ledger").is_err());
    }

    #[test]
    fn test_payment_intent_wallet() {
        assert!(uses_payment_intent("typhon"));
        assert!(uses_payment_intent("Typhon"));
        assert!(!uses_payment_intent("nami"));
    }
}
