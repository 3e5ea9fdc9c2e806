use rand::Rng;
use resolvd_error::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::body::{Metadata, TxOutput};
use crate::builder::{build_transaction, BuildRequest, DelegationIntent, DEFAULT_METADATA_LABEL};
use crate::chaindata::CardanoChainData;
use crate::codec::CardanoCodec;
use crate::config::{ada_to_lovelace, explorer_links, ExplorerLinks};
use crate::utxo::decode_wallet_utxos;
use crate::value::{AssetAmount, Unit, Value};
use crate::wallet::{
    Cip30Wallet, IntentOutput, IntentToken, PaymentIntent, PaymentWallet,
};

/// One recipient of a transfer.
///
/// `amount` is in ADA; `None` and `Some(0.0)` both mean a token-only
/// output — the builder path floors it at the output's minimum lovelace,
/// the payment-intent path omits the amount field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    /// Destination address (already resolved)
    pub address: String,
    /// ADA amount; token-only outputs leave it unset
    pub amount: Option<f64>,
    /// Native assets to send
    #[serde(default)]
    pub assets: Vec<AssetAmount>,
}

impl Recipient {
    /// Plain ADA recipient.
    pub fn ada(address: impl Into<String>, amount: f64) -> Self {
        Self { address: address.into(), amount: Some(amount), assets: Vec::new() }
    }
}

/// A transfer request: recipients plus optional labeled metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Who receives what
    pub recipients: Vec<Recipient>,
    /// Optional auxiliary payload
    pub metadata: Option<serde_json::Value>,
    /// Label for the auxiliary payload
    pub metadata_label: u64,
    /// Optional delegation intent executed in the same transaction
    pub delegation: Option<DelegationIntent>,
}

impl TransferRequest {
    /// A single-recipient request with the default metadata label.
    pub fn simple(recipient: Recipient) -> Self {
        Self::multiple(vec![recipient])
    }

    /// A multi-recipient request with the default metadata label.
    pub fn multiple(recipients: Vec<Recipient>) -> Self {
        Self {
            recipients,
            metadata: None,
            metadata_label: DEFAULT_METADATA_LABEL,
            delegation: None,
        }
    }

    /// Attaches labeled metadata.
    pub fn with_metadata(mut self, label: u64, payload: serde_json::Value) -> Self {
        self.metadata = Some(payload);
        self.metadata_label = label;
        self
    }

    fn metadata_entry(&self) -> Option<Metadata> {
        self.metadata
            .clone()
            .map(|payload| Metadata { label: self.metadata_label, payload })
    }

    fn outputs(&self) -> Result<Vec<TxOutput>> {
        let mut outputs = Vec::with_capacity(self.recipients.len());
        for recipient in &self.recipients {
            let lovelace = ada_to_lovelace(recipient.amount.unwrap_or(0.0));
            let value = Value::from_assets(lovelace, &recipient.assets)?;
            outputs.push(TxOutput::new(recipient.address.clone(), value));
        }
        Ok(outputs)
    }
}

/// The converged result shape of every submission path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    /// Hash of the submitted transaction
    pub tx: String,
    /// Derived explorer URLs
    pub explorers: ExplorerLinks,
}

/// End-to-end transfer through a hex-capability wallet:
/// fetch parameters → fetch UTXOs → build → sign → submit.
///
/// Steps are strictly sequential; each aborts the flow on failure. The
/// signed transaction reuses the built body byte-for-byte — the witness
/// set is merged in, never a rebuilt body.
pub async fn submit_transfer(
    chain: &CardanoChainData,
    codec: &dyn CardanoCodec,
    wallet: &dyn Cip30Wallet,
    request: &TransferRequest,
    rng: &mut impl Rng,
) -> Result<TransactionReceipt> {
    let payment_address = crate::wallet::change_address(wallet).await?;

    // FETCH_PARAMS
    let params = chain.protocol_parameters().await?;

    // FETCH_UTXOS
    let utxo_hex = wallet.get_utxos().await?;
    let utxos = decode_wallet_utxos(codec, &utxo_hex)?;

    // BUILD
    let built = build_transaction(
        BuildRequest {
            payment_address,
            utxos: &utxos,
            outputs: request.outputs()?,
            params: &params,
            metadata: request.metadata_entry(),
            delegation: request.delegation.clone(),
        },
        codec,
        rng,
    )?;

    // SIGN
    let witness_hex = wallet
        .sign_transaction(&built.unsigned_hex())
        .await
        .map_err(|err| Error::Signing(err.to_string()))?;
    let signed = codec.assemble(&built.body, &witness_hex)?;

    // SUBMIT
    let tx = wallet
        .submit_transaction(&hex::encode(signed))
        .await
        .map_err(|err| Error::Submission(err.to_string()))?;
    if !is_tx_hash(&tx) {
        return Err(Error::MalformedTxHash(tx));
    }

    tracing::info!(%tx, "transaction submitted");
    Ok(TransactionReceipt {
        explorers: explorer_links(chain.network(), &tx),
        tx,
    })
}

/// Transfer through the payment-intent wallet: structured outputs go to
/// the wallet, which selects, builds, signs and submits internally. The
/// result converges on the same receipt shape as [`submit_transfer`].
pub async fn submit_transfer_intent(
    network: resolvd_gateway::Network,
    wallet: &dyn PaymentWallet,
    request: &TransferRequest,
) -> Result<TransactionReceipt> {
    let mut outputs = Vec::with_capacity(request.recipients.len());
    for recipient in &request.recipients {
        outputs.push(intent_output(recipient)?);
    }

    let receipt = wallet
        .payment_transaction(PaymentIntent {
            outputs,
            metadata: request.metadata_entry(),
        })
        .await?;

    tracing::info!(tx = %receipt.transaction_id, "payment intent accepted");
    Ok(TransactionReceipt {
        explorers: explorer_links(network, &receipt.transaction_id),
        tx: receipt.transaction_id,
    })
}

fn intent_output(recipient: &Recipient) -> Result<IntentOutput> {
    let mut tokens = Vec::with_capacity(recipient.assets.len());
    for asset in &recipient.assets {
        let Unit::Asset { policy_id, asset_name } = Unit::parse(&asset.unit)? else {
            return Err(Error::AssetNotAvailable(asset.unit.clone()));
        };
        tokens.push(IntentToken {
            policy_id,
            asset_name,
            amount: asset.quantity.to_string(),
        });
    }

    // A zero or absent amount with tokens means "token-only": the wallet
    // computes the minimum lovelace itself.
    let lovelace = ada_to_lovelace(recipient.amount.unwrap_or(0.0));
    let amount = if lovelace == 0 && !tokens.is_empty() {
        None
    } else {
        Some(lovelace.to_string())
    };

    Ok(IntentOutput { address: recipient.address.clone(), amount, tokens })
}

fn is_tx_hash(candidate: &str) -> bool {
    !candidate.is_empty() && candidate.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLICY: &str = "a000000000000000000000000000000000000000000000000000000a";

    #[test]
    fn test_tx_hash_shape() {
        assert!(is_tx_hash("6e2f3a7c9b"));
        assert!(is_tx_hash("Abc123"));
        assert!(!is_tx_hash(""));
        assert!(!is_tx_hash("user declined tx"));
        assert!(!is_tx_hash("hash-with-dashes"));
    }

    #[test]
    fn test_outputs_floor_absent_amount_at_zero() {
        let request = TransferRequest::simple(Recipient {
            address: "addr1dest".into(),
            amount: None,
            assets: vec![AssetAmount::new(format!("{POLICY}aa"), 2)],
        });
        let outputs = request.outputs().unwrap();
        assert_eq!(outputs[0].value.coin, 0);
        assert_eq!(outputs[0].value.asset_count(), 1);
    }

    #[test]
    fn test_intent_output_token_only_omits_amount() {
        let recipient = Recipient {
            address: "addr1dest".into(),
            amount: Some(0.0),
            assets: vec![AssetAmount::new(format!("{POLICY}aa"), 2)],
        };
        let output = intent_output(&recipient).unwrap();
        assert!(output.amount.is_none());
        assert_eq!(output.tokens.len(), 1);
        assert_eq!(output.tokens[0].policy_id, POLICY);
    }

    #[test]
    fn test_intent_output_ada_amount_in_lovelace() {
        let recipient = Recipient::ada("addr1dest", 1.5);
        let output = intent_output(&recipient).unwrap();
        assert_eq!(output.amount.as_deref(), Some("1500000"));
        assert!(output.tokens.is_empty());
    }

    #[test]
    fn test_intent_output_rejects_lovelace_as_token() {
        let recipient = Recipient {
            address: "addr1dest".into(),
            amount: None,
            assets: vec![AssetAmount::new("lovelace", 5)],
        };
        assert!(intent_output(&recipient).is_err());
    }
}
