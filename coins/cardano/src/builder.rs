use rand::Rng;
use resolvd_error::{Error, Result};

use crate::body::{Certificate, Metadata, TxBody, TxOutput};
use crate::codec::CardanoCodec;
use crate::params::ProtocolParameters;
use crate::select::random_improve;
use crate::utxo::Utxo;
use crate::value::Value;

/// Hex-length ceiling for a single output's serialized value. Change
/// carrying more assets than fits under this is split across outputs.
pub const VALUE_SIZE_CEILING: usize = 5000;

/// Default auxiliary-data label when the caller does not pick one.
pub const DEFAULT_METADATA_LABEL: u64 = 721;

/// Base iteration budget handed to coin selection; one extra attempt is
/// granted per distinct asset in the outputs.
pub const BASE_SELECTION_ATTEMPTS: u32 = 20;

/// A caller's intent to delegate stake as part of the transaction.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DelegationIntent {
    /// Hex-encoded stake key hash
    pub stake_key_hash: String,
    /// Hex-encoded pool key hash to delegate to
    pub pool_key_hash: String,
    /// Whether the stake key is already registered on chain; when false a
    /// registration certificate (and its deposit) is added
    pub registered: bool,
}

/// Everything the builder needs for one transaction. Protocol parameters
/// are passed explicitly per build; the builder holds no mutable
/// configuration between calls.
#[derive(Debug, Clone)]
pub struct BuildRequest<'a> {
    /// Address receiving change, typically the wallet's change address
    pub payment_address: String,
    /// Spendable UTXOs
    pub utxos: &'a [Utxo],
    /// Requested outputs (before min-ADA enforcement)
    pub outputs: Vec<TxOutput>,
    /// Fresh protocol parameter snapshot
    pub params: &'a ProtocolParameters,
    /// Optional labeled auxiliary data
    pub metadata: Option<Metadata>,
    /// Optional delegation intent
    pub delegation: Option<DelegationIntent>,
}

/// A fully built, unsigned transaction.
#[derive(Debug, Clone)]
pub struct BuiltTransaction {
    /// The body the wallet's signature must cover
    pub body: TxBody,
    /// Serialized unsigned transaction
    pub unsigned_bytes: Vec<u8>,
}

impl BuiltTransaction {
    /// Fee carried by the body.
    pub fn fee(&self) -> u64 {
        self.body.fee
    }

    /// Hex encoding of the unsigned transaction, as wallets expect it.
    pub fn unsigned_hex(&self) -> String {
        hex::encode(&self.unsigned_bytes)
    }
}

/// Assembles a complete, balanced, within-size-limit transaction.
///
/// Overall accounting, which callers may verify:
/// `sum(inputs) == sum(outputs) + fee + key deposits`, where `outputs`
/// includes the requested outputs, any change splits, and the final change
/// output.
pub fn build_transaction(
    request: BuildRequest<'_>,
    codec: &dyn CardanoCodec,
    rng: &mut impl Rng,
) -> Result<BuiltTransaction> {
    let params = request.params;

    // Every requested output must carry at least the protocol minimum for
    // its asset payload; bump before selection so the bump is funded.
    let mut outputs = request.outputs;
    for output in &mut outputs {
        let floor = codec.min_ada(&output.value, params.min_utxo);
        if output.value.coin < floor {
            output.value.coin = floor;
        }
    }

    let certificates = delegation_certificates(request.delegation.as_ref());
    let deposit = certificates
        .iter()
        .filter(|cert| matches!(cert, Certificate::StakeRegistration { .. }))
        .count() as u64
        * params.key_deposit;

    // The registration deposit is funded like an output so selection
    // reserves lovelace for it.
    let mut selection_outputs = outputs.clone();
    if deposit > 0 {
        selection_outputs.push(TxOutput::new(
            request.payment_address.clone(),
            Value::from_lovelace(deposit),
        ));
    }
    let total_assets: usize = outputs.iter().map(|o| o.value.asset_count()).sum();
    let limit = BASE_SELECTION_ATTEMPTS + total_assets as u32;
    let selection = random_improve(request.utxos, &selection_outputs, limit, params, rng)?;

    let inputs: Vec<_> = selection.inputs.iter().map(Utxo::input).collect();
    let mut gross_change = selection.change;

    // Split oversized multi-asset change into partial outputs, each
    // carrying its own minimum lovelace.
    let mut body_outputs = outputs;
    if !gross_change.has_no_assets()
        && codec.value_size(&gross_change) * 2 > VALUE_SIZE_CEILING
    {
        let (partials, remainder) = split_change(&gross_change, VALUE_SIZE_CEILING, codec)?;
        let mut remaining_coin = gross_change.coin;
        for mut partial in partials {
            partial.coin = codec.min_ada(&partial, params.min_utxo);
            remaining_coin = remaining_coin.checked_sub(partial.coin).ok_or(
                Error::InsufficientFunds {
                    required: partial.coin,
                    available: remaining_coin,
                },
            )?;
            body_outputs.push(TxOutput::new(request.payment_address.clone(), partial));
        }
        gross_change = remainder;
        gross_change.coin = remaining_coin;
    }

    // Fee, then the final change output topped up with whatever the fee
    // leaves behind.
    let assemble = |fee: u64, change: Option<TxOutput>| -> TxBody {
        let mut all_outputs = body_outputs.clone();
        if let Some(change) = change {
            all_outputs.push(change);
        }
        TxBody {
            inputs: inputs.clone(),
            outputs: all_outputs,
            fee,
            certificates: certificates.clone(),
            metadata: request.metadata.clone(),
        }
    };

    let probe = assemble(
        params.max_fee(),
        Some(TxOutput::new(request.payment_address.clone(), gross_change.clone())),
    );
    let fee_with_change = params.linear_fee(codec.serialize_body(&probe)?.len());

    let change_min = codec.min_ada(&gross_change, params.min_utxo);
    let body = if !gross_change.has_no_assets() {
        // Asset-bearing change can never be folded into the fee.
        let coin_after = gross_change.coin.checked_sub(fee_with_change).ok_or(
            Error::InsufficientFunds {
                required: fee_with_change,
                available: gross_change.coin,
            },
        )?;
        if coin_after < change_min {
            return Err(Error::InsufficientFunds {
                required: fee_with_change + change_min,
                available: gross_change.coin,
            });
        }
        let mut change = gross_change;
        change.coin = coin_after;
        assemble(
            fee_with_change,
            Some(TxOutput::new(request.payment_address.clone(), change)),
        )
    } else if gross_change.coin >= fee_with_change + change_min {
        let mut change = gross_change;
        change.coin -= fee_with_change;
        assemble(
            fee_with_change,
            Some(TxOutput::new(request.payment_address.clone(), change)),
        )
    } else {
        // Too little left for a change output: the remainder is burned as
        // fee, provided it still covers the fee of the smaller body.
        let fee_without_change = params.linear_fee(
            codec
                .serialize_body(&assemble(params.max_fee(), None))?
                .len(),
        );
        if gross_change.coin < fee_without_change {
            return Err(Error::InsufficientFunds {
                required: fee_without_change,
                available: gross_change.coin,
            });
        }
        assemble(gross_change.coin, None)
    };

    let unsigned_bytes = codec.serialize_body(&body)?;
    let size_hex = unsigned_bytes.len() * 2;
    if size_hex as u64 > params.max_tx_size {
        return Err(Error::TransactionTooLarge {
            size: size_hex,
            max: params.max_tx_size as usize,
        });
    }

    tracing::debug!(
        fee = body.fee,
        outputs = body.outputs.len(),
        size_hex,
        "transaction built"
    );
    Ok(BuiltTransaction { body, unsigned_bytes })
}

fn delegation_certificates(delegation: Option<&DelegationIntent>) -> Vec<Certificate> {
    let Some(delegation) = delegation else {
        return Vec::new();
    };
    let mut certificates = Vec::new();
    if !delegation.registered {
        certificates.push(Certificate::StakeRegistration {
            stake_key_hash: delegation.stake_key_hash.clone(),
        });
    }
    certificates.push(Certificate::StakeDelegation {
        stake_key_hash: delegation.stake_key_hash.clone(),
        pool_key_hash: delegation.pool_key_hash.clone(),
    });
    certificates
}

/// Partitions an oversized change value's assets into partial values, each
/// fitting under the serialized-size ceiling, leaving a remainder that
/// fits as the final change output.
///
/// Filling is greedy, policy by policy and asset by asset in map order, so
/// the partition is deterministic for a given value and ceiling.
fn split_change(
    change: &Value,
    ceiling_hex: usize,
    codec: &dyn CardanoCodec,
) -> Result<(Vec<Value>, Value)> {
    let mut partials = Vec::new();
    let mut remaining = change.clone();
    remaining.coin = 0;

    while !remaining.has_no_assets() && codec.value_size(&remaining) * 2 > ceiling_hex {
        let mut partial = Value::default();
        'fill: for (policy_id, names) in remaining.assets() {
            for (asset_name, quantity) in names {
                let mut candidate = partial.clone();
                candidate.add_asset(policy_id, asset_name, *quantity);
                if codec.value_size(&candidate) * 2 >= ceiling_hex {
                    break 'fill;
                }
                partial = candidate;
            }
        }
        if partial.has_no_assets() {
            // A single asset alone crosses the ceiling; move it anyway so
            // the loop always terminates.
            if let Some((policy_id, names)) = remaining.assets().iter().next() {
                if let Some((asset_name, quantity)) = names.iter().next() {
                    partial.add_asset(policy_id, asset_name, *quantity);
                }
            }
        }
        remaining = remaining
            .checked_sub(&partial)
            .ok_or_else(|| Error::SelectionFailed("change split accounting error".into()))?;
        partials.push(partial);
    }

    Ok((partials, remaining))
}
