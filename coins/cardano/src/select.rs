use rand::Rng;
use resolvd_error::{Error, Result};

use crate::body::TxOutput;
use crate::params::ProtocolParameters;
use crate::utxo::Utxo;
use crate::value::{Unit, Value};

/// The outcome of coin selection.
///
/// Invariant: `sum(inputs) == sum(outputs) + change`. The fee has not been
/// carved out yet — the builder subtracts it from `change` once the real
/// serialized size is known — so `change` still contains the selection's
/// fee headroom.
#[derive(Debug, Clone)]
pub struct Selection {
    /// UTXOs chosen as inputs; consumed from the spendable set
    pub inputs: Vec<Utxo>,
    /// Accumulated input value minus the requested outputs
    pub change: Value,
}

/// Random-improve coin selection.
///
/// Phase 1 covers every required unit by uniformly random draws over the
/// UTXOs that carry it. Phase 2 spends up to `limit` further draws trying
/// to move the accumulated lovelace toward twice the target (and never
/// past three times it), which leaves healthier change and avoids dust.
///
/// The protocol maximum fee is reserved on top of the requested lovelace
/// so that whatever fee the builder later computes is always covered.
pub fn random_improve(
    available: &[Utxo],
    outputs: &[TxOutput],
    limit: u32,
    params: &ProtocolParameters,
    rng: &mut impl Rng,
) -> Result<Selection> {
    let mut requested = Value::default();
    for output in outputs {
        requested = requested
            .checked_add(&output.value)
            .ok_or_else(|| Error::SelectionFailed("output total overflows".into()))?;
    }

    let mut target = requested.clone();
    target.coin = target.coin.saturating_add(params.max_fee());

    // Fail fast with the precise reason before any sampling.
    let mut total = Value::default();
    for utxo in available {
        total = total
            .checked_add(&utxo.value)
            .ok_or_else(|| Error::SelectionFailed("wallet balance overflows".into()))?;
    }
    for unit in target.units() {
        let needed = target.quantity_of(&unit);
        let held = total.quantity_of(&unit);
        if held >= needed {
            continue;
        }
        return Err(match unit {
            Unit::Lovelace => Error::InsufficientFunds { required: needed, available: held },
            asset => Error::AssetNotAvailable(asset.to_string()),
        });
    }

    let mut remaining: Vec<Utxo> = available.to_vec();
    let mut selected: Vec<Utxo> = Vec::new();
    let mut accumulated = Value::default();

    // Phase 1: cover each unit, assets before lovelace so asset-carrying
    // inputs get counted toward the lovelace requirement too.
    let mut units = target.units();
    units.sort_by_key(|unit| matches!(unit, Unit::Lovelace));
    for unit in units {
        while accumulated.quantity_of(&unit) < target.quantity_of(&unit) {
            let carriers: Vec<usize> = remaining
                .iter()
                .enumerate()
                .filter(|(_, utxo)| utxo.value.quantity_of(&unit) > 0)
                .map(|(idx, _)| idx)
                .collect();
            if carriers.is_empty() {
                return Err(Error::SelectionFailed(format!(
                    "ran out of inputs while covering {unit}"
                )));
            }
            let pick = carriers[rng.gen_range(0..carriers.len())];
            let utxo = remaining.swap_remove(pick);
            accumulated = accumulated
                .checked_add(&utxo.value)
                .ok_or_else(|| Error::SelectionFailed("accumulated value overflows".into()))?;
            selected.push(utxo);
        }
    }

    // Phase 2: improve lovelace distribution within the iteration budget.
    let ideal = (target.coin as i128) * 2;
    let ceiling = (target.coin as u128) * 3;
    for _ in 0..limit {
        if remaining.is_empty() {
            break;
        }
        let pick = rng.gen_range(0..remaining.len());
        let current = accumulated.coin as i128;
        let with_pick = current + remaining[pick].value.coin as i128;
        let improves = (ideal - with_pick).abs() < (ideal - current).abs();
        if improves && (with_pick as u128) <= ceiling {
            let utxo = remaining.swap_remove(pick);
            accumulated = accumulated
                .checked_add(&utxo.value)
                .ok_or_else(|| Error::SelectionFailed("accumulated value overflows".into()))?;
            selected.push(utxo);
        }
    }

    let change = accumulated.checked_sub(&requested).ok_or_else(|| {
        Error::SelectionFailed("selected inputs do not cover the requested outputs".into())
    })?;

    tracing::debug!(
        inputs = selected.len(),
        change_lovelace = change.coin,
        "coin selection complete"
    );
    Ok(Selection { inputs: selected, change })
}
