use std::collections::BTreeMap;

use resolvd_error::{Error, Result};
use serde::{Deserialize, Serialize};

/// The base currency unit name used in wallet-facing asset lists.
pub const LOVELACE: &str = "lovelace";

/// A single `(unit, quantity)` pair as wallets and callers see them.
///
/// `unit` is either `"lovelace"` or the 56-hex-char policy id immediately
/// followed by the hex-encoded asset name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetAmount {
    /// `"lovelace"` or `policy_id + asset_name_hex`
    pub unit: String,
    /// Quantity in the smallest unit
    pub quantity: u64,
}

impl AssetAmount {
    /// Convenience constructor.
    pub fn new(unit: impl Into<String>, quantity: u64) -> Self {
        Self { unit: unit.into(), quantity }
    }
}

/// A parsed unit identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Unit {
    /// The base currency
    Lovelace,
    /// A native asset under a minting policy
    Asset {
        /// 56 hex chars (28-byte script hash)
        policy_id: String,
        /// Hex-encoded asset name, possibly empty
        asset_name: String,
    },
}

impl Unit {
    /// Parses `"lovelace"` or `policy_id + asset_name_hex`.
    pub fn parse(unit: &str) -> Result<Unit> {
        if unit == LOVELACE {
            return Ok(Unit::Lovelace);
        }
        if unit.len() < 56 || !unit.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::AssetNotAvailable(unit.to_string()));
        }
        Ok(Unit::Asset {
            policy_id: unit[..56].to_ascii_lowercase(),
            asset_name: unit[56..].to_ascii_lowercase(),
        })
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Lovelace => write!(f, "{LOVELACE}"),
            Unit::Asset { policy_id, asset_name } => write!(f, "{policy_id}{asset_name}"),
        }
    }
}

/// A multi-asset value: lovelace plus native-asset quantities grouped by
/// minting policy.
///
/// Asset maps are ordered (`BTreeMap`) so that iteration — and therefore
/// change splitting — is deterministic for a given value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Value {
    /// Lovelace carried by this value
    pub coin: u64,
    assets: BTreeMap<String, BTreeMap<String, u64>>,
}

impl Value {
    /// A value holding only lovelace.
    pub fn from_lovelace(coin: u64) -> Self {
        Self { coin, assets: BTreeMap::new() }
    }

    /// Builds a value from a wallet-facing asset list.
    pub fn from_assets(lovelace: u64, assets: &[AssetAmount]) -> Result<Self> {
        let mut value = Value::from_lovelace(lovelace);
        for asset in assets {
            value.add_unit(&asset.unit, asset.quantity)?;
        }
        Ok(value)
    }

    /// Adds a quantity under a parsed-on-the-fly unit string.
    pub fn add_unit(&mut self, unit: &str, quantity: u64) -> Result<()> {
        match Unit::parse(unit)? {
            Unit::Lovelace => self.coin = self.coin.saturating_add(quantity),
            Unit::Asset { policy_id, asset_name } => {
                self.add_asset(&policy_id, &asset_name, quantity)
            }
        }
        Ok(())
    }

    /// Adds a native-asset quantity.
    pub fn add_asset(&mut self, policy_id: &str, asset_name: &str, quantity: u64) {
        if quantity == 0 {
            return;
        }
        let entry = self
            .assets
            .entry(policy_id.to_string())
            .or_default()
            .entry(asset_name.to_string())
            .or_insert(0);
        *entry = entry.saturating_add(quantity);
    }

    /// The asset map, policy → name → quantity.
    pub fn assets(&self) -> &BTreeMap<String, BTreeMap<String, u64>> {
        &self.assets
    }

    /// True when no native assets are carried.
    pub fn has_no_assets(&self) -> bool {
        self.assets.is_empty()
    }

    /// Number of distinct native assets.
    pub fn asset_count(&self) -> usize {
        self.assets.values().map(BTreeMap::len).sum()
    }

    /// Quantity carried for a unit (0 when absent).
    pub fn quantity_of(&self, unit: &Unit) -> u64 {
        match unit {
            Unit::Lovelace => self.coin,
            Unit::Asset { policy_id, asset_name } => self
                .assets
                .get(policy_id)
                .and_then(|names| names.get(asset_name))
                .copied()
                .unwrap_or(0),
        }
    }

    /// Every unit present, lovelace first.
    pub fn units(&self) -> Vec<Unit> {
        let mut units = Vec::with_capacity(1 + self.asset_count());
        if self.coin > 0 {
            units.push(Unit::Lovelace);
        }
        for (policy_id, names) in &self.assets {
            for asset_name in names.keys() {
                units.push(Unit::Asset {
                    policy_id: policy_id.clone(),
                    asset_name: asset_name.clone(),
                });
            }
        }
        units
    }

    /// Flattens to the wallet-facing list, lovelace first.
    pub fn flatten(&self) -> Vec<AssetAmount> {
        let mut out = vec![AssetAmount::new(LOVELACE, self.coin)];
        for (policy_id, names) in &self.assets {
            for (asset_name, quantity) in names {
                out.push(AssetAmount::new(format!("{policy_id}{asset_name}"), *quantity));
            }
        }
        out
    }

    /// Component-wise addition.
    pub fn checked_add(&self, other: &Value) -> Option<Value> {
        let mut sum = self.clone();
        sum.coin = sum.coin.checked_add(other.coin)?;
        for (policy_id, names) in &other.assets {
            for (asset_name, quantity) in names {
                let entry = sum
                    .assets
                    .entry(policy_id.clone())
                    .or_default()
                    .entry(asset_name.clone())
                    .or_insert(0);
                *entry = entry.checked_add(*quantity)?;
            }
        }
        Some(sum)
    }

    /// Component-wise subtraction; `None` when any component would go
    /// negative. Zeroed assets are dropped from the map.
    pub fn checked_sub(&self, other: &Value) -> Option<Value> {
        let mut diff = self.clone();
        diff.coin = diff.coin.checked_sub(other.coin)?;
        for (policy_id, names) in &other.assets {
            for (asset_name, quantity) in names {
                let held = diff.assets.get_mut(policy_id)?.get_mut(asset_name)?;
                *held = held.checked_sub(*quantity)?;
            }
        }
        diff.prune();
        Some(diff)
    }

    /// True when every component of `other` is covered by `self`.
    pub fn covers(&self, other: &Value) -> bool {
        self.checked_sub(other).is_some()
    }

    fn prune(&mut self) {
        for names in self.assets.values_mut() {
            names.retain(|_, quantity| *quantity > 0);
        }
        self.assets.retain(|_, names| !names.is_empty());
    }
}
