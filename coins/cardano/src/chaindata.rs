use resolvd_error::{Error, Result};
use resolvd_gateway::{ApiResponse, Backend, ChainGateway, Network};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::config::{explorer_links, ExplorerLinks};
use crate::params::ProtocolParameters;

/// Normalized account state, identical regardless of which backend
/// answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInformation {
    /// Whether the stake key is registered
    pub active: bool,
    /// The account's stake address
    pub stake_address: String,
    /// Delegated pool, if any
    pub pool_id: Option<String>,
    /// Reserves balance (decimal string)
    pub reserves: String,
    /// Withdrawn total (decimal string)
    pub withdrawals: String,
    /// Accumulated rewards (decimal string)
    pub rewards: String,
    /// Treasury balance (decimal string)
    pub treasury: String,
    /// Controlled total balance (decimal string)
    pub balance: String,
}

/// Normalized pool metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolInfo {
    /// Bech32 pool id
    pub pool_id_bech32: Option<String>,
    /// Hex pool id
    pub pool_id_hex: Option<String>,
    /// Homepage URL
    pub homepage: Option<String>,
    /// Pool display name
    pub name: Option<String>,
    /// Pool description
    pub description: Option<String>,
    /// Ticker symbol
    pub ticker: Option<String>,
}

/// Latest-epoch digest plus the protocol parameter snapshot used by
/// transaction building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochSummary {
    /// Epoch number
    pub epoch: u64,
    /// First block timestamp, as reported by the backend
    pub first_block_time: Json,
    /// Last block timestamp, as reported by the backend
    pub last_block_time: Json,
    /// Blocks minted this epoch
    pub block_count: u64,
    /// Transactions this epoch
    pub tx_count: u64,
    /// Total output (decimal string)
    pub output: String,
    /// Total fees (decimal string)
    pub fees: String,
    /// Active stake (decimal string), when the backend reports it
    pub active_stake: Option<String>,
    /// Protocol parameters in effect
    pub parameters: ProtocolParameters,
}

/// Normalized asset record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetInfo {
    /// `policy_id + asset_name_hex`
    pub unit: String,
    /// Minting policy id
    pub policy_id: String,
    /// Hex-encoded asset name
    pub asset_name: Option<String>,
    /// CIP-14 fingerprint
    pub fingerprint: Option<String>,
    /// Total supply (decimal string)
    pub quantity: String,
    /// Registry or on-chain metadata, whichever the backend has
    pub metadata: Option<Json>,
}

/// A transaction looked up by hash, with derived explorer links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionInfo {
    /// Backend-reported transaction record
    pub info: Json,
    /// Derived explorer URLs
    pub explorers: ExplorerLinks,
}

/// Cardano chain queries over the gateway, normalizing the field-name
/// differences between backends into one canonical shape.
#[derive(Debug, Clone)]
pub struct CardanoChainData {
    gateway: ChainGateway,
}

impl CardanoChainData {
    /// Wraps a gateway.
    pub fn new(gateway: ChainGateway) -> Self {
        Self { gateway }
    }

    /// The underlying gateway.
    pub fn gateway(&self) -> &ChainGateway {
        &self.gateway
    }

    /// The network queries run against.
    pub fn network(&self) -> Network {
        self.gateway.config().network
    }

    // Account, pool and epoch routes exist on Koios and Blockfrost only;
    // Tangocrypto credentials fall back to the public indexer for them.
    fn use_blockfrost(&self) -> bool {
        self.gateway.backend() == Backend::Blockfrost
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    /// Account state by stake address or payment address.
    pub async fn account_information(&self, address: &str) -> Result<AccountInformation> {
        let stake = self.stake_address(address).await?;
        let result = if self.use_blockfrost() {
            self.blockfrost_account(&stake).await
        } else {
            self.koios_account(&stake).await
        };
        result.map_err(|err| {
            tracing::debug!(%err, "account lookup failed");
            Error::AccountNotFound
        })
    }

    /// Resolves a payment address to its stake address; stake addresses
    /// pass through unchanged.
    pub async fn stake_address(&self, address: &str) -> Result<String> {
        if address.starts_with("stake") {
            return Ok(address.to_string());
        }
        if !address.starts_with("addr") {
            return Err(Error::InvalidAddress {
                address: address.to_string(),
                reason: "expected a stake address or a payment address".into(),
            });
        }
        let found = if self.use_blockfrost() {
            let response = self.gateway.blockfrost_get(&format!("addresses/{address}")).await?;
            response
                .is_success()
                .then(|| string_field(&response.body, "stake_address"))
                .flatten()
        } else {
            let response = self
                .gateway
                .koios_get(&format!("address_info?_address={address}"))
                .await?;
            string_field(&response.body, "stake_address")
        };
        found.ok_or(Error::AccountNotFound)
    }

    async fn koios_account(&self, stake: &str) -> Result<AccountInformation> {
        let response = self
            .gateway
            .koios_get(&format!("account_info?_address={stake}"))
            .await?;
        let body = &response.body;
        if !body.is_object() {
            return Err(Error::AccountNotFound);
        }
        Ok(AccountInformation {
            active: string_field(body, "status").as_deref() == Some("registered"),
            stake_address: stake.to_string(),
            pool_id: string_field(body, "delegated_pool"),
            reserves: string_field(body, "reserves").unwrap_or_default(),
            withdrawals: string_field(body, "withdrawals").unwrap_or_default(),
            rewards: string_field(body, "rewards").unwrap_or_default(),
            treasury: string_field(body, "treasury").unwrap_or_default(),
            balance: string_field(body, "total_balance").unwrap_or_default(),
        })
    }

    async fn blockfrost_account(&self, stake: &str) -> Result<AccountInformation> {
        let response = self
            .gateway
            .blockfrost_get(&format!("accounts/{stake}"))
            .await?
            .into_success()?;
        let body = &response.body;
        Ok(AccountInformation {
            active: body.get("active").and_then(Json::as_bool).unwrap_or(false),
            stake_address: stake.to_string(),
            pool_id: string_field(body, "pool_id"),
            reserves: string_field(body, "reserves_sum").unwrap_or_default(),
            withdrawals: string_field(body, "withdrawals_sum").unwrap_or_default(),
            rewards: string_field(body, "rewards_sum").unwrap_or_default(),
            treasury: string_field(body, "treasury_sum").unwrap_or_default(),
            balance: string_field(body, "controlled_amount").unwrap_or_default(),
        })
    }

    // ========================================================================
    // Pools
    // ========================================================================

    /// The pool an address delegates to.
    pub async fn pool_id_by_address(&self, address: &str) -> Result<String> {
        let account = self
            .account_information(address)
            .await
            .map_err(|_| Error::PoolNotFound)?;
        account.pool_id.filter(|id| !id.is_empty()).ok_or(Error::PoolNotFound)
    }

    /// Pool metadata for the pool an address delegates to.
    pub async fn pool_info_by_address(&self, address: &str) -> Result<PoolInfo> {
        let pool_id = self.pool_id_by_address(address).await?;
        if self.use_blockfrost() {
            let response = self
                .gateway
                .blockfrost_get(&format!("pools/{pool_id}/metadata"))
                .await?
                .into_success()
                .map_err(|_| Error::PoolNotFound)?;
            let body = &response.body;
            Ok(PoolInfo {
                pool_id_bech32: string_field(body, "pool_id"),
                pool_id_hex: string_field(body, "hex"),
                homepage: string_field(body, "homepage"),
                name: string_field(body, "name"),
                description: string_field(body, "description"),
                ticker: string_field(body, "ticker"),
            })
        } else {
            let response = self
                .gateway
                .koios_post("pool_info", serde_json::json!({ "_pool_bech32_ids": [pool_id] }))
                .await?;
            let body = &response.body;
            if !body.is_object() {
                return Err(Error::PoolNotFound);
            }
            let meta = body.get("meta_json").cloned().unwrap_or(Json::Null);
            Ok(PoolInfo {
                pool_id_bech32: string_field(body, "pool_id_bech32"),
                pool_id_hex: string_field(body, "pool_id_hex"),
                homepage: string_field(&meta, "homepage"),
                name: string_field(&meta, "name"),
                description: string_field(&meta, "description"),
                ticker: string_field(&meta, "ticker"),
            })
        }
    }

    // ========================================================================
    // Epoch / protocol parameters
    // ========================================================================

    /// Latest epoch digest plus its protocol parameters. Fetched fresh on
    /// every call; nothing is cached across transaction builds.
    pub async fn latest_epoch(&self) -> Result<EpochSummary> {
        let result = if self.use_blockfrost() {
            self.blockfrost_epoch().await
        } else {
            self.koios_epoch().await
        };
        result.map_err(|err| Error::EpochUnavailable(err.to_string()))
    }

    /// Protocol parameters in effect right now.
    pub async fn protocol_parameters(&self) -> Result<ProtocolParameters> {
        Ok(self.latest_epoch().await?.parameters)
    }

    async fn koios_epoch(&self) -> Result<EpochSummary> {
        let tip = self.gateway.koios_get("tip").await?.into_success()?;
        let epoch_no = u64_field(&tip.body, "epoch")
            .ok_or_else(|| Error::Json("tip has no epoch".into()))?;
        let slot = u64_field(&tip.body, "abs_slot").unwrap_or(0);

        let info = self
            .gateway
            .koios_get(&format!("epoch_info?_epoch_no={epoch_no}"))
            .await?
            .into_success()?;
        let params = self
            .gateway
            .koios_get(&format!("epoch_params?_epoch_no={epoch_no}"))
            .await?
            .into_success()?;
        let info = &info.body;
        let raw = &params.body;

        Ok(EpochSummary {
            epoch: u64_field(info, "epoch_no").unwrap_or(epoch_no),
            first_block_time: info.get("first_block_time").cloned().unwrap_or(Json::Null),
            last_block_time: info.get("last_block_time").cloned().unwrap_or(Json::Null),
            block_count: u64_field(info, "blk_count").unwrap_or(0),
            tx_count: u64_field(info, "tx_count").unwrap_or(0),
            output: string_field(info, "out_sum").unwrap_or_default(),
            fees: string_field(info, "fees").unwrap_or_default(),
            active_stake: string_field(info, "active_stake"),
            parameters: ProtocolParameters {
                min_fee_a: require_u64(raw, "min_fee_a")?,
                min_fee_b: require_u64(raw, "min_fee_b")?,
                min_utxo: u64_field(raw, "min_utxo_value").filter(|v| *v > 0).unwrap_or(1_000_000),
                pool_deposit: require_u64(raw, "pool_deposit")?,
                key_deposit: require_u64(raw, "key_deposit")?,
                max_tx_size: require_u64(raw, "max_tx_size")?,
                max_val_size: u64_field(raw, "max_val_size").unwrap_or(5000),
                price_mem: f64_field(raw, "price_mem").unwrap_or(0.0),
                price_step: f64_field(raw, "price_step").unwrap_or(0.0),
                coins_per_utxo_word: u64_field(raw, "coins_per_utxo_word").unwrap_or(34_482),
                current_slot: slot,
            },
        })
    }

    async fn blockfrost_epoch(&self) -> Result<EpochSummary> {
        let epoch = self.gateway.blockfrost_get("epochs/latest").await?.into_success()?;
        let block = self.gateway.blockfrost_get("blocks/latest").await?.into_success()?;
        let params = self
            .gateway
            .blockfrost_get("epochs/latest/parameters")
            .await?
            .into_success()?;
        let info = &epoch.body;
        let raw = &params.body;

        Ok(EpochSummary {
            epoch: require_u64(info, "epoch")?,
            first_block_time: info.get("first_block_time").cloned().unwrap_or(Json::Null),
            last_block_time: info.get("last_block_time").cloned().unwrap_or(Json::Null),
            block_count: u64_field(info, "block_count").unwrap_or(0),
            tx_count: u64_field(info, "tx_count").unwrap_or(0),
            output: string_field(info, "output").unwrap_or_default(),
            fees: string_field(info, "fees").unwrap_or_default(),
            active_stake: string_field(info, "active_stake"),
            parameters: ProtocolParameters {
                min_fee_a: require_u64(raw, "min_fee_a")?,
                min_fee_b: require_u64(raw, "min_fee_b")?,
                min_utxo: u64_field(raw, "min_utxo").filter(|v| *v > 0).unwrap_or(1_000_000),
                pool_deposit: require_u64(raw, "pool_deposit")?,
                key_deposit: require_u64(raw, "key_deposit")?,
                max_tx_size: require_u64(raw, "max_tx_size")?,
                max_val_size: u64_field(raw, "max_val_size").unwrap_or(5000),
                price_mem: f64_field(raw, "price_mem").unwrap_or(0.0),
                price_step: f64_field(raw, "price_step").unwrap_or(0.0),
                coins_per_utxo_word: u64_field(raw, "coins_per_utxo_word").unwrap_or(34_482),
                current_slot: u64_field(&block.body, "slot").unwrap_or(0),
            },
        })
    }

    // ========================================================================
    // Assets
    // ========================================================================

    /// Asset record by unit (`policy_id + asset_name_hex`).
    pub async fn asset_info_by_unit(&self, unit: &str) -> Result<AssetInfo> {
        if unit.len() < 56 {
            return Err(Error::AssetNotFound);
        }
        let (asset_policy, asset_name) = unit.split_at(56);
        if self.use_blockfrost() {
            let response = self
                .gateway
                .blockfrost_get(&format!("assets/{unit}"))
                .await?
                .into_success()
                .map_err(|_| Error::AssetNotFound)?;
            let body = &response.body;
            Ok(AssetInfo {
                unit: string_field(body, "asset").unwrap_or_else(|| unit.to_string()),
                policy_id: string_field(body, "policy_id").unwrap_or_else(|| asset_policy.to_string()),
                asset_name: string_field(body, "asset_name"),
                fingerprint: string_field(body, "fingerprint"),
                quantity: string_field(body, "quantity").unwrap_or_default(),
                metadata: first_present(body, &["metadata", "onchain_metadata"]),
            })
        } else {
            let response = self
                .gateway
                .koios_get(&format!(
                    "asset_info?_asset_policy={asset_policy}&_asset_name={asset_name}"
                ))
                .await?;
            let body = &response.body;
            if !response.is_success() || string_field(body, "policy_id").is_none() {
                return Err(Error::AssetNotFound);
            }
            let minting_meta = body
                .get("minting_tx_metadata")
                .and_then(|m| m.get("json"))
                .cloned();
            Ok(AssetInfo {
                unit: format!(
                    "{}{}",
                    string_field(body, "policy_id").unwrap_or_default(),
                    string_field(body, "asset_name").unwrap_or_default()
                ),
                policy_id: string_field(body, "policy_id").unwrap_or_default(),
                asset_name: string_field(body, "asset_name"),
                fingerprint: string_field(body, "fingerprint"),
                quantity: string_field(body, "total_supply").unwrap_or_default(),
                metadata: first_present(body, &["token_registry_metadata"]).or(minting_meta),
            })
        }
    }

    // ========================================================================
    // Transactions
    // ========================================================================

    /// Transaction record by hash, with derived explorer links.
    pub async fn transaction_info(&self, tx: &str) -> Result<TransactionInfo> {
        let body = if self.use_blockfrost() {
            let response = self.gateway.blockfrost_get(&format!("txs/{tx}")).await?;
            if !response.is_success() {
                return Err(Error::TransactionNotFound(tx.to_string()));
            }
            response.body
        } else {
            let response = self
                .gateway
                .koios_post("tx_info", serde_json::json!({ "_tx_hashes": [tx] }))
                .await?;
            if !response.is_success() {
                return Err(Error::TransactionNotFound(tx.to_string()));
            }
            response.body
        };

        let empty = match &body {
            Json::Object(map) => map.is_empty(),
            Json::Array(items) => items.is_empty(),
            _ => true,
        };
        if empty {
            return Err(Error::TransactionNotFound(tx.to_string()));
        }

        Ok(TransactionInfo {
            info: body,
            explorers: explorer_links(self.network(), tx),
        })
    }

    /// Network uptime report from the directory service.
    pub async fn health(&self) -> Result<ApiResponse> {
        self.gateway.art_health().await
    }
}

// ============================================================================
// Field extraction helpers
// ============================================================================

fn string_field(body: &Json, key: &str) -> Option<String> {
    match body.get(key)? {
        Json::String(s) => Some(s.clone()),
        Json::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn u64_field(body: &Json, key: &str) -> Option<u64> {
    match body.get(key)? {
        Json::Number(n) => n.as_u64(),
        Json::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn f64_field(body: &Json, key: &str) -> Option<f64> {
    match body.get(key)? {
        Json::Number(n) => n.as_f64(),
        Json::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn require_u64(body: &Json, key: &str) -> Result<u64> {
    u64_field(body, key).ok_or_else(|| Error::Json(format!("missing numeric field {key}")))
}

fn first_present(body: &Json, keys: &[&str]) -> Option<Json> {
    keys.iter()
        .filter_map(|key| body.get(*key))
        .find(|value| !value.is_null())
        .cloned()
}
