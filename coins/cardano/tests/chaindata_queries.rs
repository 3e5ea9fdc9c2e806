//! Chain-data query tests: the same canonical output shape must come
//! back whichever backend answered, and absence maps to the typed
//! not-found errors.

use resolvd_cardano::CardanoChainData;
use resolvd_error::{Error, ErrorKind};
use resolvd_gateway::{ChainGateway, Credentials, Endpoints, GatewayConfig, Network};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STAKE: &str = "stake1u9fzg77vrgfqilaorqn86hmpnvmo5duwwpeuf5y8yvhhsgq6zz4zz";
const ADDR: &str = "addr1q9fzg77vrgfqilaorqn86hmpnvmo5duwwpeuf5y8yvhhsgq6zz4zz";

fn chain_for(server: &MockServer, credentials: Credentials) -> CardanoChainData {
    let endpoints = Endpoints {
        koios_mainnet: server.uri(),
        blockfrost_mainnet: server.uri(),
        directory: format!("{}/art/", server.uri()),
        ..Default::default()
    };
    let config = GatewayConfig::new(Network::Mainnet)
        .with_credentials(credentials)
        .with_endpoints(endpoints)
        .with_request_delay_ms(0)
        .with_timeout_ms(2_000);
    CardanoChainData::new(ChainGateway::new(config).unwrap())
}

// ============================================================================
// Accounts
// ============================================================================

#[tokio::test]
async fn koios_account_is_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/address_info"))
        .and(query_param("_address", ADDR))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"stake_address": STAKE}])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/account_info"))
        .and(query_param("_address", STAKE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "status": "registered",
            "delegated_pool": "pool1abc",
            "reserves": "0",
            "withdrawals": "123",
            "rewards": "456",
            "treasury": "0",
            "total_balance": "91500000"
        }])))
        .mount(&server)
        .await;

    let chain = chain_for(&server, Credentials::Public);
    let account = chain.account_information(ADDR).await.unwrap();

    assert!(account.active);
    assert_eq!(account.stake_address, STAKE);
    assert_eq!(account.pool_id.as_deref(), Some("pool1abc"));
    assert_eq!(account.balance, "91500000");
}

#[tokio::test]
async fn blockfrost_account_matches_the_same_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/accounts/{STAKE}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "active": true,
            "pool_id": "pool1abc",
            "reserves_sum": "0",
            "withdrawals_sum": "123",
            "rewards_sum": "456",
            "treasury_sum": "0",
            "controlled_amount": "91500000"
        })))
        .mount(&server)
        .await;

    let credentials = Credentials::Blockfrost { project_id: "proj".into() };
    let chain = chain_for(&server, credentials);
    let account = chain.account_information(STAKE).await.unwrap();

    assert!(account.active);
    assert_eq!(account.pool_id.as_deref(), Some("pool1abc"));
    assert_eq!(account.withdrawals, "123");
    assert_eq!(account.balance, "91500000");
}

#[tokio::test]
async fn wrong_prefix_is_a_validation_error() {
    let server = MockServer::start().await;
    let chain = chain_for(&server, Credentials::Public);

    let err = chain.account_information("0xdeadbeef").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_account_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/account_info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let chain = chain_for(&server, Credentials::Public);
    let err = chain.account_information(STAKE).await.unwrap_err();
    assert!(matches!(err, Error::AccountNotFound));
}

// ============================================================================
// Pools
// ============================================================================

#[tokio::test]
async fn koios_pool_metadata_is_flattened() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/account_info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "status": "registered", "delegated_pool": "pool1abc",
            "reserves": "0", "withdrawals": "0", "rewards": "0",
            "treasury": "0", "total_balance": "1"
        }])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/pool_info"))
        .and(body_partial_json(json!({"_pool_bech32_ids": ["pool1abc"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "pool_id_bech32": "pool1abc",
            "pool_id_hex": "0a0b0c",
            "meta_json": {
                "homepage": "https://pool.example",
                "name": "Example Pool",
                "description": "An example",
                "ticker": "EXMPL"
            }
        }])))
        .mount(&server)
        .await;

    let chain = chain_for(&server, Credentials::Public);
    let pool = chain.pool_info_by_address(STAKE).await.unwrap();

    assert_eq!(pool.pool_id_bech32.as_deref(), Some("pool1abc"));
    assert_eq!(pool.ticker.as_deref(), Some("EXMPL"));
    assert_eq!(pool.name.as_deref(), Some("Example Pool"));
}

#[tokio::test]
async fn undelegated_account_has_no_pool() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/account_info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "status": "registered", "delegated_pool": null,
            "reserves": "0", "withdrawals": "0", "rewards": "0",
            "treasury": "0", "total_balance": "1"
        }])))
        .mount(&server)
        .await;

    let chain = chain_for(&server, Credentials::Public);
    let err = chain.pool_id_by_address(STAKE).await.unwrap_err();
    assert!(matches!(err, Error::PoolNotFound));
}

// ============================================================================
// Assets
// ============================================================================

#[tokio::test]
async fn koios_asset_info_is_normalized() {
    let server = MockServer::start().await;
    let policy = "f0ff48bbb7bbe9d59a40f1ce90e9e9d0ff5002ec48f232b49ca0fb9a";
    Mock::given(method("GET"))
        .and(path("/asset_info"))
        .and(query_param("_asset_policy", policy))
        .and(query_param("_asset_name", "63617264616e6f"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "policy_id": policy,
            "asset_name": "63617264616e6f",
            "fingerprint": "asset1abc",
            "total_supply": "1",
            "token_registry_metadata": {"ticker": "HANDLE"}
        }])))
        .mount(&server)
        .await;

    let chain = chain_for(&server, Credentials::Public);
    let info = chain
        .asset_info_by_unit(&format!("{policy}63617264616e6f"))
        .await
        .unwrap();

    assert_eq!(info.policy_id, policy);
    assert_eq!(info.quantity, "1");
    assert_eq!(info.unit, format!("{policy}63617264616e6f"));
    assert!(info.metadata.is_some());
}

#[tokio::test]
async fn unknown_asset_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/asset_info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let chain = chain_for(&server, Credentials::Public);
    let policy = "f0ff48bbb7bbe9d59a40f1ce90e9e9d0ff5002ec48f232b49ca0fb9a";
    let err = chain.asset_info_by_unit(&format!("{policy}00")).await.unwrap_err();
    assert!(matches!(err, Error::AssetNotFound));
}

// ============================================================================
// Protocol parameters
// ============================================================================

#[tokio::test]
async fn protocol_parameters_parse_stringly_numbers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tip"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"epoch": 450, "abs_slot": "50000000"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/epoch_info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "epoch_no": 450, "blk_count": "20992", "tx_count": 401115,
            "out_sum": 91238341107527431u64, "fees": "86103399715"
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/epoch_params"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "min_fee_a": "44", "min_fee_b": 155381,
            "min_utxo_value": null,
            "pool_deposit": "500000000", "key_deposit": "2000000",
            "coins_per_utxo_word": "34482", "max_val_size": "5000",
            "price_mem": "0.0577", "price_step": 0.0000721,
            "max_tx_size": 16384
        }])))
        .mount(&server)
        .await;

    let chain = chain_for(&server, Credentials::Public);
    let params = chain.protocol_parameters().await.unwrap();

    assert_eq!(params.min_fee_a, 44);
    assert_eq!(params.min_fee_b, 155_381);
    // absent min_utxo falls back to 1 ADA
    assert_eq!(params.min_utxo, 1_000_000);
    assert_eq!(params.max_val_size, 5_000);
    assert_eq!(params.current_slot, 50_000_000);
    assert!((params.price_mem - 0.0577).abs() < f64::EPSILON);
}

#[tokio::test]
async fn epoch_outage_is_reported_as_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tip"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let chain = chain_for(&server, Credentials::Public);
    let err = chain.protocol_parameters().await.unwrap_err();
    assert!(matches!(err, Error::EpochUnavailable(_)));
}
