//! End-to-end orchestration tests: protocol parameters from a mock
//! indexer, UTXOs from an in-memory wallet, build/sign/submit through
//! the stub codec, and the confirmation polling contract.

use resolvd_cardano::{
    submit_transfer, submit_transfer_intent, verify_tx_created, verify_tx_created_every,
    CardanoChainData, PollOptions, Recipient, TransferRequest,
};
use resolvd_error::{Error, ErrorKind};
use resolvd_gateway::{ChainGateway, Credentials, Endpoints, GatewayConfig, Network};
use resolvd_testing::{lovelace_utxo, MemoryPaymentWallet, MemoryWallet, StubCodec};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chain_for(server: &MockServer) -> CardanoChainData {
    let endpoints = Endpoints {
        koios_mainnet: server.uri(),
        koios_testnet: server.uri(),
        ..Default::default()
    };
    let config = GatewayConfig::new(Network::Mainnet)
        .with_credentials(Credentials::Public)
        .with_endpoints(endpoints)
        .with_request_delay_ms(0)
        .with_timeout_ms(2_000);
    CardanoChainData::new(ChainGateway::new(config).unwrap())
}

fn offline_chain() -> CardanoChainData {
    let endpoints = Endpoints {
        koios_mainnet: "http://127.0.0.1:9".into(),
        koios_testnet: "http://127.0.0.1:9".into(),
        ..Default::default()
    };
    let config = GatewayConfig::new(Network::Mainnet)
        .with_endpoints(endpoints)
        .with_request_delay_ms(0)
        .with_timeout_ms(200);
    CardanoChainData::new(ChainGateway::new(config).unwrap())
}

async fn mount_epoch_routes(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/tip"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"epoch": 450, "abs_slot": 50_000_000, "block_no": 9_000_000}
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/epoch_info"))
        .and(query_param("_epoch_no", "450"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "epoch_no": 450,
            "first_block_time": "2024-04-01T21:44:51.000Z",
            "last_block_time": "2024-04-06T21:43:11.000Z",
            "blk_count": 20_992,
            "tx_count": 401_115,
            "out_sum": "91238341107527431",
            "fees": "86103399715",
            "active_stake": "22980135879302357"
        }])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/epoch_params"))
        .and(query_param("_epoch_no", "450"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "min_fee_a": 44,
            "min_fee_b": 155_381,
            "min_utxo_value": "1000000",
            "pool_deposit": "500000000",
            "key_deposit": "2000000",
            "coins_per_utxo_word": "34482",
            "max_val_size": 5_000,
            "price_mem": 0.0577,
            "price_step": 0.0000721,
            "max_tx_size": 16_384
        }])))
        .mount(server)
        .await;
}

// ============================================================================
// Build → sign → submit
// ============================================================================

#[tokio::test]
async fn transfer_builds_signs_and_submits() {
    let server = MockServer::start().await;
    mount_epoch_routes(&server).await;

    let codec = StubCodec::new();
    let utxos: Vec<_> = (0..6).map(|i| lovelace_utxo(i, 5_000_000)).collect();
    let wallet = MemoryWallet::new("addr1payer")
        .with_utxos(&codec, &utxos)
        .with_submit_response("c0ffee0123456789abcdef");

    let chain = chain_for(&server);
    let request = TransferRequest::simple(Recipient::ada("addr1dest", 2.0));
    let mut rng = StdRng::seed_from_u64(7);

    let receipt = submit_transfer(&chain, &codec, &wallet, &request, &mut rng)
        .await
        .unwrap();

    assert_eq!(receipt.tx, "c0ffee0123456789abcdef");
    assert!(receipt
        .explorers
        .cardanoscan
        .ends_with("transaction/c0ffee0123456789abcdef"));
    assert_eq!(wallet.sign_calls(), 1);
    assert_eq!(wallet.submit_calls(), 1);
}

#[tokio::test]
async fn malformed_submission_response_is_not_a_hash() {
    let server = MockServer::start().await;
    mount_epoch_routes(&server).await;

    let codec = StubCodec::new();
    let utxos: Vec<_> = (0..6).map(|i| lovelace_utxo(i, 5_000_000)).collect();
    let wallet = MemoryWallet::new("addr1payer")
        .with_utxos(&codec, &utxos)
        .with_submit_response("user declined the transaction");

    let chain = chain_for(&server);
    let request = TransferRequest::simple(Recipient::ada("addr1dest", 2.0));
    let mut rng = StdRng::seed_from_u64(7);

    let err = submit_transfer(&chain, &codec, &wallet, &request, &mut rng)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MalformedTxHash(_)));
}

#[tokio::test]
async fn epoch_failure_aborts_before_signing() {
    let codec = StubCodec::new();
    let utxos: Vec<_> = (0..6).map(|i| lovelace_utxo(i, 5_000_000)).collect();
    let wallet = MemoryWallet::new("addr1payer").with_utxos(&codec, &utxos);

    let chain = offline_chain();
    let request = TransferRequest::simple(Recipient::ada("addr1dest", 2.0));
    let mut rng = StdRng::seed_from_u64(7);

    let err = submit_transfer(&chain, &codec, &wallet, &request, &mut rng)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::EpochUnavailable(_)));
    assert_eq!(wallet.sign_calls(), 0);
    assert_eq!(wallet.submit_calls(), 0);
}

#[tokio::test]
async fn intent_wallet_receives_structured_outputs() {
    let wallet = MemoryPaymentWallet::new("beef0123456789");
    let request = TransferRequest::multiple(vec![
        Recipient::ada("addr1one", 1.5),
        Recipient { address: "addr1two".into(), amount: None, assets: Vec::new() },
    ])
    .with_metadata(674, json!({"msg": ["hello"]}));

    let receipt = submit_transfer_intent(Network::Mainnet, &wallet, &request)
        .await
        .unwrap();

    assert_eq!(receipt.tx, "beef0123456789");
    let intent = wallet.last_intent().unwrap();
    assert_eq!(intent.outputs.len(), 2);
    assert_eq!(intent.outputs[0].amount.as_deref(), Some("1500000"));
    assert_eq!(intent.metadata.as_ref().unwrap().label, 674);
}

#[tokio::test]
async fn declining_intent_wallet_surfaces_submission_error() {
    let wallet = MemoryPaymentWallet::declining("not enough funds");
    let request = TransferRequest::simple(Recipient::ada("addr1one", 1.0));

    let err = submit_transfer_intent(Network::Mainnet, &wallet, &request)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SigningOrSubmission);
}

// ============================================================================
// Confirmation polling
// ============================================================================

#[tokio::test]
async fn confirmation_stops_early_on_first_hit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tx_info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"tx_hash": "aa00", "block_height": 9_000_000}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let chain = chain_for(&server);
    let confirmation = verify_tx_created_every(
        &chain,
        "aa00",
        PollOptions { seconds: 20, tries: 5, cancel: None },
    )
    .await
    .unwrap();

    assert!(confirmation.created);
    assert!(confirmation.explorers.cardanoscan.ends_with("transaction/aa00"));
}

#[tokio::test(start_paused = true)]
async fn polling_terminates_after_exactly_two_attempts() {
    let chain = offline_chain();
    let started = tokio::time::Instant::now();

    let err = verify_tx_created_every(
        &chain,
        "aa00",
        PollOptions { seconds: 20, tries: 2, cancel: None },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::TransactionNotFound(_)));
    // two attempts mean exactly one inter-attempt sleep
    let elapsed = started.elapsed();
    assert!(elapsed >= std::time::Duration::from_secs(20));
    assert!(elapsed < std::time::Duration::from_secs(40));
}

#[tokio::test]
async fn one_shot_check_reports_absence() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tx_info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let chain = chain_for(&server);
    assert!(!verify_tx_created(&chain, "aa00").await);
}
