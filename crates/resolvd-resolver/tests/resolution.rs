//! End-to-end resolution tests against a mock HTTP boundary: the strict
//! short-circuit order, handle lookups, directory fallback, and the
//! name-service branches.

use resolvd_error::{Error, ErrorKind};
use resolvd_gateway::{
    ChainGateway, Credentials, Endpoints, EthereumProviderConfig, GatewayConfig, Network,
    ADAHANDLE_POLICY_MAINNET,
};
use resolvd_resolver::Resolver;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// CIP-19 example address
const ADA_ADDRESS: &str = "addr1qx2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzer3n0d3vllmyqwsx5wktcd8cc3sq835lu7drv2xwl2wywfgse35a3x";

fn resolver_for(server: &MockServer) -> Resolver {
    let endpoints = Endpoints {
        koios_mainnet: server.uri(),
        koios_testnet: server.uri(),
        blockfrost_mainnet: server.uri(),
        blockfrost_testnet: server.uri(),
        tangocrypto_mainnet: server.uri(),
        tangocrypto_testnet: server.uri(),
        directory: format!("{}/art/", server.uri()),
        unstoppable: format!("{}/resolve", server.uri()),
    };
    let config = GatewayConfig::new(Network::Mainnet)
        .with_credentials(Credentials::Public)
        .with_endpoints(endpoints)
        .with_unstoppable_api_key("ud-test-key")
        .with_request_delay_ms(0);
    Resolver::new(ChainGateway::new(config).unwrap())
}

// ============================================================================
// Short-circuit order
// ============================================================================

#[tokio::test]
async fn valid_address_returns_without_any_request() {
    let server = MockServer::start().await;
    let resolver = resolver_for(&server);

    let resolved = resolver.resolve_ada(ADA_ADDRESS).await.unwrap();

    assert_eq!(resolved, ADA_ADDRESS);
    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "resolution must not touch the network");
}

#[tokio::test]
async fn valid_eth_address_short_circuits() {
    let server = MockServer::start().await;
    let resolver = resolver_for(&server);

    let address = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
    assert_eq!(resolver.resolve_eth(address).await.unwrap(), address);
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ============================================================================
// Handle branch
// ============================================================================

#[tokio::test]
async fn handle_resolves_via_hex_encoded_asset_lookup() {
    let server = MockServer::start().await;
    // "$cardano" → asset name hex 63617264616e6f under the mainnet policy
    Mock::given(method("GET"))
        .and(path("/asset_address_list"))
        .and(query_param("_asset_policy", ADAHANDLE_POLICY_MAINNET))
        .and(query_param("_asset_name", "63617264616e6f"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"payment_address": "addr1owner"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resolver = resolver_for(&server);
    let resolved = resolver.resolve_ada("$cardano").await.unwrap();

    assert_eq!(resolved, "addr1owner");
}

#[tokio::test]
async fn missing_handle_reports_not_found_naming_the_handle() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/asset_address_list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let resolver = resolver_for(&server);
    let err = resolver.resolve_ada("$cardano").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.to_string(), "The handle $cardano not found");
}

#[tokio::test]
async fn bare_handle_without_prefix_is_invalid() {
    let server = MockServer::start().await;
    let resolver = resolver_for(&server);

    let err = resolver.resolve_handle("cardano").await.unwrap_err();
    assert!(matches!(err, Error::InvalidHandle(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ============================================================================
// Directory fallback
// ============================================================================

#[tokio::test]
async fn directory_fallback_returns_stored_address() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/art/"))
        .and(query_param("art-domain", "alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "assets": {"ada": "addr1alice", "sol": "So11111111111111111111111111111111111111112"}
        })))
        .mount(&server)
        .await;

    let resolver = resolver_for(&server);
    assert_eq!(resolver.resolve_ada("alice").await.unwrap(), "addr1alice");
}

#[tokio::test]
async fn directory_record_holding_a_handle_recurses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/art/"))
        .and(query_param("art-domain", "bob"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"assets": {"ada": "$bob"}})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/asset_address_list"))
        .and(query_param("_asset_name", "626f62"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"payment_address": "addr1bob"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resolver = resolver_for(&server);
    assert_eq!(resolver.resolve_ada("bob").await.unwrap(), "addr1bob");
}

#[tokio::test]
async fn missing_directory_record_names_the_chain() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/art/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"assets": {}})))
        .mount(&server)
        .await;

    let resolver = resolver_for(&server);
    let err = resolver.resolve_sol("nobody").await.unwrap_err();

    assert_eq!(err.to_string(), "Resolver SOL address not found");
}

// ============================================================================
// Name services
// ============================================================================

#[tokio::test]
async fn unstoppable_domain_resolves_eth_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resolve/domains/alice.crypto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": {"crypto.ETH.address": "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"}
        })))
        .mount(&server)
        .await;

    let resolver = resolver_for(&server);
    let resolved = resolver.resolve_eth("alice.crypto").await.unwrap();

    assert_eq!(resolved, "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
}

#[tokio::test]
async fn unstoppable_domain_without_record_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resolve/domains/ghost.crypto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"records": {}})))
        .mount(&server)
        .await;

    let resolver = resolver_for(&server);
    let err = resolver.resolve_eth("ghost.crypto").await.unwrap_err();

    assert!(matches!(err, Error::DomainNotFound(_)));
}

#[tokio::test]
async fn ens_domain_resolves_through_registry_and_resolver() {
    let server = MockServer::start().await;
    // digits-only so the checksummed form is predictable
    let resolver_contract = "0x0000000000000000000000000000000000000011";
    // first eth_call: registry → resolver contract
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "eth_call"})))
        .and(body_partial_json(
            json!({"params": [{"to": "0x00000000000C2E074eC69A0dFb2997BA6C7d2e1e"}, "latest"]}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0", "id": 1,
            "result": format!("0x{}{}", "0".repeat(24), &resolver_contract[2..])
        })))
        .mount(&server)
        .await;
    // second eth_call: resolver → address record
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "eth_call"})))
        .and(body_partial_json(json!({"params": [{"to": resolver_contract}, "latest"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0", "id": 1,
            "result": format!("0x{}{}", "0".repeat(24), "5aaeb6053f3e94c9b9a09f33669435e7ef1beaed")
        })))
        .mount(&server)
        .await;

    let resolver = resolver_for(&server)
        .with_eth_provider(EthereumProviderConfig::endpoint(server.uri()));
    let resolved = resolver.resolve_eth("alice.eth").await.unwrap();

    assert_eq!(resolved, "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
}

#[tokio::test]
async fn ens_zero_address_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0", "id": 1,
            "result": format!("0x{}", "0".repeat(64))
        })))
        .mount(&server)
        .await;

    let resolver = resolver_for(&server)
        .with_eth_provider(EthereumProviderConfig::endpoint(server.uri()));
    let err = resolver.resolve_eth("ghost.eth").await.unwrap_err();

    assert!(matches!(err, Error::DomainNotFound(_)));
}

#[tokio::test]
async fn ens_without_provider_reports_missing_credential() {
    let server = MockServer::start().await;
    let resolver = resolver_for(&server);

    let err = resolver.resolve_eth("alice.eth").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

// ============================================================================
// IPFS records
// ============================================================================

#[tokio::test]
async fn ipfs_url_joins_named_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resolve/domains/alice.crypto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": {"ipfs.html.value": "QmTestHash"}
        })))
        .mount(&server)
        .await;

    let resolver = resolver_for(&server);
    let url = resolver.ipfs_url("alice.crypto", "cloudflare").await.unwrap();

    assert_eq!(url, "https://cloudflare-ipfs.com/ipfs/QmTestHash");
}
