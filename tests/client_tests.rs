mod common;

use alloy::{
    primitives::{address, U256},
    sol_types::SolCall,
};
use common::*;
use kaia_trading_mcp::{
    chain::KAIA_MAINNET,
    client::{BuyParams, SellParams, TokenMetadata},
    contracts::{buyCall, listCall, sellCall},
    error::ClientError,
};
use serde_json::Value;
use std::sync::Arc;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Nothing listens here; any request would fail loudly.
const UNUSED_API: &str = "http://127.0.0.1:9/";

fn buy_params(amount: U256) -> BuyParams {
    BuyParams {
        token_address: TOKEN,
        amount,
        min_token_amount: U256::ZERO,
    }
}

fn sell_params() -> SellParams {
    SellParams {
        token_address: TOKEN,
        amount: U256::from(500u64),
        min_base_amount: U256::from(7u64),
        is_output_kaia: true,
    }
}

fn metadata() -> TokenMetadata {
    TokenMetadata {
        name: "Foo".into(),
        symbol: "FOO".into(),
        description: "d".into(),
        image_url: "https://x/y.png".into(),
        website: None,
        twitter: Some("https://x.com/foo".into()),
        telegram: None,
    }
}

#[tokio::test]
async fn test_buy_returns_receipt_and_trade_event() {
    let conn = Arc::new(MockConnection::new().with_logs(vec![trade_log(TOKEN, true)]));
    let client = client_with(conn.clone(), UNUSED_API);

    let outcome = client.buy(&buy_params(kaia(1))).await.unwrap();

    assert!(outcome.receipt.success);
    assert_eq!(outcome.receipt.transaction_hash, TX_HASH);
    let event = outcome.event.expect("trade event");
    assert_eq!(event.token_address, TOKEN);
    assert!(event.is_buy);

    let sent = conn.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, FACTORY);
    assert_eq!(sent[0].value, kaia(1));
    let decoded = buyCall::abi_decode(&sent[0].data, true).unwrap();
    assert_eq!(decoded.tokenAddress, TOKEN);
    assert_eq!(decoded.minTokenAmount, U256::ZERO);
}

#[tokio::test]
async fn test_sell_encodes_all_arguments_without_value() {
    let conn = Arc::new(MockConnection::new().with_logs(vec![trade_log(TOKEN, false)]));
    let client = client_with(conn.clone(), UNUSED_API);

    let outcome = client.sell(&sell_params()).await.unwrap();
    assert!(!outcome.event.unwrap().is_buy);

    let sent = conn.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].value, U256::ZERO);
    let decoded = sellCall::abi_decode(&sent[0].data, true).unwrap();
    assert_eq!(decoded.tokenAddress, TOKEN);
    assert_eq!(decoded.amount, U256::from(500u64));
    assert_eq!(decoded.minBaseAmount, U256::from(7u64));
    assert!(decoded.isOutputKAIA);
}

#[tokio::test]
async fn test_wrong_chain_aborts_every_mutating_operation() {
    let conn = Arc::new(MockConnection::new().on_chain(1));
    let client = client_with(conn.clone(), UNUSED_API);

    let buy = client.buy(&buy_params(kaia(1))).await;
    assert!(matches!(
        buy,
        Err(ClientError::UnsupportedChain { expected: 8217, actual: 1 })
    ));
    let sell = client.sell(&sell_params()).await;
    assert!(matches!(sell, Err(ClientError::UnsupportedChain { .. })));
    let list = client.list(&metadata()).await;
    assert!(matches!(list, Err(ClientError::UnsupportedChain { .. })));

    assert!(conn.sent().is_empty());
    assert_eq!(conn.balance_reads(), 0);
}

#[tokio::test]
async fn test_zero_amount_is_rejected_before_submission() {
    let conn = Arc::new(MockConnection::new());
    let client = client_with(conn.clone(), UNUSED_API);

    let result = client.buy(&buy_params(U256::ZERO)).await;
    assert!(matches!(result, Err(ClientError::InvalidInput(_))));

    let mut zero_token = sell_params();
    zero_token.token_address = alloy::primitives::Address::ZERO;
    let result = client.sell(&zero_token).await;
    assert!(matches!(result, Err(ClientError::InvalidInput(_))));

    assert!(conn.sent().is_empty());
}

#[tokio::test]
async fn test_reverted_transaction_is_a_failure() {
    let conn = Arc::new(MockConnection::new().reverting());
    let client = client_with(conn.clone(), UNUSED_API);

    let result = client.buy(&buy_params(kaia(1))).await;
    assert!(matches!(result, Err(ClientError::Reverted(hash)) if hash == TX_HASH));
}

#[tokio::test]
async fn test_missing_event_is_not_an_error() {
    let other = address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");
    let conn = Arc::new(MockConnection::new().with_logs(vec![list_log(other, "Qm")]));
    let client = client_with(conn, UNUSED_API);

    let outcome = client.buy(&buy_params(kaia(1))).await.unwrap();
    assert!(outcome.receipt.success);
    assert!(outcome.event.is_none());
}

#[tokio::test]
async fn test_list_with_balance_one_below_fee_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let conn = Arc::new(MockConnection::new().with_balance(kaia(9)));
    let client = client_with(conn.clone(), &server.uri());

    let result = client.list(&metadata()).await;
    match result {
        Err(ClientError::InsufficientBalance { required, available }) => {
            assert_eq!(required, kaia(10));
            assert_eq!(available, kaia(9));
        }
        other => panic!("expected InsufficientBalance, got {:?}", other),
    }
    assert!(conn.sent().is_empty());
}

#[tokio::test]
async fn test_list_uploads_metadata_then_submits_with_fee() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token/metadata"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"hash": "QmFoo"})))
        .expect(1)
        .mount(&server)
        .await;

    let new_token = address!("cccccccccccccccccccccccccccccccccccccccc");
    let conn = Arc::new(
        MockConnection::new()
            .with_balance(kaia(10))
            .with_logs(vec![trade_log(new_token, true), list_log(new_token, "QmFoo")]),
    );
    let client = client_with(conn.clone(), &server.uri());

    let outcome = client.list(&metadata()).await.unwrap();
    assert_eq!(outcome.metadata_hash, "QmFoo");
    assert_eq!(outcome.event.unwrap().token_address, new_token);

    let sent = conn.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].value, kaia(10));
    let decoded = listCall::abi_decode(&sent[0].data, true).unwrap();
    assert_eq!(decoded.name, "Foo");
    assert_eq!(decoded.symbol, "FOO");
    assert_eq!(decoded.metadataHash, "QmFoo");
    assert_eq!(decoded.baseTokenAddress, KAIA_MAINNET.base_token_address);

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let inner: Value = serde_json::from_str(body["metadata"].as_str().unwrap()).unwrap();
    assert_eq!(inner["name"], "Foo");
    assert_eq!(inner["imageURL"], "https://x/y.png");
    assert_eq!(inner["twitter"], "https://x.com/foo");
    assert!(inner.get("website").is_none());
    assert_eq!(inner["creator"], SIGNER.to_string());
    assert!(inner["timestamp"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_list_aborts_when_metadata_endpoint_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token/metadata"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let conn = Arc::new(MockConnection::new());
    let client = client_with(conn.clone(), &server.uri());

    let result = client.list(&metadata()).await;
    assert!(matches!(result, Err(ClientError::RemoteEndpoint(_))));
    assert!(conn.sent().is_empty());
}

#[tokio::test]
async fn test_list_aborts_on_malformed_metadata_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token/metadata"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let conn = Arc::new(MockConnection::new());
    let client = client_with(conn.clone(), &server.uri());

    let result = client.list(&metadata()).await;
    assert!(matches!(result, Err(ClientError::RemoteEndpoint(_))));
    assert!(conn.sent().is_empty());
}

#[tokio::test]
async fn test_upload_image_returns_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(query_param("filename", "logo.png"))
        .and(header("content-type", "image/png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"url": "https://cdn.test/logo.png"})),
        )
        .mount(&server)
        .await;

    let client = client_with(Arc::new(MockConnection::new()), &server.uri());
    let url = client
        .upload_image(vec![0x89, 0x50, 0x4e, 0x47], "logo.png", "image/png")
        .await
        .unwrap();
    assert_eq!(url.as_deref(), Some("https://cdn.test/logo.png"));
}

#[tokio::test]
async fn test_upload_image_server_error_yields_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_with(Arc::new(MockConnection::new()), &server.uri());
    let url = client
        .upload_image(vec![1, 2, 3], "logo.png", "image/png")
        .await
        .unwrap();
    assert_eq!(url, None);
}

#[tokio::test]
async fn test_upload_image_empty_url_yields_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"url": ""})))
        .mount(&server)
        .await;

    let client = client_with(Arc::new(MockConnection::new()), &server.uri());
    let url = client
        .upload_image(vec![1, 2, 3], "logo.png", "image/png")
        .await
        .unwrap();
    assert_eq!(url, None);
}

#[tokio::test]
async fn test_upload_image_rejects_empty_content() {
    let client = client_with(Arc::new(MockConnection::new()), UNUSED_API);
    let result = client.upload_image(vec![], "logo.png", "image/png").await;
    assert!(matches!(result, Err(ClientError::InvalidInput(_))));
}

#[tokio::test]
async fn test_token_balance_reads_erc20() {
    let client = client_with(Arc::new(MockConnection::new()), UNUSED_API);
    let balance = client.token_balance(TOKEN, None).await.unwrap();
    assert_eq!(balance.owner, SIGNER);
    assert_eq!(balance.balance, U256::from(2_500_000u64));
    assert_eq!(balance.decimals, 6);
    assert_eq!(balance.symbol, "FOO");
}

#[tokio::test]
async fn test_native_balance_defaults_to_signer() {
    let conn = Arc::new(MockConnection::new().with_balance(kaia(3)));
    let client = client_with(conn.clone(), UNUSED_API);
    assert_eq!(client.native_balance(None).await.unwrap(), kaia(3));
    assert_eq!(conn.balance_reads.lock().unwrap()[0], SIGNER);
}

#[tokio::test]
async fn test_missing_factory_aborts_every_mutating_operation() {
    let conn = Arc::new(MockConnection::new());
    let client = client_without_factory(conn.clone(), UNUSED_API);

    let buy = client.buy(&buy_params(kaia(1))).await;
    assert!(matches!(buy, Err(ClientError::MissingFactory)));
    let sell = client.sell(&sell_params()).await;
    assert!(matches!(sell, Err(ClientError::MissingFactory)));
    let list = client.list(&metadata()).await;
    assert!(matches!(list, Err(ClientError::MissingFactory)));

    assert!(conn.sent().is_empty());
    assert_eq!(conn.balance_reads(), 0);
}

#[tokio::test]
async fn test_token_url_falls_back_to_explorer() {
    let client = client_without_factory(Arc::new(MockConnection::new()), UNUSED_API);
    assert_eq!(
        client.token_url(&TOKEN),
        format!("https://kaiascan.io/address/{}", TOKEN)
    );

    let client = client_with(Arc::new(MockConnection::new()), UNUSED_API);
    assert_eq!(client.token_url(&TOKEN), format!("{}/token/{}", WEB_URL, TOKEN));
}

#[tokio::test]
async fn test_trade_event_from_another_contract_is_ignored() {
    let mut forged = trade_log(TOKEN, true);
    forged.address = address!("dddddddddddddddddddddddddddddddddddddddd");
    let conn = Arc::new(MockConnection::new().with_logs(vec![forged]));
    let client = client_with(conn, UNUSED_API);

    let outcome = client.buy(&buy_params(kaia(1))).await.unwrap();
    assert!(outcome.receipt.success);
    assert!(outcome.event.is_none());
}
