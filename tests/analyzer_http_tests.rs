use payflow::application::session::CheckoutSession;
use payflow::domain::card::CardId;
use payflow::domain::category::CategoryId;
use payflow::domain::order::{CategoryListing, LineItem};
use payflow::domain::ports::RewardAnalyzer;
use payflow::domain::transaction::Transaction;
use payflow::error::CheckoutError;
use payflow::infrastructure::http::HttpRewardAnalyzer;
use rust_decimal_macros::dec;
use std::time::Duration;

/// Freezes a 1299.99 big-ticket transaction through the public session API.
fn transaction() -> Transaction {
    let mut session = CheckoutSession::new();
    session
        .enter_preview(
            CategoryId::Bigticket,
            CategoryListing {
                merchant: "Apple Store".to_string(),
                items: vec![LineItem {
                    id: 1,
                    name: "iPhone 15 Pro Max".to_string(),
                    unit_price: dec!(1299.99),
                    description: "256GB Titanium".to_string(),
                    quantity: 1,
                }],
            },
        )
        .unwrap();
    session.begin_payment().unwrap().transaction
}

const SUCCESS_BODY: &str = r#"{
    "cards": [
        {
            "id": 2,
            "name": "Travel Elite",
            "network": "Visa",
            "last4": "4589",
            "rewards": {
                "baseRewards": {"value": 19.50, "description": "1.5% base cashback on bigticket"},
                "specialOffer": {"value": 26.00, "description": "Double points"},
                "totalValue": 45.50,
                "effectiveRate": 3.5
            }
        },
        {
            "id": 1,
            "name": "Rewards Plus",
            "network": "Visa",
            "last4": "4567",
            "rewards": {
                "baseRewards": {"value": 26.00, "description": "2% base cashback on bigticket"},
                "specialOffer": {"value": 65.00, "description": "5% extra cashback"},
                "totalValue": 91.00,
                "effectiveRate": 7.0
            }
        }
    ],
    "transaction": {"amount": 1299.99, "merchant": "Apple Store", "category": "bigticket"},
    "status": "success"
}"#;

#[tokio::test]
async fn test_analyze_parses_cards_from_reference_payload() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/analyze-purchase")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SUCCESS_BODY)
        .create_async()
        .await;

    let analyzer = HttpRewardAnalyzer::new(server.url(), "user123").unwrap();
    let offers = analyzer.analyze(&transaction()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(offers.len(), 2);
    let rewards_plus = offers
        .iter()
        .find(|o| o.card.id == CardId::new("1"))
        .unwrap();
    assert_eq!(rewards_plus.card.display_name, "Rewards Plus");
    assert_eq!(rewards_plus.card.last4, "4567");
    assert_eq!(rewards_plus.rewards.total_value, dec!(91.00));
    assert_eq!(rewards_plus.rewards.effective_rate, dec!(7.00));
    assert!(rewards_plus.rewards.check().is_ok());
}

#[tokio::test]
async fn test_analyze_maps_server_error_to_network_failure() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/analyze-purchase")
        .with_status(500)
        .create_async()
        .await;

    let analyzer = HttpRewardAnalyzer::new(server.url(), "user123").unwrap();
    let result = analyzer.analyze(&transaction()).await;
    assert!(matches!(result, Err(CheckoutError::NetworkFailure(_))));
}

#[tokio::test]
async fn test_analyze_maps_unreachable_host_to_network_failure() {
    // Nothing listens here; connection is refused immediately.
    let analyzer = HttpRewardAnalyzer::with_timeout(
        "http://127.0.0.1:1",
        "user123",
        Duration::from_secs(1),
    )
    .unwrap();
    let result = analyzer.analyze(&transaction()).await;
    assert!(matches!(result, Err(CheckoutError::NetworkFailure(_))));
}

#[tokio::test]
async fn test_analyze_maps_invalid_json_to_malformed_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/analyze-purchase")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{\"cards\": \"nope\"}")
        .create_async()
        .await;

    let analyzer = HttpRewardAnalyzer::new(server.url(), "user123").unwrap();
    let result = analyzer.analyze(&transaction()).await;
    assert!(matches!(result, Err(CheckoutError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_analyze_rejects_non_success_status_field() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/analyze-purchase")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"cards": [], "status": "error"}"#)
        .create_async()
        .await;

    let analyzer = HttpRewardAnalyzer::new(server.url(), "user123").unwrap();
    let result = analyzer.analyze(&transaction()).await;
    assert!(matches!(result, Err(CheckoutError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_analyze_rejects_bad_last4() {
    let body = SUCCESS_BODY.replace("\"4589\"", "\"458x\"");
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/analyze-purchase")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;

    let analyzer = HttpRewardAnalyzer::new(server.url(), "user123").unwrap();
    let result = analyzer.analyze(&transaction()).await;
    assert!(matches!(result, Err(CheckoutError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_request_carries_transaction_fields() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/analyze-purchase")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "amount": 1299.99,
            "user_id": "user123",
            "merchant": "Apple Store",
            "category": "bigticket"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SUCCESS_BODY)
        .create_async()
        .await;

    let analyzer = HttpRewardAnalyzer::new(server.url(), "user123").unwrap();
    analyzer.analyze(&transaction()).await.unwrap();
    mock.assert_async().await;
}
