use async_trait::async_trait;
use payflow::application::checkout::CheckoutFlow;
use payflow::application::session::Screen;
use payflow::domain::card::{Card, CardId, CardOffer, RewardBreakdown, RewardComponent};
use payflow::domain::category::CategoryId;
use payflow::domain::order::{CategoryListing, LineItem};
use payflow::domain::ports::{CatalogProvider, RewardAnalyzer};
use payflow::domain::transaction::Transaction;
use payflow::error::{CheckoutError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::VecDeque;
use std::sync::Mutex;

struct FakeCatalog;

#[async_trait]
impl CatalogProvider for FakeCatalog {
    async fn listing(&self, _category: CategoryId) -> Result<CategoryListing> {
        Ok(CategoryListing {
            merchant: "Whole Foods".to_string(),
            items: vec![LineItem {
                id: 1,
                name: "Organic Groceries".to_string(),
                unit_price: dec!(299.99),
                description: "Weekly grocery delivery".to_string(),
                quantity: 1,
            }],
        })
    }
}

struct FailingCatalog;

#[async_trait]
impl CatalogProvider for FailingCatalog {
    async fn listing(&self, category: CategoryId) -> Result<CategoryListing> {
        Err(CheckoutError::UnknownCategory(category.to_string()))
    }
}

enum AnalyzerReply {
    Offers(Vec<CardOffer>),
    NetworkFailure,
}

/// Scripted analyzer: pops one reply per call.
struct FakeAnalyzer {
    replies: Mutex<VecDeque<AnalyzerReply>>,
}

impl FakeAnalyzer {
    fn new(replies: Vec<AnalyzerReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
        }
    }
}

#[async_trait]
impl RewardAnalyzer for FakeAnalyzer {
    async fn analyze(&self, _transaction: &Transaction) -> Result<Vec<CardOffer>> {
        let reply = self
            .replies
            .lock()
            .expect("reply queue poisoned")
            .pop_front()
            .expect("no scripted analyzer reply left");
        match reply {
            AnalyzerReply::Offers(offers) => Ok(offers),
            AnalyzerReply::NetworkFailure => Err(CheckoutError::NetworkFailure(
                "connection refused".to_string(),
            )),
        }
    }
}

fn offer(id: &str, base: Decimal, special: Decimal) -> CardOffer {
    CardOffer {
        card: Card::new(CardId::new(id), format!("Card {id}"), "Visa", "4567").unwrap(),
        rewards: RewardBreakdown {
            base_rewards: RewardComponent {
                value: base,
                description: "base cashback".to_string(),
            },
            special_offer: RewardComponent {
                value: special,
                description: "extra cashback".to_string(),
            },
            total_value: base + special,
            effective_rate: Decimal::ZERO,
        },
    }
}

fn offers() -> Vec<CardOffer> {
    vec![
        offer("card_1", dec!(26.00), dec!(38.99)),
        offer("card_2", dec!(26.00), dec!(12.99)),
    ]
}

#[tokio::test]
async fn test_happy_path_reaches_success() {
    let mut flow = CheckoutFlow::new(
        Box::new(FakeCatalog),
        Box::new(FakeAnalyzer::new(vec![AnalyzerReply::Offers(offers())])),
    );

    flow.select_category(CategoryId::Grocery).await.unwrap();
    assert_eq!(flow.session().screen(), Screen::Preview);

    flow.proceed_to_payment().await.unwrap();
    assert_eq!(flow.session().screen(), Screen::Payment);
    assert_eq!(
        flow.session().selected_card(),
        Some(&CardId::new("card_1"))
    );

    flow.confirm_pay().unwrap();
    assert_eq!(flow.session().screen(), Screen::Success);
    assert!(flow.session().receipt_id().unwrap().starts_with("TXN"));

    flow.done().unwrap();
    assert_eq!(flow.session().screen(), Screen::Home);
}

#[tokio::test]
async fn test_unknown_category_keeps_session_home() {
    let mut flow = CheckoutFlow::new(
        Box::new(FailingCatalog),
        Box::new(FakeAnalyzer::new(vec![])),
    );

    let result = flow.select_category(CategoryId::Dining).await;
    assert!(matches!(result, Err(CheckoutError::UnknownCategory(_))));
    assert_eq!(flow.session().screen(), Screen::Home);
}

#[tokio::test]
async fn test_network_failure_surfaces_and_retry_recovers() {
    let mut flow = CheckoutFlow::new(
        Box::new(FakeCatalog),
        Box::new(FakeAnalyzer::new(vec![
            AnalyzerReply::NetworkFailure,
            AnalyzerReply::Offers(offers()),
        ])),
    );

    flow.select_category(CategoryId::Grocery).await.unwrap();
    let result = flow.proceed_to_payment().await;
    assert!(matches!(result, Err(CheckoutError::NetworkFailure(_))));

    // Session stays on Payment, still awaiting; paying is impossible.
    assert_eq!(flow.session().screen(), Screen::Payment);
    assert!(flow.session().awaiting_rewards());
    assert!(matches!(
        flow.confirm_pay(),
        Err(CheckoutError::RewardsPending)
    ));

    flow.retry_rewards().await.unwrap();
    assert!(!flow.session().awaiting_rewards());
    flow.confirm_pay().unwrap();
    assert_eq!(flow.session().screen(), Screen::Success);
}

#[tokio::test]
async fn test_late_response_after_back_is_swallowed() {
    let mut flow = CheckoutFlow::new(
        Box::new(FakeCatalog),
        Box::new(FakeAnalyzer::new(vec![AnalyzerReply::Offers(offers())])),
    );

    flow.select_category(CategoryId::Grocery).await.unwrap();
    let pending = flow.request_rewards().unwrap();
    flow.back().unwrap();

    // The late delivery is a no-op, not an error the caller must handle.
    flow.deliver_rewards(pending).await.unwrap();
    assert_eq!(flow.session().screen(), Screen::Preview);
    assert!(flow.session().ranked_cards().is_none());
}

#[tokio::test]
async fn test_explicit_selection_is_used_for_payment() {
    let mut flow = CheckoutFlow::new(
        Box::new(FakeCatalog),
        Box::new(FakeAnalyzer::new(vec![AnalyzerReply::Offers(offers())])),
    );

    flow.select_category(CategoryId::Grocery).await.unwrap();
    flow.proceed_to_payment().await.unwrap();
    flow.select_card(CardId::new("card_2")).unwrap();
    flow.confirm_pay().unwrap();

    assert_eq!(
        flow.session().selected_card(),
        Some(&CardId::new("card_2"))
    );
    assert_eq!(flow.session().screen(), Screen::Success);
}
