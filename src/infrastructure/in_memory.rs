use crate::domain::card::{Card, CardId, CardOffer, RewardBreakdown, RewardComponent};
use crate::domain::category::CategoryId;
use crate::domain::order::{CategoryListing, LineItem};
use crate::domain::ports::{CatalogProvider, RewardAnalyzer};
use crate::domain::transaction::Transaction;
use crate::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Built-in catalog covering every defined category.
///
/// Listings are fixed demo data; a production deployment would swap in a
/// client for the real catalog service behind the same port.
#[derive(Default, Clone)]
pub struct InMemoryCatalog;

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self
    }
}

fn item(id: u32, name: &str, unit_price: Decimal, description: &str) -> LineItem {
    LineItem {
        id,
        name: name.to_string(),
        unit_price,
        description: description.to_string(),
        quantity: 1,
    }
}

#[async_trait]
impl CatalogProvider for InMemoryCatalog {
    async fn listing(&self, category: CategoryId) -> Result<CategoryListing> {
        let listing = match category {
            CategoryId::Airlines => CategoryListing {
                merchant: "Emirates Airlines".to_string(),
                items: vec![
                    item(1, "NYC -> LDN", dec!(2499.99), "Business Class, Emirates"),
                    item(2, "LAX -> TYO", dec!(3299.99), "First Class, ANA"),
                ],
            },
            CategoryId::Grocery => CategoryListing {
                merchant: "Whole Foods".to_string(),
                items: vec![
                    item(1, "Fresh Produce Bundle", dec!(89.99), "Organic Selection"),
                    item(2, "Premium Dairy", dec!(45.50), "Farm Fresh"),
                ],
            },
            CategoryId::Bigticket => CategoryListing {
                merchant: "Apple Store".to_string(),
                items: vec![
                    item(1, "iPhone 15 Pro Max", dec!(1299.99), "256GB Titanium"),
                    item(2, "MacBook Pro", dec!(2499.99), "14-inch M3 Pro"),
                ],
            },
            CategoryId::Dining => CategoryListing {
                merchant: "Fine Dining".to_string(),
                items: vec![
                    item(
                        1,
                        "Gourmet Dinner",
                        dec!(199.99),
                        "5-course meal at a Michelin-star restaurant",
                    ),
                    item(2, "Wine Tasting", dec!(89.99), "Selection of premium wines"),
                ],
            },
        };
        Ok(listing)
    }
}

/// Per-card rate table for the offline analyzer.
struct RateCard {
    id: &'static str,
    display_name: &'static str,
    network: &'static str,
    last4: &'static str,
    /// Category-specific base cashback percentages.
    category_rates: &'static [(CategoryId, Decimal)],
    default_rate: Decimal,
    offer_rate: Decimal,
    offer_description: &'static str,
}

impl RateCard {
    fn base_rate(&self, category: CategoryId) -> Decimal {
        self.category_rates
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, rate)| *rate)
            .unwrap_or(self.default_rate)
    }
}

/// Offline reward analyzer with the reference card set.
///
/// Applies the same arithmetic the live backend is specified to perform:
/// category-specific or default base rate, flat special-offer rate, total
/// and effective rate derived from the transaction amount. Useful for demo
/// runs and tests with no network.
pub struct StaticRewardAnalyzer {
    cards: Vec<RateCard>,
}

impl StaticRewardAnalyzer {
    pub fn new() -> Self {
        const CARD_1_RATES: &[(CategoryId, Decimal)] = &[(CategoryId::Bigticket, dec!(2))];
        const CARD_2_RATES: &[(CategoryId, Decimal)] = &[(CategoryId::Bigticket, dec!(1.5))];
        Self {
            cards: vec![
                RateCard {
                    id: "card_1",
                    display_name: "Rewards Plus",
                    network: "Visa",
                    last4: "4567",
                    category_rates: CARD_1_RATES,
                    default_rate: dec!(1),
                    offer_rate: dec!(5),
                    offer_description: "5% extra cashback on this purchase",
                },
                RateCard {
                    id: "card_2",
                    display_name: "Travel Elite",
                    network: "Visa",
                    last4: "4589",
                    category_rates: CARD_2_RATES,
                    default_rate: dec!(1),
                    offer_rate: dec!(2),
                    offer_description: "Double points on this purchase",
                },
            ],
        }
    }

    fn offer_for(&self, rate_card: &RateCard, transaction: &Transaction) -> Result<CardOffer> {
        let amount = transaction.amount();
        let base_rate = rate_card.base_rate(transaction.category());
        let base = (amount * base_rate / dec!(100)).round_dp(2);
        let special = (amount * rate_card.offer_rate / dec!(100)).round_dp(2);
        let total = base + special;
        let effective_rate = if amount > Decimal::ZERO {
            (total / amount * dec!(100)).round_dp(2)
        } else {
            Decimal::ZERO
        };

        let card = Card::new(
            CardId::new(rate_card.id),
            rate_card.display_name,
            rate_card.network,
            rate_card.last4,
        )?;
        Ok(CardOffer {
            card,
            rewards: RewardBreakdown {
                base_rewards: RewardComponent {
                    value: base,
                    description: format!(
                        "{base_rate}% base cashback on {}",
                        transaction.category()
                    ),
                },
                special_offer: RewardComponent {
                    value: special,
                    description: rate_card.offer_description.to_string(),
                },
                total_value: total,
                effective_rate,
            },
        })
    }
}

impl Default for StaticRewardAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RewardAnalyzer for StaticRewardAnalyzer {
    async fn analyze(&self, transaction: &Transaction) -> Result<Vec<CardOffer>> {
        self.cards
            .iter()
            .map(|card| self.offer_for(card, transaction))
            .collect()
    }
}
