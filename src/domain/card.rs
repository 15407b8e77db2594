use crate::error::CheckoutError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a payment card within one analyzer response.
///
/// Ordering is lexicographic; the ranking engine uses it to break ties so
/// that rank 1 is reproducible across identical responses.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A payment instrument offered for the current transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub display_name: String,
    pub network: String,
    pub last4: String,
}

impl Card {
    /// Builds a card, rejecting a `last4` that is not exactly four digits.
    pub fn new(
        id: CardId,
        display_name: impl Into<String>,
        network: impl Into<String>,
        last4: impl Into<String>,
    ) -> Result<Self, CheckoutError> {
        let last4 = last4.into();
        if last4.len() != 4 || !last4.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CheckoutError::MalformedResponse(format!(
                "card {id}: last4 must be four digits, got {last4:?}"
            )));
        }
        Ok(Self {
            id,
            display_name: display_name.into(),
            network: network.into(),
            last4,
        })
    }
}

/// One component of a card's value for a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardComponent {
    pub value: Decimal,
    pub description: String,
}

/// The decomposition of a card's value for one transaction into base rewards
/// and a special offer, as computed by the reward analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardBreakdown {
    pub base_rewards: RewardComponent,
    pub special_offer: RewardComponent,
    pub total_value: Decimal,
    /// `total_value / transaction amount x 100`, as reported upstream.
    pub effective_rate: Decimal,
}

impl RewardBreakdown {
    /// Rounding slack allowed on the component-sum invariant.
    pub const TOLERANCE: Decimal = dec!(0.01);

    /// Verifies `total_value == base + special` within [`Self::TOLERANCE`]
    /// and that the total is not negative. Anomalies are reported, never
    /// repaired.
    pub fn check(&self) -> Result<(), String> {
        if self.total_value < Decimal::ZERO {
            return Err(format!("negative total value {}", self.total_value));
        }
        let sum = self.base_rewards.value + self.special_offer.value;
        if (self.total_value - sum).abs() > Self::TOLERANCE {
            return Err(format!(
                "total value {} does not match base {} + offer {}",
                self.total_value, self.base_rewards.value, self.special_offer.value
            ));
        }
        Ok(())
    }
}

/// A card paired with its reward breakdown, the analyzer's per-card answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardOffer {
    pub card: Card,
    pub rewards: RewardBreakdown,
}
