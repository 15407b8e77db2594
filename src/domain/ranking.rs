use crate::domain::card::{Card, CardOffer, RewardBreakdown};
use crate::error::{CheckoutError, Result};

/// A card annotated with its position in the reward comparison, 1 being best.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCard {
    pub rank: u32,
    pub card: Card,
    pub rewards: RewardBreakdown,
}

/// Ranks the analyzer's card offers for one transaction.
///
/// Output is sorted by descending `total_value` with ties broken by
/// ascending card id, so rank 1 is deterministic across repeated calls on
/// identical input. Pure: safe to re-run whenever a new response arrives.
///
/// Fails with [`CheckoutError::EmptyCardSet`] on empty input and with
/// [`CheckoutError::InvalidBreakdown`] when upstream data violates the
/// component-sum invariant; bad data is surfaced, never patched up here.
pub fn rank(offers: Vec<CardOffer>) -> Result<Vec<RankedCard>> {
    if offers.is_empty() {
        return Err(CheckoutError::EmptyCardSet);
    }
    for offer in &offers {
        offer
            .rewards
            .check()
            .map_err(|detail| CheckoutError::InvalidBreakdown {
                card: offer.card.id.clone(),
                detail,
            })?;
    }

    let mut offers = offers;
    offers.sort_by(|a, b| {
        b.rewards
            .total_value
            .cmp(&a.rewards.total_value)
            .then_with(|| a.card.id.cmp(&b.card.id))
    });

    Ok(offers
        .into_iter()
        .enumerate()
        .map(|(index, offer)| RankedCard {
            rank: index as u32 + 1,
            card: offer.card,
            rewards: offer.rewards,
        })
        .collect())
}
