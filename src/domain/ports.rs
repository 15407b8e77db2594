use super::card::CardOffer;
use super::category::CategoryId;
use super::order::CategoryListing;
use super::transaction::Transaction;
use crate::error::Result;
use async_trait::async_trait;

/// Supplies the static listing for a merchant category.
///
/// Implementations must return a non-empty, order-preserving item sequence
/// for every defined [`CategoryId`].
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn listing(&self, category: CategoryId) -> Result<CategoryListing>;
}

/// The reward-analysis backend boundary.
///
/// Given a frozen transaction, returns the candidate cards annotated with
/// their reward breakdowns. Implementations map transport failures into the
/// crate error taxonomy and perform no reward arithmetic beyond what the
/// backend reports.
#[async_trait]
pub trait RewardAnalyzer: Send + Sync {
    async fn analyze(&self, transaction: &Transaction) -> Result<Vec<CardOffer>>;
}

pub type CatalogProviderBox = Box<dyn CatalogProvider>;
pub type RewardAnalyzerBox = Box<dyn RewardAnalyzer>;
