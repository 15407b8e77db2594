use crate::application::session::{CheckoutSession, PendingAnalysis};
use crate::domain::card::CardId;
use crate::domain::category::CategoryId;
use crate::domain::ports::{CatalogProviderBox, RewardAnalyzerBox};
use crate::error::{CheckoutError, Result};
use tracing::{debug, warn};

/// Drives one checkout session against injected collaborators.
///
/// The catalog and reward analyzer are constructor arguments, never ambient
/// globals, so the flow is testable with fakes. All mutation still goes
/// through the session's own transition methods.
pub struct CheckoutFlow {
    session: CheckoutSession,
    catalog: CatalogProviderBox,
    analyzer: RewardAnalyzerBox,
}

impl CheckoutFlow {
    pub fn new(catalog: CatalogProviderBox, analyzer: RewardAnalyzerBox) -> Self {
        Self {
            session: CheckoutSession::new(),
            catalog,
            analyzer,
        }
    }

    /// Read-only session snapshot for the presentation layer.
    pub fn session(&self) -> &CheckoutSession {
        &self.session
    }

    /// Loads the category's listing and moves Home -> Preview.
    pub async fn select_category(&mut self, category: CategoryId) -> Result<()> {
        let listing = self.catalog.listing(category).await?;
        self.session.enter_preview(category, listing)
    }

    /// First half of `proceed_to_payment`: freeze the order and mint the
    /// analysis ticket. Split from [`Self::deliver_rewards`] so a driver can
    /// interleave `back()` with an outstanding request.
    pub fn request_rewards(&mut self) -> Result<PendingAnalysis> {
        self.session.begin_payment()
    }

    /// Second half: run the analyzer call for `pending` and deliver its
    /// response. A response for a transaction the shopper has since
    /// abandoned is discarded with a debug log, not an error.
    pub async fn deliver_rewards(&mut self, pending: PendingAnalysis) -> Result<()> {
        let offers = match self.analyzer.analyze(&pending.transaction).await {
            Ok(offers) => offers,
            Err(err) => {
                warn!(error = %err, "reward analysis failed");
                return Err(err);
            }
        };
        match self.session.apply_analysis(pending.token, offers) {
            Err(CheckoutError::StaleTransaction) => {
                debug!("discarding analysis response for a superseded transaction");
                Ok(())
            }
            other => other,
        }
    }

    /// Preview -> Payment with the analyzer request run to completion.
    pub async fn proceed_to_payment(&mut self) -> Result<()> {
        let pending = self.request_rewards()?;
        self.deliver_rewards(pending).await
    }

    /// Retry the analyzer request for the current transaction after a
    /// failure; the session stays on Payment throughout.
    pub async fn retry_rewards(&mut self) -> Result<()> {
        let pending = self.session.retry_analysis()?;
        self.deliver_rewards(pending).await
    }

    pub fn back(&mut self) -> Result<()> {
        self.session.back()
    }

    pub fn select_card(&mut self, card: CardId) -> Result<()> {
        self.session.select_card(card)
    }

    pub fn confirm_pay(&mut self) -> Result<()> {
        self.session.confirm_pay()
    }

    pub fn done(&mut self) -> Result<()> {
        self.session.done()
    }
}
