use crate::domain::card::{CardId, CardOffer};
use crate::domain::category::CategoryId;
use crate::domain::order::{CategoryListing, LineItem, order_total};
use crate::domain::ranking::{self, RankedCard};
use crate::domain::transaction::{AnalysisToken, Transaction, new_receipt_id};
use crate::error::{CheckoutError, Result};
use rust_decimal::Decimal;
use tracing::info;

/// The screen a checkout session is currently on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Preview,
    Payment,
    Success,
}

/// Ticket for one outstanding reward-analysis request.
///
/// Minted by [`CheckoutSession::begin_payment`]; the caller runs the
/// analyzer call and hands the response back together with the token, which
/// lets the session reject responses for transactions it has since
/// abandoned.
#[derive(Debug, Clone)]
pub struct PendingAnalysis {
    pub token: AnalysisToken,
    pub transaction: Transaction,
}

/// One end-to-end checkout attempt, from category selection to success or
/// abandonment.
///
/// All mutation goes through the event methods below; each rejected event
/// returns a typed error and leaves the state untouched. Presentation reads
/// through the accessors only. Exactly one session is live per user
/// interaction, so no locking is needed.
pub struct CheckoutSession {
    screen: Screen,
    category: Option<CategoryId>,
    merchant: Option<String>,
    line_items: Vec<LineItem>,
    transaction: Option<Transaction>,
    ranked_cards: Option<Vec<RankedCard>>,
    selected_card: Option<CardId>,
    /// Whether the current selection came from an explicit `select_card`.
    user_selected: bool,
    receipt_id: Option<String>,
    awaiting_rewards: bool,
    next_token: u64,
}

impl CheckoutSession {
    pub fn new() -> Self {
        Self {
            screen: Screen::Home,
            category: None,
            merchant: None,
            line_items: Vec::new(),
            transaction: None,
            ranked_cards: None,
            selected_card: None,
            user_selected: false,
            receipt_id: None,
            awaiting_rewards: false,
            next_token: 0,
        }
    }

    // Events

    /// Home -> Preview: the shopper picked a category and its listing was
    /// loaded from the catalog.
    pub fn enter_preview(&mut self, category: CategoryId, listing: CategoryListing) -> Result<()> {
        if self.screen != Screen::Home {
            return Err(self.rejected("select_category"));
        }
        self.category = Some(category);
        self.merchant = Some(listing.merchant);
        self.line_items = listing.items;
        self.screen = Screen::Preview;
        Ok(())
    }

    /// One level up: Preview -> Home or Payment -> Preview.
    ///
    /// Accepted immediately even while an analyzer request is outstanding;
    /// the late response will no longer match and gets discarded.
    pub fn back(&mut self) -> Result<()> {
        match self.screen {
            Screen::Preview => {
                self.category = None;
                self.merchant = None;
                self.line_items.clear();
                self.screen = Screen::Home;
                Ok(())
            }
            Screen::Payment => {
                self.clear_payment_state();
                self.screen = Screen::Preview;
                Ok(())
            }
            _ => Err(self.rejected("back")),
        }
    }

    /// Preview -> Payment: totals the order, freezes it into a
    /// [`Transaction`] and marks the session as awaiting rewards.
    ///
    /// The returned ticket is the caller's handle for running the analyzer
    /// request and delivering its response via [`Self::apply_analysis`].
    pub fn begin_payment(&mut self) -> Result<PendingAnalysis> {
        if self.screen != Screen::Preview {
            return Err(self.rejected("proceed_to_payment"));
        }
        if self.line_items.is_empty() {
            return Err(CheckoutError::EmptyOrder);
        }
        let (category, merchant) = match (self.category, self.merchant.as_ref()) {
            (Some(category), Some(merchant)) => (category, merchant.clone()),
            _ => return Err(self.rejected("proceed_to_payment")),
        };

        let amount = order_total(&self.line_items);
        let token = self.mint_token();
        let transaction = Transaction::new(token, amount, merchant, category);
        info!(
            amount = %amount,
            merchant = transaction.merchant(),
            category = %category,
            "proceeding to payment"
        );

        self.transaction = Some(transaction.clone());
        self.awaiting_rewards = true;
        self.screen = Screen::Payment;
        Ok(PendingAnalysis { token, transaction })
    }

    /// Re-arms the pending request for the current transaction, the Payment
    /// screen's retry action after a failed analyzer call.
    pub fn retry_analysis(&mut self) -> Result<PendingAnalysis> {
        if self.screen != Screen::Payment {
            return Err(self.rejected("retry_analysis"));
        }
        let transaction = match &self.transaction {
            Some(transaction) => transaction.clone(),
            None => return Err(self.rejected("retry_analysis")),
        };
        self.awaiting_rewards = true;
        Ok(PendingAnalysis {
            token: transaction.token(),
            transaction,
        })
    }

    /// Delivers an analyzer response for the transaction identified by
    /// `token`.
    ///
    /// A token that no longer matches the live transaction fails with
    /// [`CheckoutError::StaleTransaction`]; callers discard that silently.
    /// A matching response is ranked and auto-selects the rank-1 card unless
    /// the shopper already chose one explicitly - an explicit choice is only
    /// abandoned if its card vanished from the new set.
    pub fn apply_analysis(&mut self, token: AnalysisToken, offers: Vec<CardOffer>) -> Result<()> {
        let live = self.transaction.as_ref().map(Transaction::token);
        if self.screen != Screen::Payment || live != Some(token) {
            return Err(CheckoutError::StaleTransaction);
        }

        // A response for the live transaction arrived; even if ranking fails
        // below the request is no longer outstanding.
        self.awaiting_rewards = false;

        let ranked = ranking::rank(offers)?;
        let keep_user_choice = self.user_selected
            && self
                .selected_card
                .as_ref()
                .is_some_and(|id| ranked.iter().any(|card| &card.card.id == id));
        if !keep_user_choice {
            self.selected_card = ranked.first().map(|card| card.card.id.clone());
            self.user_selected = false;
        }
        info!(cards = ranked.len(), "reward analysis applied");
        self.ranked_cards = Some(ranked);
        Ok(())
    }

    /// Explicit card choice; overrides and outlives any auto-selection.
    pub fn select_card(&mut self, id: CardId) -> Result<()> {
        if self.screen != Screen::Payment {
            return Err(self.rejected("select_card"));
        }
        let ranked = self
            .ranked_cards
            .as_ref()
            .ok_or(CheckoutError::RewardsPending)?;
        if !ranked.iter().any(|card| card.card.id == id) {
            return Err(CheckoutError::UnknownCard(id));
        }
        self.selected_card = Some(id);
        self.user_selected = true;
        Ok(())
    }

    /// Payment -> Success. Refused until a reward analysis has been received
    /// and a card is selected; paying against an empty reward set is
    /// meaningless.
    pub fn confirm_pay(&mut self) -> Result<()> {
        if self.screen != Screen::Payment {
            return Err(self.rejected("confirm_pay"));
        }
        if self.ranked_cards.is_none() {
            return Err(CheckoutError::RewardsPending);
        }
        let card = self
            .selected_card
            .as_ref()
            .ok_or(CheckoutError::NoCardSelected)?;

        let receipt = new_receipt_id();
        info!(card = %card, receipt = %receipt, "payment confirmed");
        self.receipt_id = Some(receipt);
        self.screen = Screen::Success;
        Ok(())
    }

    /// Success -> Home, discarding the completed session.
    pub fn done(&mut self) -> Result<()> {
        if self.screen != Screen::Success {
            return Err(self.rejected("done"));
        }
        self.reset();
        Ok(())
    }

    // Read-only view consumed by the presentation layer.

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn category(&self) -> Option<CategoryId> {
        self.category
    }

    pub fn merchant(&self) -> Option<&str> {
        self.merchant.as_deref()
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn order_total(&self) -> Decimal {
        order_total(&self.line_items)
    }

    pub fn transaction(&self) -> Option<&Transaction> {
        self.transaction.as_ref()
    }

    pub fn ranked_cards(&self) -> Option<&[RankedCard]> {
        self.ranked_cards.as_deref()
    }

    pub fn selected_card(&self) -> Option<&CardId> {
        self.selected_card.as_ref()
    }

    pub fn receipt_id(&self) -> Option<&str> {
        self.receipt_id.as_deref()
    }

    /// True while an analyzer request is outstanding; the Payment screen
    /// shows a waiting indicator and keeps the pay action disabled.
    pub fn awaiting_rewards(&self) -> bool {
        self.awaiting_rewards
    }

    // Internals

    fn mint_token(&mut self) -> AnalysisToken {
        let token = AnalysisToken::new(self.next_token);
        self.next_token += 1;
        token
    }

    fn clear_payment_state(&mut self) {
        self.transaction = None;
        self.ranked_cards = None;
        self.selected_card = None;
        self.user_selected = false;
        self.awaiting_rewards = false;
    }

    /// Full reset; the token counter survives so responses from a previous
    /// session life can never match a new transaction.
    fn reset(&mut self) {
        let next_token = self.next_token;
        *self = Self::new();
        self.next_token = next_token;
    }

    fn rejected(&self, event: &'static str) -> CheckoutError {
        CheckoutError::InvalidEvent {
            event,
            screen: self.screen,
        }
    }
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::new()
    }
}
