use crate::application::session::Screen;
use crate::domain::card::CardId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Everything that can go wrong during a checkout session.
///
/// Transport and validation failures are converted into this taxonomy at the
/// adapter boundary; the state machine never sees a raw network error. No
/// variant is fatal: every error leaves the session on a well-defined screen.
#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("reward analysis request failed: {0}")]
    NetworkFailure(String),
    #[error("reward analysis response malformed: {0}")]
    MalformedResponse(String),
    #[error("no eligible payment cards")]
    EmptyCardSet,
    #[error("invalid reward breakdown for card {card}: {detail}")]
    InvalidBreakdown { card: CardId, detail: String },
    #[error("analysis response for a superseded transaction")]
    StaleTransaction,
    #[error("{event} is not available on the {screen:?} screen")]
    InvalidEvent { event: &'static str, screen: Screen },
    #[error("order has no line items")]
    EmptyOrder,
    #[error("reward analysis still pending")]
    RewardsPending,
    #[error("no payment card selected")]
    NoCardSelected,
    #[error("card {0} is not among the ranked cards")]
    UnknownCard(CardId),
}
