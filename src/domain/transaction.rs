use crate::domain::category::CategoryId;
use rand::Rng;
use rust_decimal::Decimal;

/// Identity of one reward-analysis request.
///
/// Tokens are minted by the session and increase monotonically, so a
/// response that arrives after the shopper navigated away can never match a
/// newer transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnalysisToken(u64);

impl AnalysisToken {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }
}

/// A raw purchase, frozen when the shopper proceeds from the order preview.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    token: AnalysisToken,
    amount: Decimal,
    merchant: String,
    category: CategoryId,
}

impl Transaction {
    pub(crate) fn new(
        token: AnalysisToken,
        amount: Decimal,
        merchant: String,
        category: CategoryId,
    ) -> Self {
        Self {
            token,
            amount,
            merchant,
            category,
        }
    }

    pub fn token(&self) -> AnalysisToken {
        self.token
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn merchant(&self) -> &str {
        &self.merchant
    }

    pub fn category(&self) -> CategoryId {
        self.category
    }
}

const RECEIPT_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const RECEIPT_SUFFIX_LEN: usize = 9;

/// Receipt id for a confirmed payment, e.g. `TXN4G7K1ZQ2P`.
pub fn new_receipt_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..RECEIPT_SUFFIX_LEN)
        .map(|_| RECEIPT_ALPHABET[rng.gen_range(0..RECEIPT_ALPHABET.len())] as char)
        .collect();
    format!("TXN{suffix}")
}
