use crate::domain::card::{Card, CardId, CardOffer, RewardBreakdown, RewardComponent};
use crate::domain::ports::RewardAnalyzer;
use crate::domain::transaction::Transaction;
use crate::error::{CheckoutError, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const ANALYZE_PATH: &str = "/api/analyze-purchase";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the reward-analysis backend.
///
/// Serializes the transaction, deserializes the per-card breakdowns and maps
/// every transport or schema failure into the crate error taxonomy. No
/// reward arithmetic happens here.
pub struct HttpRewardAnalyzer {
    client: reqwest::Client,
    base_url: String,
    user_id: String,
}

impl HttpRewardAnalyzer {
    pub fn new(base_url: impl Into<String>, user_id: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, user_id, DEFAULT_TIMEOUT)
    }

    /// The core mandates no timeout value; callers impose their own here and
    /// expiry surfaces as [`CheckoutError::NetworkFailure`].
    pub fn with_timeout(
        base_url: impl Into<String>,
        user_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CheckoutError::NetworkFailure(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_id: user_id.into(),
        })
    }
}

#[async_trait]
impl RewardAnalyzer for HttpRewardAnalyzer {
    async fn analyze(&self, transaction: &Transaction) -> Result<Vec<CardOffer>> {
        let url = format!("{}{}", self.base_url, ANALYZE_PATH);
        let amount = transaction.amount().to_f64().ok_or_else(|| {
            CheckoutError::NetworkFailure("transaction amount exceeds the wire range".to_string())
        })?;
        let body = AnalyzeRequest {
            amount,
            user_id: &self.user_id,
            merchant: transaction.merchant(),
            category: transaction.category().as_str(),
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CheckoutError::NetworkFailure(format!("request timed out: {e}"))
                } else {
                    CheckoutError::NetworkFailure(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CheckoutError::NetworkFailure(format!(
                "analyzer returned HTTP {status}"
            )));
        }

        let payload: AnalyzeResponse = response
            .json()
            .await
            .map_err(|e| CheckoutError::MalformedResponse(e.to_string()))?;
        if payload.status != "success" {
            return Err(CheckoutError::MalformedResponse(format!(
                "analyzer status {:?}",
                payload.status
            )));
        }

        payload.cards.into_iter().map(WireCard::into_offer).collect()
    }
}

// Wire contract of the reference backend: POST /api/analyze-purchase with
// {amount, user_id, merchant, category}; response carries camelCase reward
// fields and echoes the transaction, which this client ignores.

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    amount: f64,
    user_id: &'a str,
    merchant: &'a str,
    category: &'a str,
}

#[derive(Deserialize)]
struct AnalyzeResponse {
    cards: Vec<WireCard>,
    status: String,
    #[serde(default)]
    #[allow(dead_code)]
    transaction: Option<serde_json::Value>,
}

/// Card ids arrive as numbers from the reference backend but as strings from
/// wallet-profile shaped payloads; both normalize to [`CardId`].
#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Num(u64),
    Str(String),
}

impl WireId {
    fn into_card_id(self) -> CardId {
        match self {
            WireId::Num(n) => CardId::new(n.to_string()),
            WireId::Str(s) => CardId::new(s),
        }
    }
}

#[derive(Deserialize)]
struct WireCard {
    id: WireId,
    name: String,
    network: String,
    last4: String,
    rewards: WireRewards,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRewards {
    base_rewards: WireComponent,
    special_offer: WireComponent,
    total_value: f64,
    effective_rate: f64,
}

#[derive(Deserialize)]
struct WireComponent {
    value: f64,
    description: String,
}

fn money(field: &str, value: f64) -> Result<Decimal> {
    Decimal::try_from(value)
        .map(|d| d.round_dp(2))
        .map_err(|e| CheckoutError::MalformedResponse(format!("{field}: {e}")))
}

impl WireCard {
    fn into_offer(self) -> Result<CardOffer> {
        let card = Card::new(self.id.into_card_id(), self.name, self.network, self.last4)?;
        let rewards = RewardBreakdown {
            base_rewards: RewardComponent {
                value: money("baseRewards.value", self.rewards.base_rewards.value)?,
                description: self.rewards.base_rewards.description,
            },
            special_offer: RewardComponent {
                value: money("specialOffer.value", self.rewards.special_offer.value)?,
                description: self.rewards.special_offer.description,
            },
            total_value: money("totalValue", self.rewards.total_value)?,
            effective_rate: money("effectiveRate", self.rewards.effective_rate)?,
        };
        Ok(CardOffer { card, rewards })
    }
}
