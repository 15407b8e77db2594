use crate::error::CheckoutError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of merchant categories a shopper can check out against.
///
/// The category drives which catalog listing is shown and is passed through
/// to the reward analyzer; it plays no role in reward arithmetic itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryId {
    Airlines,
    Grocery,
    Bigticket,
    Dining,
}

impl CategoryId {
    pub const ALL: [CategoryId; 4] = [
        CategoryId::Airlines,
        CategoryId::Grocery,
        CategoryId::Bigticket,
        CategoryId::Dining,
    ];

    /// Wire form, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryId::Airlines => "airlines",
            CategoryId::Grocery => "grocery",
            CategoryId::Bigticket => "bigticket",
            CategoryId::Dining => "dining",
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryId {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "airlines" => Ok(CategoryId::Airlines),
            "grocery" => Ok(CategoryId::Grocery),
            "bigticket" => Ok(CategoryId::Bigticket),
            "dining" => Ok(CategoryId::Dining),
            other => Err(CheckoutError::UnknownCategory(other.to_string())),
        }
    }
}
