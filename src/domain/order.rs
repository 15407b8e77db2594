use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One purchasable entry in a category's order preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: u32,
    pub name: String,
    pub unit_price: Decimal,
    pub description: String,
    pub quantity: u32,
}

impl LineItem {
    pub fn total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// What the catalog returns for one category: the merchant behind it and its
/// purchasable items, in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryListing {
    pub merchant: String,
    pub items: Vec<LineItem>,
}

/// Sum of `unit_price x quantity` over all items. Tax is displayed as
/// included and contributes nothing to the total.
pub fn order_total(items: &[LineItem]) -> Decimal {
    items.iter().map(LineItem::total).sum()
}
