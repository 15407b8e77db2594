//! Text rendering over read-only session snapshots.
//!
//! One renderer per screen, all stateless: they consume what the session
//! exposes and never mutate it. Any other presentation (a GUI, a device
//! mock) would sit behind the same contract.

use crate::application::session::{CheckoutSession, Screen};
use crate::domain::category::CategoryId;
use std::fmt::Write;

/// Renders the session's current screen.
pub fn render(session: &CheckoutSession) -> String {
    match session.screen() {
        Screen::Home => render_home(),
        Screen::Preview => render_preview(session),
        Screen::Payment => render_payment(session),
        Screen::Success => render_success(session),
    }
}

fn render_home() -> String {
    let mut out = String::from("Categories\n");
    for category in CategoryId::ALL {
        let _ = writeln!(out, "  - {category}");
    }
    out.push_str("Select a category to explore rewards & offers\n");
    out
}

fn render_preview(session: &CheckoutSession) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", session.merchant().unwrap_or("Order"));
    out.push_str("Order Preview\n\n");
    for item in session.line_items() {
        let _ = writeln!(
            out,
            "  {} x{}  ({})  ${:.2}",
            item.name, item.quantity, item.description, item.total()
        );
    }
    let total = session.order_total();
    let _ = writeln!(out, "\n  Subtotal      ${total:.2}");
    out.push_str("  Tax           Included\n");
    let _ = writeln!(out, "  Total to Pay  ${total:.2}");
    out
}

fn render_payment(session: &CheckoutSession) -> String {
    let mut out = String::from("Payment\n");
    if let Some(transaction) = session.transaction() {
        let _ = writeln!(out, "Amount to Pay: ${:.2}\n", transaction.amount());
    }

    if session.awaiting_rewards() {
        out.push_str("Analyzing rewards...\n");
        return out;
    }
    let Some(ranked) = session.ranked_cards() else {
        out.push_str("No eligible payment methods\n");
        return out;
    };

    out.push_str("Select Payment Method\n");
    for card in ranked {
        let marker = if session.selected_card() == Some(&card.card.id) {
            "[x]"
        } else {
            "[ ]"
        };
        let _ = writeln!(
            out,
            "  {marker} {}. {}  {} **** {}  (${:.2} value)",
            card.rank, card.card.display_name, card.card.network, card.card.last4,
            card.rewards.total_value
        );
        let _ = writeln!(
            out,
            "        Base Rewards  ${:.2}  {}",
            card.rewards.base_rewards.value, card.rewards.base_rewards.description
        );
        let _ = writeln!(
            out,
            "        Special Offer ${:.2}  {}",
            card.rewards.special_offer.value, card.rewards.special_offer.description
        );
        let _ = writeln!(
            out,
            "        Effective reward rate: {}%",
            card.rewards.effective_rate
        );
    }
    out
}

fn render_success(session: &CheckoutSession) -> String {
    let mut out = String::from("Payment Successful!\n");
    if let Some(transaction) = session.transaction() {
        let _ = writeln!(out, "Amount paid: ${:.2}", transaction.amount());
    }
    if let Some(receipt) = session.receipt_id() {
        let _ = writeln!(out, "Transaction ID: {receipt}");
    }
    out
}
