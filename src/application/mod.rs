//! Application layer driving the checkout flow.
//!
//! [`session::CheckoutSession`] is the state machine owning all mutable
//! session state; [`checkout::CheckoutFlow`] wires it to the catalog and
//! reward-analyzer collaborators injected at construction.

pub mod checkout;
pub mod session;
