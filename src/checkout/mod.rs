//! Checkout hands the order over to the seller's messaging account.
//! There is no payment step, the customer sends the prefilled
//! summary and the seller takes it from there.
pub mod links;
pub mod message;

pub use links::{chat_link, checkout_link, contact_digits, phone_link, social_link};
pub use message::order_summary;

use crate::cart::Cart;

/// Summary of the current cart and the deep link that sends it to
/// `contact_phone`
pub fn checkout(cart: &Cart, contact_phone: &str) -> (String, String) {
    let summary = order_summary(&cart.lines(), cart.total());
    let link = checkout_link(contact_phone, &summary);
    tracing::info!(
        "Checkout prepared for {} lines totalling {}",
        cart.len(),
        cart.total()
    );
    (summary, link)
}
