//! Plain text order summary that gets pasted into the messaging app.
//! The output only depends on the lines and total passed in.
use crate::cart::CartLine;

pub const ORDER_HEADER: &str = "*NEW ORDER - TEJA PICKLES & HOME FOODS*";

const LINE_SEPARATOR: &str = "--------------------------";

/// Blank fields the customer fills in before sending
const CUSTOMER_FIELDS: [&str; 4] = [
    "CUSTOMER NAME: ",
    "ADDRESS TO DELIVER: ",
    "PINCODE: ",
    "PHN.NO: ",
];

pub fn order_summary(lines: &[&CartLine], total: u64) -> String {
    let items = lines
        .iter()
        .map(|line| {
            format!(
                "ITEM NAME: {} ({})\nQUANTITY: {}\n{}",
                line.name,
                line.tier.label(),
                line.quantity,
                LINE_SEPARATOR
            )
        })
        .collect::<Vec<String>>()
        .join("\n");

    format!(
        "{}\n\n{}\n\n💰 *TOTAL PAYABLE: ₹{}*\n\n{}",
        ORDER_HEADER,
        items,
        total,
        CUSTOMER_FIELDS.join("\n")
    )
}
