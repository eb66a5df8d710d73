//! Links handed to the messaging app, dialer and social profile.
//! Nothing here opens anything, callers decide when to navigate.
use regex::Regex;
use std::sync::OnceLock;

const MESSAGING_BASE_URL: &str = "https://wa.me";
const SOCIAL_BASE_URL: &str = "https://instagram.com";

fn non_digits() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\D").expect("Invalid regex"))
}

/// The contact number with spaces, dashes and the leading `+`
/// removed, as the messaging app expects it.
pub fn contact_digits(phone: &str) -> String {
    non_digits().replace_all(phone, "").into_owned()
}

// Marks `urlencoding` escapes but browsers' `encodeURIComponent` leaves
// alone
const URI_COMPONENT_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Percent-encode `text` for a query value the same way
/// `encodeURIComponent` does
pub fn encode_component(text: &str) -> String {
    URI_COMPONENT_MARKS
        .iter()
        .fold(urlencoding::encode(text).into_owned(), |acc, (escaped, mark)| {
            acc.replace(escaped, mark)
        })
}

/// Deep link that opens a chat with `phone` prefilled with `text`
pub fn checkout_link(phone: &str, text: &str) -> String {
    format!(
        "{}/{}?text={}",
        MESSAGING_BASE_URL,
        contact_digits(phone),
        encode_component(text)
    )
}

/// Deep link that opens a chat with `phone` without any text
pub fn chat_link(phone: &str) -> String {
    format!("{}/{}", MESSAGING_BASE_URL, contact_digits(phone))
}

pub fn phone_link(phone: &str) -> String {
    format!("tel:{}", phone)
}

pub fn social_link(handle: &str) -> String {
    format!("{}/{}", SOCIAL_BASE_URL, handle.trim_start_matches('@'))
}
