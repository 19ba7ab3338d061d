use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::PhoneError;

pub const COUNTRY_CODE: &str = "237";

// Same unreserved set as JavaScript's encodeURIComponent.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Which WhatsApp entry point the link should target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// `https://wa.me/`, resolved by WhatsApp on any device.
    #[default]
    Universal,
    MobileApp,
    WebClient,
}

/// Digits only, with the Cameroon country code. `+237 656 46 70 51`,
/// `237656467051` and `656467051` all give `237656467051`.
pub fn normalize_phone(raw: &str) -> Result<String, PhoneError> {
    let mut digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(PhoneError::Empty);
    }
    if let Some(rest) = digits.strip_prefix("00") {
        digits = rest.to_string();
    }
    if !digits.starts_with(COUNTRY_CODE) {
        digits.insert_str(0, COUNTRY_CODE);
    }
    if !(10..=15).contains(&digits.len()) {
        return Err(PhoneError::Invalid(raw.to_string()));
    }
    Ok(digits)
}

pub fn encode_message(message: &str) -> String {
    utf8_percent_encode(message, COMPONENT).to_string()
}

pub fn build_deep_link(message: &str, phone_number: &str) -> Result<String, PhoneError> {
    build_deep_link_for(message, phone_number, Platform::Universal)
}

pub fn build_deep_link_for(
    message: &str,
    phone_number: &str,
    platform: Platform,
) -> Result<String, PhoneError> {
    let number = normalize_phone(phone_number)?;
    let text = encode_message(message);
    Ok(match platform {
        Platform::Universal => format!("https://wa.me/{number}?text={text}"),
        Platform::MobileApp => format!("whatsapp://send?phone={number}&text={text}"),
        Platform::WebClient => {
            format!("https://web.whatsapp.com/send?phone={number}&text={text}")
        }
    })
}

/// The decoded `text` parameter of a deep link, if present.
pub fn decode_text_param(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    url.query_pairs()
        .find(|(k, _)| k == "text")
        .map(|(_, v)| v.into_owned())
}
