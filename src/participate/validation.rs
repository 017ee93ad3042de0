use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").expect("email pattern is valid")
});

/// `+998XXXXXXXXX`, with the plus optional.
static UZ_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?998[0-9]{9}$").expect("uzbek phone pattern is valid"));

static INTL_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{9,15}$").expect("phone pattern is valid"));

/// A name needs a length of at least two once surrounding whitespace is gone.
///
/// Length is counted in UTF-16 code units, the way browsers count it, so a
/// single emoji or supplementary-plane ideograph already passes.
pub fn is_valid_name(name: &str) -> bool {
    name.trim().encode_utf16().count() >= 2
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Strips everything except ASCII digits and `+`.
pub fn clean_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect()
}

/// Whether the number carries the Uzbek country code.
pub fn is_uzbek(raw: &str) -> bool {
    let cleaned = clean_phone(raw);
    cleaned.starts_with("+998") || cleaned.starts_with("998")
}

/// Uzbek numbers need exactly nine digits after `998`, anything else
/// between nine and fifteen digits.
pub fn is_valid_phone(raw: &str) -> bool {
    let cleaned = clean_phone(raw);
    if cleaned.starts_with("+998") || cleaned.starts_with("998") {
        UZ_PHONE_RE.is_match(&cleaned)
    } else {
        INTL_PHONE_RE.is_match(&cleaned)
    }
}
