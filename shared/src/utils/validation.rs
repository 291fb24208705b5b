//! Input format validation helpers
//!
//! Field formats for payment instruments come from the bank's card scheme:
//! an 11-character card number and a 5-digit key PIN.

use once_cell::sync::Lazy;
use regex::Regex;

/// Required length of a card number
pub const CARD_NUMBER_LENGTH: usize = 11;

/// Required length of a key PIN
pub const KEY_PIN_LENGTH: usize = 5;

/// Maximum length of a store-account alias
pub const MAX_ALIAS_LENGTH: usize = 256;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid digits regex"));

/// Check that a card number is exactly 11 digits
pub fn is_valid_card_number(card_number: &str) -> bool {
    card_number.len() == CARD_NUMBER_LENGTH && DIGITS_RE.is_match(card_number)
}

/// Check that a key PIN is exactly 5 digits
pub fn is_valid_key_pin(key_pin: &str) -> bool {
    key_pin.len() == KEY_PIN_LENGTH && DIGITS_RE.is_match(key_pin)
}

/// Check that an alias is non-empty, trimmed and within length bounds
pub fn is_valid_alias(alias: &str) -> bool {
    let trimmed = alias.trim();
    !trimmed.is_empty() && trimmed.len() == alias.len() && alias.len() <= MAX_ALIAS_LENGTH
}

/// Check if an email address is plausibly valid
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Check that a username is 3-32 word characters
pub fn is_valid_username(username: &str) -> bool {
    static USERNAME_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]{3,32}$").expect("valid username regex"));
    USERNAME_RE.is_match(username)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_number_format() {
        assert!(is_valid_card_number("12345678901"));
        assert!(!is_valid_card_number("1234567890")); // 10 digits
        assert!(!is_valid_card_number("123456789012")); // 12 digits
        assert!(!is_valid_card_number("1234567890a"));
        assert!(!is_valid_card_number(""));
    }

    #[test]
    fn test_key_pin_format() {
        assert!(is_valid_key_pin("12345"));
        assert!(!is_valid_key_pin("1234"));
        assert!(!is_valid_key_pin("123456"));
        assert!(!is_valid_key_pin("12a45"));
    }

    #[test]
    fn test_alias_format() {
        assert!(is_valid_alias("sunny-trader"));
        assert!(!is_valid_alias(""));
        assert!(!is_valid_alias("  padded  "));
        assert!(!is_valid_alias(&"x".repeat(MAX_ALIAS_LENGTH + 1)));
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("buyer@example.com"));
        assert!(is_valid_email("first.last+tag@shop.co.uk"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
    }

    #[test]
    fn test_username_format() {
        assert!(is_valid_username("slush_fan42"));
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username("has spaces"));
    }
}
