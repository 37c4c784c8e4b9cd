//! Deterministic contact-info lookups. Total functions: they never fail,
//! only return `None`.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w.\-]+@[\w.\-]+").expect("email pattern compiles"));

// Tolerates an optional country code, space/hyphen/dot separators and a
// parenthesized area code.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+?\d{1,3})?[\s.\-]?\(?\d{2,4}\)?[\s.\-]?\d{3,4}[\s.\-]?\d{3,4}")
        .expect("phone pattern compiles")
});

/// First email-looking substring in document order, if any.
pub fn find_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

/// First phone-looking substring in document order, verbatim — no
/// reformatting or country inference.
pub fn find_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_email_returns_first_match() {
        assert_eq!(
            find_email("contact: a.b@x.com now"),
            Some("a.b@x.com".to_string())
        );
        assert_eq!(
            find_email("a@one.com then b@two.com"),
            Some("a@one.com".to_string())
        );
    }

    #[test]
    fn test_find_email_none_without_match() {
        assert_eq!(find_email("no email here"), None);
        assert_eq!(find_email(""), None);
    }

    #[test]
    fn test_find_phone_keeps_digits_in_order() {
        let found = find_phone("call +1 555-123-4567").expect("phone found");
        let digits: String = found.chars().filter(|c| c.is_ascii_digit()).collect();
        assert_eq!(digits, "15551234567");
    }

    #[test]
    fn test_find_phone_handles_parenthesized_area_code() {
        let found = find_phone("office (020) 7946 0958").expect("phone found");
        assert!(found.contains("7946"));
    }

    #[test]
    fn test_find_phone_none_without_match() {
        assert_eq!(find_phone("no numbers at all"), None);
    }
}
