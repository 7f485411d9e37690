//! Email address validation for the contact form.

use regex::Regex;
use std::sync::OnceLock;

/// Whitespace as browsers define it for `\s`. Unicode `White_Space` differs:
/// it includes U+0085 and excludes U+FEFF.
const BROWSER_WHITESPACE: &str =
    r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

fn email_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        let part = format!("[^{BROWSER_WHITESPACE}@]+");
        let pattern = format!(r"^{part}@{part}\.{part}$");
        Regex::new(&pattern).expect("email pattern is a valid regex")
    })
}

/// Check whether `email` looks like `local@domain.tld`.
///
/// One `@`, no whitespace, non-empty text on both sides, and a dot inside
/// the domain part with text on both sides of it. Deliverability is not
/// checked.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_accepts_simple_addresses() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("jane.doe+site@mail.example.org"));
        assert!(is_valid_email("x@y.z"));
    }

    #[test]
    fn test_rejects_missing_parts() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("ab.com"));
    }

    #[test]
    fn test_whitespace_matches_browser_definition() {
        assert!(!is_valid_email("a\u{FEFF}b@c.com"));
        assert!(!is_valid_email("a@b\u{3000}.com"));
        assert!(!is_valid_email("a@b.c\u{A0}"));
        assert!(is_valid_email("a\u{85}b@c.com"));
    }

    #[test]
    fn test_rejects_whitespace_and_extra_at() {
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@b .com"));
        assert!(!is_valid_email(" a@b.com"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("a\t@b.com"));
    }

    proptest! {
        #[test]
        fn prop_well_formed_addresses_are_valid(
            local in "[a-z0-9._+-]{1,12}",
            domain in "[a-z0-9-]{1,12}",
            tld in "[a-z]{1,6}",
        ) {
            let email = format!("{local}@{domain}.{tld}");
            prop_assert!(is_valid_email(&email));
        }

        #[test]
        fn prop_whitespace_anywhere_is_invalid(
            local in "[a-z]{1,8}",
            domain in "[a-z]{1,8}",
            pos in 0usize..3,
        ) {
            let parts = [local.as_str(), domain.as_str(), "com"];
            let mut email = format!("{}@{}.{}", parts[0], parts[1], parts[2]);
            let insert_at = match pos {
                0 => 0,
                1 => parts[0].len() + 1,
                _ => email.len(),
            };
            email.insert(insert_at, ' ');
            prop_assert!(!is_valid_email(&email));
        }

        #[test]
        fn prop_without_at_is_invalid(s in "[^@]*") {
            prop_assert!(!is_valid_email(&s));
        }

        #[test]
        fn prop_two_ats_is_invalid(a in "[a-z]{1,5}", b in "[a-z]{1,5}", c in "[a-z]{1,5}") {
            let email = format!("{a}@{b}@{c}.com");
            prop_assert!(!is_valid_email(&email));
        }
    }
}
