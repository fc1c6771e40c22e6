// src/matching/name.rs - Company name canonicalization used as the cross-source join key
use once_cell::sync::Lazy;
use regex::Regex;

/// Join key derived from a display name. Never shown to users.
pub type NameKey = String;

static NON_KEY_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("static key pattern is valid"));

/// Lower-cases `name` and drops every character that is not an ASCII letter
/// or digit. Diacritics and punctuation are removed, not transliterated, so
/// `"Ə.B.B."` and `"əbb"` both become `"bb"`.
///
/// This is the only identity signal between the two sources: names that differ
/// lexically (an abbreviation versus the full legal name) stay separate.
pub fn normalize_name(name: &str) -> NameKey {
    if name.is_empty() {
        return String::new();
    }
    let lowered = name.to_lowercase();
    NON_KEY_CHARS.replace_all(&lowered, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_case_and_spacing_collapse() {
        assert_eq!(normalize_name("ABC Bank"), "abcbank");
        assert_eq!(normalize_name("abc bank"), "abcbank");
        assert_eq!(normalize_name("ABC-Bank"), "abcbank");
        assert_eq!(normalize_name("  A.B.C.  bank "), "abcbank");
    }

    #[test]
    fn test_diacritics_are_dropped_not_transliterated() {
        assert_eq!(normalize_name("Ə.B.B."), normalize_name("əbb"));
        assert_eq!(normalize_name("Kapital Bank ASC"), "kapitalbankasc");
        assert_eq!(normalize_name("Yelo Bank"), "yelobank");
        assert_eq!(normalize_name("Rabitəbank"), "rabitbank");
    }

    #[test]
    fn test_digits_survive() {
        assert_eq!(normalize_name("Bank 24/7"), "bank247");
    }

    #[test]
    fn test_punctuation_only_and_empty_yield_empty_key() {
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name("--- ..."), "");
        assert_eq!(normalize_name("ƏÇŞ"), "");
    }

    #[test]
    fn test_abbreviation_does_not_match_full_name() {
        assert_ne!(
            normalize_name("ABB"),
            normalize_name("Azərbaycan Beynəlxalq Bankı")
        );
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(name in "\\PC{0,40}") {
            let once = normalize_name(&name);
            prop_assert_eq!(normalize_name(&once), once.clone());
        }

        #[test]
        fn prop_key_is_lowercase_ascii_alphanumeric(name in "\\PC{0,40}") {
            let key = normalize_name(&name);
            prop_assert!(key.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        }

        #[test]
        fn prop_case_insensitive_for_ascii(name in "[A-Za-z0-9 .,-]{0,30}") {
            prop_assert_eq!(normalize_name(&name.to_uppercase()), normalize_name(&name.to_lowercase()));
        }
    }
}
