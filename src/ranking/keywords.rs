// src/ranking/keywords.rs - Complaint keyword frequencies over concatenated review text
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

use crate::models::KeywordCount;
use crate::utils::constants::{
    BASE_STOP_WORDS, DEFAULT_DOMAIN_STOP_WORDS, DEFAULT_KEYWORD_COUNT, DEFAULT_KEYWORD_MIN_LENGTH,
};

// Latin letters and digits plus the Azerbaijani extended letters.
static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z0-9ğüşöçıə]+").expect("static token pattern is valid"));

#[derive(Debug, Clone)]
pub struct KeywordConfig {
    pub stop_words: HashSet<String>,
    pub min_length: usize,
    pub top_k: usize,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self::with_domain_words(DEFAULT_DOMAIN_STOP_WORDS.iter().copied())
    }
}

impl KeywordConfig {
    /// Base function words plus the given segment words.
    pub fn with_domain_words<'a, I>(domain_words: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let stop_words = BASE_STOP_WORDS
            .iter()
            .copied()
            .chain(domain_words)
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        Self {
            stop_words,
            min_length: DEFAULT_KEYWORD_MIN_LENGTH,
            top_k: DEFAULT_KEYWORD_COUNT,
        }
    }

    fn keeps(&self, token: &str) -> bool {
        token.chars().count() >= self.min_length && !self.stop_words.contains(token)
    }
}

/// Lower-cases `text` and splits it into maximal letter/digit runs.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// The `config.top_k` most frequent tokens across `texts`, by descending count.
/// Equal counts keep the order in which the tokens were first seen.
pub fn top_keywords<'a, I>(texts: I, config: &KeywordConfig) -> Vec<KeywordCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut first_seen: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for text in texts {
        for token in tokenize(text) {
            if !config.keeps(&token) {
                continue;
            }
            match counts.get_mut(&token) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(token.clone(), 1);
                    first_seen.push(token);
                }
            }
        }
    }

    let mut ranked: Vec<KeywordCount> = first_seen
        .into_iter()
        .map(|keyword| {
            let count = counts[&keyword];
            KeywordCount { keyword, count }
        })
        .collect();
    // stable: ties stay in first-seen order
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(config.top_k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(stop_words: &[&str]) -> KeywordConfig {
        KeywordConfig {
            stop_words: stop_words.iter().map(|s| s.to_string()).collect(),
            min_length: 3,
            top_k: 10,
        }
    }

    #[test]
    fn test_keyword_example() {
        let keywords = top_keywords(["Pis xidmət, çox pis!"], &config_with(&["çox"]));
        assert_eq!(
            keywords,
            vec![
                KeywordCount { keyword: "pis".to_string(), count: 2 },
                KeywordCount { keyword: "xidmət".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_tokenize_keeps_extended_letters_and_digits() {
        assert_eq!(
            tokenize("Kart 24 saat ərzində BLOKLANDI; ödəniş?"),
            vec!["kart", "24", "saat", "ərzində", "bloklandi", "ödəniş"]
        );
    }

    #[test]
    fn test_short_tokens_and_stop_words_dropped() {
        let config = KeywordConfig::default();
        let keywords = top_keywords(
            ["Bank kart ve kredit", "bankda kart yox", "kredit kart"],
            &config,
        );
        let words: Vec<&str> = keywords.iter().map(|k| k.keyword.as_str()).collect();
        assert_eq!(words, vec!["kart", "kredit"]);
        assert_eq!(keywords[0].count, 3);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let keywords = top_keywords(["zeta alpha beta", "beta alpha zeta"], &config_with(&[]));
        let words: Vec<&str> = keywords.iter().map(|k| k.keyword.as_str()).collect();
        assert_eq!(words, vec!["zeta", "alpha", "beta"]);
    }

    #[test]
    fn test_top_k_truncates_and_empty_input() {
        let mut config = config_with(&[]);
        config.top_k = 1;
        let keywords = top_keywords(["one two two three three three"], &config);
        assert_eq!(keywords.len(), 1);
        assert_eq!(keywords[0].keyword, "three");
        assert!(top_keywords(Vec::<&str>::new(), &config).is_empty());
    }

    #[test]
    fn test_domain_words_are_configurable() {
        let config = KeywordConfig::with_domain_words(["Sığorta"]);
        assert!(config.stop_words.contains("sığorta"));
        assert!(!config.stop_words.contains("bank"));
        assert!(config.stop_words.contains("the"));
    }
}
