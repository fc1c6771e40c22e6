// src/utils/engine_config.rs
use log::{info, warn};
use std::env;

use crate::ranking::KeywordConfig;
use crate::utils::constants::{
    DEFAULT_DOMAIN_STOP_WORDS, DEFAULT_KEYWORD_COUNT, DEFAULT_KEYWORD_MIN_LENGTH,
    DEFAULT_LEADERBOARD_SIZE, DEFAULT_MIN_REVIEWS, DEFAULT_VOLUME_SLICE_SIZE,
};

/// Thresholds and sizes for the ranking stage. Each segment run carries its own copy.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub min_reviews: u64,
    pub leaderboard_size: usize,
    pub volume_slice_size: usize,
    pub keywords: KeywordConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_reviews: DEFAULT_MIN_REVIEWS,
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
            volume_slice_size: DEFAULT_VOLUME_SLICE_SIZE,
            keywords: KeywordConfig::default(),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!("Ignoring unparseable {}={:?}, using default", key, raw);
                default
            }
        },
        Err(_) => default,
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let domain_words: Vec<String> = match env::var("DOMAIN_STOP_WORDS") {
            Ok(raw) => parse_list(&raw),
            Err(_) => DEFAULT_DOMAIN_STOP_WORDS.iter().map(|s| s.to_string()).collect(),
        };
        let mut keywords = KeywordConfig::with_domain_words(domain_words.iter().map(String::as_str));
        if let Ok(raw) = env::var("EXTRA_STOP_WORDS") {
            keywords
                .stop_words
                .extend(parse_list(&raw).into_iter().map(|w| w.to_lowercase()));
        }
        keywords.min_length = parse_env("KEYWORD_MIN_LENGTH", DEFAULT_KEYWORD_MIN_LENGTH);
        keywords.top_k = parse_env("KEYWORD_COUNT", DEFAULT_KEYWORD_COUNT);

        Self {
            min_reviews: parse_env("MIN_REVIEWS", DEFAULT_MIN_REVIEWS),
            leaderboard_size: parse_env("LEADERBOARD_SIZE", DEFAULT_LEADERBOARD_SIZE),
            volume_slice_size: parse_env("VOLUME_SLICE_SIZE", DEFAULT_VOLUME_SLICE_SIZE),
            keywords,
        }
    }

    pub fn log_config(&self) {
        info!("📐 Ranking configuration");
        info!("   Minimum reviews for leaderboards: {}", self.min_reviews);
        info!("   Leaderboard size: {}", self.leaderboard_size);
        info!("   Volume slice size: {}", self.volume_slice_size);
        info!(
            "   Keywords: top {} tokens, min length {}, {} stop words",
            self.keywords.top_k,
            self.keywords.min_length,
            self.keywords.stop_words.len()
        );
    }
}
