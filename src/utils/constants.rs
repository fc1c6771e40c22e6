// src/utils/constants.rs

/// Minimum combined review count for a company to enter the risk and rating leaderboards.
pub const DEFAULT_MIN_REVIEWS: u64 = 20;

/// Ceiling for any per-source review count. Keeps `a + b` totals exact in both
/// `u64` and `f64`.
pub const MAX_REVIEW_COUNT: u64 = 1 << 52;

pub const DEFAULT_LEADERBOARD_SIZE: usize = 5;
pub const DEFAULT_VOLUME_SLICE_SIZE: usize = 15;
pub const DEFAULT_KEYWORD_COUNT: usize = 12;
pub const DEFAULT_KEYWORD_MIN_LENGTH: usize = 3;

/// Companies whose combined volume is reported as the market concentration figure.
pub const CONCENTRATION_TOP_N: usize = 3;

/// Azerbaijani and English function words that never make useful keywords.
pub const BASE_STOP_WORDS: [&str; 52] = [
    "ve", "və", "də", "da", "bu", "o", "mən", "men", "biz", "siz", "onlar", "bir", "iki", "üç",
    "uc", "dörd", "dord", "beş", "bes", "ilə", "ile", "amma", "ki", "çox", "cox", "heç", "hec",
    "üçün", "ucun", "olan", "olar", "olur", "deyil", "var", "yox", "and", "the", "a", "an", "to",
    "for", "of", "in", "on", "is", "are", "was", "were", "it", "this", "that", "with",
];

/// Inflections of the segment word itself, dropped so keywords are not just "bank".
pub const DEFAULT_DOMAIN_STOP_WORDS: [&str; 6] =
    ["bank", "banka", "banklar", "banki", "bankda", "bankdan"];
