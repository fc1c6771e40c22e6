// src/aggregation/reviews.rs - Per-company review statistics and the cross-source weighted rating
use std::collections::HashMap;

use crate::models::{ReviewRecord, SideMetrics, SourceARecord, SourceBRecord};

/// Statistics over one company's individual reviews.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSummary {
    pub review_count: u64,
    pub avg_rating: Option<f64>,
    pub low_share: Option<f64>,
}

/// Summarizes a single company's reviews.
///
/// Reviews without a usable rating count toward `review_count` and the
/// low-share denominator but are left out of the mean, so missing ratings
/// dilute the complaint rate instead of inflating it.
pub fn summarize_reviews<'a, I>(reviews: I) -> ReviewSummary
where
    I: IntoIterator<Item = &'a ReviewRecord>,
{
    let mut review_count: u64 = 0;
    let mut low_count: u64 = 0;
    let mut rating_sum: u64 = 0;
    let mut rated: u64 = 0;

    for review in reviews {
        review_count += 1;
        if review.is_low_rating() {
            low_count += 1;
        }
        if let Some(rating) = review.rating {
            rating_sum += u64::from(rating);
            rated += 1;
        }
    }

    let avg_rating = (rated > 0).then(|| rating_sum as f64 / rated as f64);
    let low_share = (review_count > 0).then(|| low_count as f64 / review_count as f64);

    ReviewSummary {
        review_count,
        avg_rating,
        low_share,
    }
}

/// Groups reviews by the display name of their company and summarizes each group.
///
/// `companies` supplies the slug to name mapping; a review whose company has no
/// usable name is grouped under its slug. Groups come back in first-seen order.
pub fn aggregate_reviews(reviews: &[ReviewRecord], companies: &[SourceARecord]) -> Vec<SideMetrics> {
    let slug_to_name: HashMap<&str, &str> = companies
        .iter()
        .filter_map(|c| {
            c.name
                .as_deref()
                .filter(|n| !n.trim().is_empty())
                .map(|n| (c.slug.as_str(), n))
        })
        .collect();

    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&ReviewRecord>> = HashMap::new();

    for review in reviews {
        let slug = review.company_slug.as_str();
        let name = slug_to_name.get(slug).copied().unwrap_or(slug);
        groups
            .entry(name)
            .or_insert_with(|| {
                order.push(name);
                Vec::new()
            })
            .push(review);
    }

    order
        .into_iter()
        .map(|name| {
            let summary = summarize_reviews(groups[name].iter().copied());
            SideMetrics {
                name: name.to_string(),
                review_count: summary.review_count,
                avg_rating: summary.avg_rating,
                low_share: summary.low_share,
            }
        })
        .collect()
}

/// Source B already reports per-company totals; only the shape changes.
pub fn source_b_metrics(records: &[SourceBRecord]) -> Vec<SideMetrics> {
    records
        .iter()
        .map(|r| SideMetrics {
            name: r.name.clone().unwrap_or_default(),
            review_count: r.total_reviews,
            avg_rating: r.overall_rating,
            low_share: None,
        })
        .collect()
}

/// Review-count-weighted mean of the two per-source ratings.
///
/// A side contributes only when its rating is defined and its review count is
/// strictly positive. Returns `None` when neither side qualifies.
pub fn weighted_rating(
    rating_a: Option<f64>,
    n_a: u64,
    rating_b: Option<f64>,
    n_b: u64,
) -> Option<f64> {
    let parts: Vec<(f64, f64)> = [(rating_a, n_a), (rating_b, n_b)]
        .into_iter()
        .filter_map(|(rating, n)| match rating {
            Some(r) if n > 0 && r.is_finite() => Some((r, n as f64)),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        return None;
    }

    let total_weight: f64 = parts.iter().map(|(_, w)| w).sum();
    let weighted_sum: f64 = parts.iter().map(|(r, w)| r * w).sum();
    Some(weighted_sum / total_weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn review(slug: &str, rating: Option<u8>) -> ReviewRecord {
        ReviewRecord {
            company_slug: slug.to_string(),
            rating,
            review_text: None,
        }
    }

    fn company(slug: &str, name: Option<&str>) -> SourceARecord {
        SourceARecord {
            slug: slug.to_string(),
            name: name.map(String::from),
            category_slug: Some("bank".to_string()),
            category_name: None,
            rating_value: None,
            review_count: 0,
        }
    }

    #[test]
    fn test_summary_of_empty_group_is_absent() {
        let summary = summarize_reviews(std::iter::empty());
        assert_eq!(summary.review_count, 0);
        assert_eq!(summary.avg_rating, None);
        assert_eq!(summary.low_share, None);
    }

    #[test]
    fn test_missing_ratings_dilute_low_share() {
        let reviews = vec![
            review("abc", Some(1)),
            review("abc", Some(5)),
            review("abc", None),
            review("abc", Some(2)),
        ];
        let summary = summarize_reviews(&reviews);
        assert_eq!(summary.review_count, 4);
        assert_eq!(summary.low_share, Some(0.5));
        assert_eq!(summary.avg_rating, Some(8.0 / 3.0));
    }

    #[test]
    fn test_all_unrated_group_has_no_mean() {
        let reviews = vec![review("abc", None), review("abc", None)];
        let summary = summarize_reviews(&reviews);
        assert_eq!(summary.review_count, 2);
        assert_eq!(summary.avg_rating, None);
        assert_eq!(summary.low_share, Some(0.0));
    }

    #[test]
    fn test_aggregate_groups_by_display_name() {
        let companies = vec![company("abc", Some("ABC Bank")), company("xyz", Some(""))];
        let reviews = vec![
            review("abc", Some(4)),
            review("xyz", Some(1)),
            review("abc", Some(2)),
        ];
        let metrics = aggregate_reviews(&reviews, &companies);
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].name, "ABC Bank");
        assert_eq!(metrics[0].review_count, 2);
        assert_eq!(metrics[0].avg_rating, Some(3.0));
        assert_eq!(metrics[0].low_share, Some(0.5));
        assert_eq!(metrics[1].name, "xyz");
        assert_eq!(metrics[1].low_share, Some(1.0));
    }

    #[test]
    fn test_source_b_metrics_keep_absent_rating() {
        let records = vec![SourceBRecord {
            name: None,
            category: Some("Bank".to_string()),
            overall_rating: None,
            total_reviews: 7,
        }];
        let metrics = source_b_metrics(&records);
        assert_eq!(metrics[0].name, "");
        assert_eq!(metrics[0].review_count, 7);
        assert_eq!(metrics[0].avg_rating, None);
        assert_eq!(metrics[0].low_share, None);
    }

    #[test]
    fn test_weighted_rating_example() {
        let rating = weighted_rating(Some(4.0), 30, Some(3.0), 10).unwrap();
        assert!((rating - 3.75).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_rating_side_qualification() {
        assert_eq!(weighted_rating(Some(4.0), 0, Some(3.0), 10), Some(3.0));
        assert_eq!(weighted_rating(None, 30, Some(3.0), 10), Some(3.0));
        assert_eq!(weighted_rating(Some(4.0), 30, None, 10), Some(4.0));
        assert_eq!(weighted_rating(Some(4.0), 0, Some(3.0), 0), None);
        assert_eq!(weighted_rating(None, 5, None, 5), None);
    }

    proptest! {
        #[test]
        fn prop_weighted_rating_within_bounds(
            ra in 0.0f64..5.0,
            rb in 0.0f64..5.0,
            na in 1u64..10_000,
            nb in 1u64..10_000,
        ) {
            let w = weighted_rating(Some(ra), na, Some(rb), nb).unwrap();
            prop_assert!(w >= ra.min(rb) - 1e-9);
            prop_assert!(w <= ra.max(rb) + 1e-9);
        }

        #[test]
        fn prop_single_side_equals_that_side(r in 0.0f64..5.0, n in 1u64..10_000) {
            let only_a = weighted_rating(Some(r), n, None, 0).unwrap();
            let only_b = weighted_rating(None, 0, Some(r), n).unwrap();
            prop_assert!((only_a - r).abs() < 1e-9);
            prop_assert!((only_b - r).abs() < 1e-9);
        }
    }
}
