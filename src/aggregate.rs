// src/aggregate.rs
//
// Per-drug summary over the resident dataset. Never divides by zero: an empty
// selection reports 0 useful votes and the "No Ratings" sentinel.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::config::consts::{NO_RATINGS, STAR_MAX};
use crate::core::sanitize::normalize_drug_name;
use crate::data::UnifiedDataset;

/// A numeric score or the "No Ratings" sentinel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Score<T> {
    Value(T),
    NoRatings,
}

impl<T: Copy> Score<T> {
    pub fn value(&self) -> Option<T> {
        match self { Score::Value(v) => Some(*v), Score::NoRatings => None }
    }
}

impl<T: fmt::Display> fmt::Display for Score<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Value(v) => v.fmt(f),
            Score::NoRatings => f.write_str(NO_RATINGS),
        }
    }
}

impl<T: Serialize> Serialize for Score<T> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Score::Value(v) => v.serialize(s),
            Score::NoRatings => s.serialize_str(NO_RATINGS),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugSummary {
    pub drug_name: String,
    pub review_count: usize,
    pub total_useful_count: u64,
    pub average_rating: Score<f64>,
    pub star_rating: Score<u8>,
}

pub fn aggregate(ds: &UnifiedDataset, name: &str) -> DrugSummary {
    let mut review_count = 0usize;
    let mut total_useful_count = 0u64;
    let mut sum = 0f64;
    let mut rated = 0usize;

    for r in ds.by_drug(name) {
        review_count += 1;
        total_useful_count += u64::from(r.useful_count);
        if r.rating.is_finite() {
            sum += f64::from(r.rating);
            rated += 1;
        }
    }

    let average_rating = if rated == 0 {
        Score::NoRatings
    } else {
        Score::Value(round1(sum / rated as f64))
    };

    DrugSummary {
        drug_name: normalize_drug_name(name),
        review_count,
        total_useful_count,
        average_rating,
        star_rating: stars(average_rating),
    }
}

/// One decimal place, halves away from zero.
fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Nearest whole star (halves away from zero), clamped to 0..=5.
pub fn stars(avg: Score<f64>) -> Score<u8> {
    match avg {
        Score::Value(v) => Score::Value(v.round().clamp(0.0, f64::from(STAR_MAX)) as u8),
        Score::NoRatings => Score::NoRatings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::tests::rec;
    use crate::data::{DatasetPartition, Origin, Partition};

    fn dataset(rows: &[(&str, f32, u16)]) -> UnifiedDataset {
        let train = DatasetPartition {
            partition: Partition::Train,
            records: rows.iter().map(|(n, r, u)| rec(n, *r, *u, Origin::Train)).collect(),
        };
        crate::store::merge(train, DatasetPartition::new(Partition::Test))
    }

    #[test]
    fn nonexistent_drug_reports_sentinels() {
        let ds = dataset(&[("Valsartan", 9.0, 27)]);
        let s = aggregate(&ds, "Nonexistent Drug");
        assert_eq!(s.total_useful_count, 0);
        assert_eq!(s.review_count, 0);
        assert_eq!(s.average_rating, Score::NoRatings);
        assert_eq!(s.star_rating, Score::NoRatings);
    }

    #[test]
    fn sums_and_means_over_matching_rows() {
        let ds = dataset(&[("Valsartan", 9.0, 27), ("Other", 1.0, 100), ("Valsartan", 4.0, 3)]);
        let s = aggregate(&ds, "valsartan");
        assert_eq!(s.drug_name, "Valsartan");
        assert_eq!(s.review_count, 2);
        assert_eq!(s.total_useful_count, 30);
        assert_eq!(s.average_rating, Score::Value(6.5));
        assert_eq!(s.star_rating, Score::Value(5));
    }

    #[test]
    fn average_rounds_to_one_decimal() {
        let ds = dataset(&[("A", 1.0, 0), ("A", 2.0, 0), ("A", 2.0, 0)]);
        assert_eq!(aggregate(&ds, "A").average_rating, Score::Value(1.7));
    }

    #[test]
    fn star_rounding_is_half_away_from_zero() {
        assert_eq!(stars(Score::Value(4.6)), Score::Value(5));
        assert_eq!(stars(Score::Value(4.4)), Score::Value(4));
        assert_eq!(stars(Score::Value(4.5)), Score::Value(5));
        assert_eq!(stars(Score::Value(0.4)), Score::Value(0));
        assert_eq!(stars(Score::Value(8.3)), Score::Value(5));
        assert_eq!(stars(Score::NoRatings), Score::NoRatings);
    }

    #[test]
    fn non_finite_ratings_are_ignored() {
        let ds = dataset(&[("A", f32::NAN, 2)]);
        let s = aggregate(&ds, "A");
        assert_eq!(s.total_useful_count, 2);
        assert_eq!(s.average_rating, Score::NoRatings);
    }

    #[test]
    fn display_honors_precision() {
        assert_eq!(format!("{:.1}", Score::Value(7.0)), "7.0");
        assert_eq!(format!("{:.1}", Score::Value(8.0)), "8.0");
        assert_eq!(format!("{:.1}", Score::<f64>::NoRatings), "No Ratings");
    }

    #[test]
    fn sentinel_serializes_as_text() {
        let ds = dataset(&[]);
        let json = serde_json::to_value(aggregate(&ds, "x")).unwrap();
        assert_eq!(json["averageRating"], "No Ratings");
        assert_eq!(json["starRating"], "No Ratings");
        assert_eq!(json["totalUsefulCount"], 0);
    }
}
