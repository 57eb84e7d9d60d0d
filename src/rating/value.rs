//! Rating value type

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ops::{Add, Sub};

/// An Elo rating value
///
/// Ordering is total (`f64::total_cmp`), so ratings can be used directly as
/// sort keys. Arithmetic with `f64` deltas produces new values; a rating is
/// never mutated in place.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EloRating(f64);

impl EloRating {
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

impl PartialEq for EloRating {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EloRating {}

impl PartialOrd for EloRating {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EloRating {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add<f64> for EloRating {
    type Output = EloRating;

    fn add(self, delta: f64) -> EloRating {
        EloRating(self.0 + delta)
    }
}

impl Sub for EloRating {
    type Output = f64;

    fn sub(self, other: EloRating) -> f64 {
        self.0 - other.0
    }
}

impl From<f64> for EloRating {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<EloRating> for skillratings::elo::EloRating {
    fn from(rating: EloRating) -> Self {
        Self { rating: rating.0 }
    }
}

impl From<skillratings::elo::EloRating> for EloRating {
    fn from(rating: skillratings::elo::EloRating) -> Self {
        Self(rating.rating)
    }
}

impl std::fmt::Display for EloRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match f.precision() {
            Some(precision) => write!(f, "{:.*}", precision, self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        let low = EloRating::new(1400.0);
        let high = EloRating::new(1600.0);

        assert!(low < high);
        assert_eq!(low.max(high), high);
        assert_eq!(EloRating::new(1500.0), EloRating::new(1500.0));
    }

    #[test]
    fn test_arithmetic() {
        let rating = EloRating::new(1500.0) + 7.5;
        assert_eq!(rating.value(), 1507.5);
        assert_eq!(rating - EloRating::new(1500.0), 7.5);
    }

    #[test]
    fn test_display_precision() {
        let rating = EloRating::new(1607.1996);
        assert_eq!(format!("{:.1}", rating), "1607.2");
        assert_eq!(format!("{}", EloRating::new(1500.0)), "1500");
    }

    #[test]
    fn test_skillratings_conversion() {
        let ours = EloRating::new(1234.5);
        let theirs: skillratings::elo::EloRating = ours.into();
        assert_eq!(theirs.rating, 1234.5);
        assert_eq!(EloRating::from(theirs), ours);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&EloRating::new(1500.5)).unwrap();
        assert_eq!(json, "1500.5");
        let back: EloRating = serde_json::from_str("1492.8").unwrap();
        assert_eq!(back.value(), 1492.8);
    }
}
