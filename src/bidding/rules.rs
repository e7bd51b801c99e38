//! Bid Rules Module
//!
//! Allowed bid range derived from the asking price, plus the increment rule.

use serde::Serialize;

// == Constants ==
/// Lowest bid accepted, as a fraction of the asking price (30% under ask).
pub const MIN_BID_PERCENTAGE: f64 = 0.7;

/// Highest bid accepted, as a fraction of the asking price.
pub const MAX_BID_PERCENTAGE: f64 = 1.5;

/// Bids at or above this fraction of the asking price get a warning.
pub const WARNING_PERCENTAGE: f64 = 1.4;

/// Bids must be a whole multiple of this currency unit.
pub const BID_INCREMENT: f64 = 10.0;

// == Bid Rules ==
/// Bounds derived from a single asking price.
///
/// For any non-negative asking price `min_bid <= warning_threshold <= max_bid`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BidRules {
    /// The asking price the bounds were derived from
    pub asked_price: f64,
    /// Lowest acceptable bid (inclusive)
    pub min_bid: f64,
    /// Highest acceptable bid (inclusive)
    pub max_bid: f64,
    /// Bids at or above this amount are valid but flagged
    pub warning_threshold: f64,
    /// Required currency unit for bid amounts
    pub increment: f64,
}

impl BidRules {
    // == Constructor ==
    /// Derives the bid bounds for an asking price.
    pub fn for_asked_price(asked_price: f64) -> Self {
        Self {
            asked_price,
            min_bid: minimum_allowed_bid(asked_price),
            max_bid: maximum_allowed_bid(asked_price),
            warning_threshold: asked_price * WARNING_PERCENTAGE,
            increment: BID_INCREMENT,
        }
    }

    // == Assess ==
    /// Classifies a bid amount against these bounds.
    pub fn assess(&self, bid_amount: f64) -> BidAssessment {
        // Negated so NaN lands here
        if !(bid_amount >= self.min_bid) {
            return BidAssessment::BelowMinimum;
        }
        if bid_amount > self.max_bid {
            return BidAssessment::AboveMaximum;
        }
        if bid_amount % self.increment != 0.0 {
            return BidAssessment::OffIncrement;
        }
        if bid_amount >= self.warning_threshold {
            return BidAssessment::NearMaximum;
        }
        BidAssessment::Acceptable
    }
}

// == Bid Assessment ==
/// Outcome of checking a bid amount, used to pick inline styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BidAssessment {
    /// Under the minimum allowed bid (or not a number)
    BelowMinimum,
    /// Over the maximum allowed bid
    AboveMaximum,
    /// Inside the range but not a multiple of the increment
    OffIncrement,
    /// Valid, but at or above the warning threshold
    NearMaximum,
    /// Valid
    Acceptable,
}

impl BidAssessment {
    /// Returns true if a bid with this assessment may be placed.
    pub fn is_valid(self) -> bool {
        matches!(self, BidAssessment::Acceptable | BidAssessment::NearMaximum)
    }
}

// == Operations ==
/// Returns the lowest bid allowed for an asking price.
///
/// Non-positive asking prices are not rejected; the result is simply `<= 0`.
pub fn minimum_allowed_bid(asked_price: f64) -> f64 {
    asked_price * MIN_BID_PERCENTAGE
}

/// Returns the highest bid allowed for an asking price.
pub fn maximum_allowed_bid(asked_price: f64) -> f64 {
    asked_price * MAX_BID_PERCENTAGE
}

/// Classifies `bid_amount` against the bounds for `asked_price`.
pub fn assess_bid(asked_price: f64, bid_amount: f64) -> BidAssessment {
    BidRules::for_asked_price(asked_price).assess(bid_amount)
}

/// Returns true if `bid_amount` is inside `[min, max]` and a multiple of
/// [`BID_INCREMENT`].
pub fn is_valid_bid(asked_price: f64, bid_amount: f64) -> bool {
    assess_bid(asked_price, bid_amount).is_valid()
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_for_example_price() {
        assert_eq!(minimum_allowed_bid(25_000.0), 17_500.0);
        assert_eq!(maximum_allowed_bid(25_000.0), 37_500.0);
    }

    #[test]
    fn test_valid_at_inclusive_bounds() {
        assert!(is_valid_bid(25_000.0, 17_500.0));
        assert!(is_valid_bid(25_000.0, 37_500.0));
    }

    #[test]
    fn test_invalid_outside_bounds() {
        assert!(!is_valid_bid(25_000.0, 17_499.0));
        assert!(!is_valid_bid(25_000.0, 17_490.0));
        assert!(!is_valid_bid(25_000.0, 37_510.0));
    }

    #[test]
    fn test_increment_rule() {
        assert_eq!(assess_bid(25_000.0, 20_005.0), BidAssessment::OffIncrement);
        assert!(!is_valid_bid(25_000.0, 20_005.0));
        assert!(is_valid_bid(25_000.0, 20_010.0));
    }

    #[test]
    fn test_warning_threshold() {
        let rules = BidRules::for_asked_price(25_000.0);
        assert_eq!(rules.warning_threshold, 35_000.0);
        assert_eq!(rules.assess(35_000.0), BidAssessment::NearMaximum);
        assert_eq!(rules.assess(34_990.0), BidAssessment::Acceptable);
        assert!(rules.assess(36_000.0).is_valid());
    }

    #[test]
    fn test_nan_bid_is_below_minimum() {
        assert_eq!(assess_bid(25_000.0, f64::NAN), BidAssessment::BelowMinimum);
    }

    #[test]
    fn test_non_positive_asked_price_does_not_panic() {
        assert_eq!(minimum_allowed_bid(0.0), 0.0);
        assert!(minimum_allowed_bid(-100.0) <= 0.0);
        assert!(is_valid_bid(0.0, 0.0));
        assert!(!is_valid_bid(0.0, 10.0));
    }

    #[test]
    fn test_assessment_serializes_snake_case() {
        let json = serde_json::to_string(&BidAssessment::NearMaximum).unwrap();
        assert_eq!(json, "\"near_maximum\"");
    }
}
