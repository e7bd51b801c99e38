//! Property-Based Tests for Bidding Module
//!
//! Uses proptest to check the bid range, step and rounding rules over
//! arbitrary prices.

use proptest::prelude::*;

use crate::bidding::{
    is_valid_bid, maximum_allowed_bid, minimum_allowed_bid, round_to_reasonable_price,
    smart_step, BidRules, BID_INCREMENT,
};

// == Strategies ==
/// Whole-rupee asking prices across every pricing tier
fn asked_price_strategy() -> impl Strategy<Value = f64> {
    (1u64..5_000_000).prop_map(|p| p as f64)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Minimum never exceeds maximum, and the warning threshold sits between.
    #[test]
    fn prop_bounds_ordered(asked in asked_price_strategy()) {
        let rules = BidRules::for_asked_price(asked);
        prop_assert!(minimum_allowed_bid(asked) <= maximum_allowed_bid(asked));
        prop_assert!(rules.min_bid <= rules.warning_threshold);
        prop_assert!(rules.warning_threshold <= rules.max_bid);
    }

    // Any multiple of the increment inside the range is accepted.
    #[test]
    fn prop_in_range_multiples_are_valid(asked in asked_price_strategy(), pick in 0.0f64..=1.0) {
        let min = minimum_allowed_bid(asked);
        let max = maximum_allowed_bid(asked);
        let lo = (min / BID_INCREMENT).ceil() as u64;
        let hi = (max / BID_INCREMENT).floor() as u64;
        prop_assume!(lo <= hi);

        let k = lo + ((hi - lo) as f64 * pick) as u64;
        let bid = k as f64 * BID_INCREMENT;
        prop_assume!(bid >= min && bid <= max);
        prop_assert!(is_valid_bid(asked, bid), "bid {} for ask {}", bid, asked);
    }

    // Anything outside the range is rejected regardless of the increment rule.
    #[test]
    fn prop_out_of_range_is_invalid(asked in asked_price_strategy(), offset in 1u64..100_000) {
        let below = (minimum_allowed_bid(asked) / BID_INCREMENT).floor() * BID_INCREMENT
            - offset as f64 * BID_INCREMENT;
        let above = (maximum_allowed_bid(asked) / BID_INCREMENT).ceil() * BID_INCREMENT
            + offset as f64 * BID_INCREMENT;
        prop_assert!(!is_valid_bid(asked, below));
        prop_assert!(!is_valid_bid(asked, above));
    }

    // Step size never shrinks as the price grows.
    #[test]
    fn prop_smart_step_monotonic(a in 0.0f64..2_000_000.0, b in 0.0f64..2_000_000.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(smart_step(lo) <= smart_step(hi));
    }

    // Rounding twice gives the same answer as rounding once.
    #[test]
    fn prop_rounding_idempotent(amount in 0.0f64..1_000_000_000.0) {
        let once = round_to_reasonable_price(amount);
        prop_assert_eq!(round_to_reasonable_price(once), once);
    }

    // Rounded prices are always whole multiples of ten.
    #[test]
    fn prop_rounding_multiple_of_ten(amount in 0.0f64..1_000_000_000.0) {
        let rounded = round_to_reasonable_price(amount);
        prop_assert_eq!(rounded % 10.0, 0.0);
    }
}
