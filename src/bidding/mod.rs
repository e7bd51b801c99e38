//! Bidding Module
//!
//! Domain rules for bid amounts: allowed range around the asking price,
//! increment rules, smart stepping and price rounding.

mod attempts;
mod input;
mod pricing;
mod rules;
mod variant;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use attempts::{is_quota_reached, remaining_attempts, MAX_BID_ATTEMPTS};
pub use input::{format_bid_amount, parse_bid_input};
pub use pricing::{
    initial_bid, next_bid_after, round_to_reasonable_price, smart_adjust, smart_step,
    StepDirection,
};
pub use rules::{
    assess_bid, is_valid_bid, maximum_allowed_bid, minimum_allowed_bid, BidAssessment, BidRules,
    BID_INCREMENT, MAX_BID_PERCENTAGE, MIN_BID_PERCENTAGE, WARNING_PERCENTAGE,
};
pub use variant::{BidRecord, BiddingConfig, HiddenBidding, ListingSnapshot, PublicBidding};
