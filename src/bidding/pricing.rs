//! Pricing Module
//!
//! Step sizes for increment/decrement controls and "human friendly" rounding.

use serde::Deserialize;

use crate::bidding::ListingSnapshot;

// == Step Direction ==
/// Direction of a single increment/decrement press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepDirection {
    Up,
    Down,
}

impl StepDirection {
    fn sign(self) -> f64 {
        match self {
            StepDirection::Up => 1.0,
            StepDirection::Down => -1.0,
        }
    }
}

// == Smart Step ==
/// Returns the increment step for a price, scaled to its magnitude.
///
/// - `>= 100_000` steps by 1,000
/// - `>= 10_000` steps by 500
/// - otherwise steps by 100
pub fn smart_step(current_price: f64) -> f64 {
    if current_price >= 100_000.0 {
        1_000.0
    } else if current_price >= 10_000.0 {
        500.0
    } else {
        100.0
    }
}

/// Applies one smart step to `current` in the given direction.
///
/// The result is clamped at zero but may fall below the minimum allowed bid,
/// so the caller can render the invalid state.
pub fn smart_adjust(current: f64, direction: StepDirection) -> f64 {
    let delta = smart_step(current) * direction.sign();
    (current + delta).max(0.0)
}

/// Amount to pre-fill after a bid of `amount` was placed.
pub fn next_bid_after(amount: f64) -> f64 {
    amount + smart_step(amount)
}

/// Starting bid amount shown for a listing.
///
/// Public listings with a standing high bid start one step above it.
pub fn initial_bid(listing: &ListingSnapshot) -> f64 {
    match listing.standing_high_bid() {
        Some(high) if listing.is_public_bid => high + smart_step(high),
        _ => listing.ask_price,
    }
}

// == Rounding ==
/// Rounding granularity for an amount.
fn rounding_granularity(amount: f64) -> f64 {
    if amount >= 1_000_000.0 {
        1_000.0
    } else if amount >= 100_000.0 {
        500.0
    } else if amount >= 10_000.0 {
        100.0
    } else {
        10.0
    }
}

/// Snaps an amount to the nearest "reasonable" price.
///
/// Multiples of 10 under 10,000, of 100 under 100,000, of 500 under
/// 1,000,000 and of 1,000 above. Non-positive (and NaN) input yields 0.
pub fn round_to_reasonable_price(amount: f64) -> f64 {
    if !(amount > 0.0) {
        return 0.0;
    }
    let granularity = rounding_granularity(amount);
    (amount / granularity).round() * granularity
}
