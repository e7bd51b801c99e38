//! Bid attempt quota per bidder and listing.

/// Number of bids a single bidder may place (or revise) on one listing.
pub const MAX_BID_ATTEMPTS: u32 = 5;

/// Returns how many attempts are left after `used` attempts.
pub fn remaining_attempts(used: u32) -> u32 {
    MAX_BID_ATTEMPTS.saturating_sub(used)
}

/// Returns true once the bidder has no attempts left.
pub fn is_quota_reached(used: u32) -> bool {
    remaining_attempts(used) == 0
}
