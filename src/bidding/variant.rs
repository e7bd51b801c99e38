//! Bidding Variant Module
//!
//! Builds the per-listing bidding view for the two auction styles: public
//! (competing bids visible) and hidden (sealed bids).

use serde::{Deserialize, Serialize};

use crate::bidding::{minimum_allowed_bid, smart_step};

// == Inputs ==
/// The listing fields the bidding view depends on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingSnapshot {
    /// Listing identifier
    pub id: String,
    /// Seller's asking price
    pub ask_price: f64,
    /// Whether competing bids are visible to bidders
    pub is_public_bid: bool,
    /// Highest standing bid, if any
    #[serde(default)]
    pub current_high_bid: Option<f64>,
    /// Bidder holding the highest bid, if any
    #[serde(default)]
    pub current_high_bidder_id: Option<String>,
}

impl ListingSnapshot {
    /// The standing high bid. A zero amount counts as no bid.
    pub fn standing_high_bid(&self) -> Option<f64> {
        self.current_high_bid.filter(|high| *high > 0.0)
    }
}

/// A bid already placed on some listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidRecord {
    pub item_id: String,
    pub bidder_id: String,
    pub amount: f64,
}

// == Variants ==
/// View of a public auction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicBidding {
    pub item_id: String,
    pub ask_price: f64,
    pub min_bid: f64,
    pub smart_step: f64,
    pub is_user_high_bidder: bool,
    pub has_user_bid: bool,
    pub current_high_bid: Option<f64>,
    pub current_high_bidder_id: Option<String>,
    /// The viewer has bid but no longer holds the high bid
    pub show_outbid_warning: bool,
}

/// View of a sealed auction. Competing bids are never exposed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HiddenBidding {
    pub item_id: String,
    pub ask_price: f64,
    pub min_bid: f64,
    pub smart_step: f64,
    /// Always false, the viewer cannot know
    pub is_user_high_bidder: bool,
    pub has_user_bid: bool,
    /// The viewer already has a sealed bid on this listing
    pub show_duplicate_bid_warning: bool,
}

/// Bidding view for one listing as seen by one viewer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum BiddingConfig {
    Public(PublicBidding),
    Hidden(HiddenBidding),
}

impl BiddingConfig {
    // == Factory ==
    /// Builds the view for `listing` as seen by `viewer_id`.
    ///
    /// The minimum bid is always the floor derived from the asking price,
    /// even when a higher bid is already standing on a public listing.
    pub fn for_listing(
        listing: &ListingSnapshot,
        viewer_id: Option<&str>,
        bids: &[BidRecord],
    ) -> Self {
        let has_user_bid = viewer_id.is_some_and(|viewer| {
            bids.iter()
                .any(|b| b.item_id == listing.id && b.bidder_id == viewer)
        });
        let min_bid = minimum_allowed_bid(listing.ask_price);

        if listing.is_public_bid {
            let is_user_high_bidder = viewer_id.is_some()
                && listing.current_high_bidder_id.as_deref() == viewer_id;
            let step_base = listing.standing_high_bid().unwrap_or(listing.ask_price);

            BiddingConfig::Public(PublicBidding {
                item_id: listing.id.clone(),
                ask_price: listing.ask_price,
                min_bid,
                smart_step: smart_step(step_base),
                is_user_high_bidder,
                has_user_bid,
                current_high_bid: listing.current_high_bid,
                current_high_bidder_id: listing.current_high_bidder_id.clone(),
                show_outbid_warning: has_user_bid && !is_user_high_bidder,
            })
        } else {
            BiddingConfig::Hidden(HiddenBidding {
                item_id: listing.id.clone(),
                ask_price: listing.ask_price,
                min_bid,
                smart_step: smart_step(listing.ask_price),
                is_user_high_bidder: false,
                has_user_bid,
                show_duplicate_bid_warning: has_user_bid,
            })
        }
    }

    // == Accessors ==
    pub fn min_bid(&self) -> f64 {
        match self {
            BiddingConfig::Public(c) => c.min_bid,
            BiddingConfig::Hidden(c) => c.min_bid,
        }
    }

    pub fn smart_step(&self) -> f64 {
        match self {
            BiddingConfig::Public(c) => c.smart_step,
            BiddingConfig::Hidden(c) => c.smart_step,
        }
    }

    /// Whether the viewer currently holds the high bid. Always false for
    /// sealed auctions since the viewer cannot know.
    pub fn is_user_high_bidder(&self) -> bool {
        match self {
            BiddingConfig::Public(c) => c.is_user_high_bidder,
            BiddingConfig::Hidden(c) => c.is_user_high_bidder,
        }
    }
}
