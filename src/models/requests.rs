//! Request DTOs for the marketplace core API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::bidding::{BidRecord, ListingSnapshot, StepDirection};
use crate::cache::CacheOptions;

/// Returns an error message unless `value` is a finite, positive price.
pub fn check_price(name: &str, value: f64) -> Option<String> {
    if !value.is_finite() || value <= 0.0 {
        return Some(format!("{} must be a positive number", name));
    }
    None
}

/// Request body for POST /bids/validate
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateBidRequest {
    pub asked_price: f64,
    pub bid_amount: f64,
}

impl ValidateBidRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    /// The bid amount itself is not checked here; judging it is the point
    /// of the endpoint.
    pub fn validate(&self) -> Option<String> {
        check_price("asked_price", self.asked_price)
    }
}

/// Request body for POST /bids/adjust
#[derive(Debug, Clone, Deserialize)]
pub struct AdjustBidRequest {
    /// Amount currently in the bid field
    pub current: f64,
    pub direction: StepDirection,
}

impl AdjustBidRequest {
    pub fn validate(&self) -> Option<String> {
        if !self.current.is_finite() || self.current < 0.0 {
            return Some("current must be a non-negative number".to_string());
        }
        None
    }
}

/// Request body for POST /bids/view
#[derive(Debug, Clone, Deserialize)]
pub struct BiddingViewRequest {
    pub listing: ListingSnapshot,
    #[serde(default)]
    pub viewer_id: Option<String>,
    #[serde(default)]
    pub bids: Vec<BidRecord>,
}

impl BiddingViewRequest {
    pub fn validate(&self) -> Option<String> {
        if self.listing.id.is_empty() {
            return Some("listing.id cannot be empty".to_string());
        }
        check_price("listing.ask_price", self.listing.ask_price)
    }
}

/// Request body for POST /cache-key
#[derive(Debug, Clone, Deserialize)]
pub struct CacheKeyRequest {
    pub namespace: String,
    /// Request parameters; anything other than an object counts as empty
    #[serde(default)]
    pub params: Value,
}

impl CacheKeyRequest {
    pub fn validate(&self) -> Option<String> {
        if self.namespace.is_empty() {
            return Some("Namespace cannot be empty".to_string());
        }
        None
    }
}

/// Request body for PUT /cache
///
/// # Fields
/// - `key`: The cache key to store the payload under
/// - `data`: The payload to cache
/// - `skip_memory`: Write to the persistent tier only
#[derive(Debug, Clone, Deserialize)]
pub struct SetCacheRequest {
    pub key: String,
    pub data: Value,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub skip_memory: bool,
}

impl SetCacheRequest {
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        None
    }

    pub fn options(&self) -> CacheOptions {
        CacheOptions {
            ttl: None,
            namespace: self.namespace.clone(),
            skip_memory: self.skip_memory,
        }
    }
}

/// Query string for GET /cache/:key
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetCacheQuery {
    /// Freshness window in seconds
    #[serde(default)]
    pub ttl: Option<u64>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub skip_memory: bool,
}

impl GetCacheQuery {
    pub fn options(&self) -> CacheOptions {
        CacheOptions {
            ttl: self.ttl.map(Duration::from_secs),
            namespace: self.namespace.clone(),
            skip_memory: self.skip_memory,
        }
    }
}
