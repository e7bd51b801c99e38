//! Response DTOs for the marketplace core API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::bidding::{BidAssessment, BidRules};
use crate::cache::{CacheLookup, CacheSource, CacheStats};

/// Response body for GET /bids/rules/:asked_price
#[derive(Debug, Clone, Serialize)]
pub struct BidRulesResponse {
    #[serde(flatten)]
    pub rules: BidRules,
}

impl From<BidRules> for BidRulesResponse {
    fn from(rules: BidRules) -> Self {
        Self { rules }
    }
}

/// Response body for POST /bids/validate
#[derive(Debug, Clone, Serialize)]
pub struct ValidateBidResponse {
    pub asked_price: f64,
    pub bid_amount: f64,
    /// Whether the bid may be placed
    pub valid: bool,
    /// Detailed classification for inline styling
    pub assessment: BidAssessment,
}

impl ValidateBidResponse {
    pub fn new(asked_price: f64, bid_amount: f64, assessment: BidAssessment) -> Self {
        Self {
            asked_price,
            bid_amount,
            valid: assessment.is_valid(),
            assessment,
        }
    }
}

/// Response body for GET /bids/step/:price
#[derive(Debug, Clone, Serialize)]
pub struct SmartStepResponse {
    pub price: f64,
    pub step: f64,
}

/// Response body for POST /bids/adjust
#[derive(Debug, Clone, Serialize)]
pub struct AdjustBidResponse {
    /// Amount after the step was applied
    pub amount: f64,
    /// Step that was applied
    pub step: f64,
}

/// Response body for GET /prices/round/:amount
#[derive(Debug, Clone, Serialize)]
pub struct RoundPriceResponse {
    pub amount: f64,
    pub rounded: f64,
}

/// Response body for POST /cache-key
#[derive(Debug, Clone, Serialize)]
pub struct CacheKeyResponse {
    pub key: String,
}

/// Response body for GET /cache/:key
#[derive(Debug, Clone, Serialize)]
pub struct GetCacheResponse {
    /// The requested key
    pub key: String,
    /// Cached payload, `null` on a miss
    pub data: Option<Value>,
    pub is_stale: bool,
    pub from: CacheSource,
}

impl GetCacheResponse {
    pub fn new(key: impl Into<String>, lookup: CacheLookup<Value>) -> Self {
        Self {
            key: key.into(),
            data: lookup.data,
            is_stale: lookup.is_stale,
            from: lookup.from,
        }
    }
}

/// Response body for PUT /cache
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' cached", key),
            key,
        }
    }
}

/// Response body for DELETE /cache/:key
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was removed
    pub key: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' removed", key),
            key,
        }
    }
}

/// Response body for DELETE /cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
}

impl ClearResponse {
    pub fn cleared() -> Self {
        Self {
            message: "Cache cleared".to_string(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hit rate across both tiers
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        let hit_rate = stats.hit_rate();
        Self { stats, hit_rate }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
