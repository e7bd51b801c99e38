//! Request and Response models for the marketplace core API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{
    AdjustBidRequest, BiddingViewRequest, CacheKeyRequest, GetCacheQuery, SetCacheRequest,
    ValidateBidRequest,
};
pub use responses::{
    AdjustBidResponse, BidRulesResponse, CacheKeyResponse, ClearResponse, DeleteResponse,
    GetCacheResponse, HealthResponse, RoundPriceResponse, SetResponse, SmartStepResponse,
    StatsResponse, ValidateBidResponse,
};
