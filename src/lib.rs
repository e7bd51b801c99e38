//! Boliyan Core - Bidding rules and response cache for the Boliyan marketplace
//!
//! Provides bid validation, smart stepping and price rounding, plus a
//! two-tier (memory + device storage) cache with TTL staleness.

pub mod api;
pub mod bidding;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{CacheOptions, TieredCache};
pub use config::Config;
