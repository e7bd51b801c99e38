//! API Handlers
//!
//! HTTP request handlers for each endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::bidding::{
    assess_bid, round_to_reasonable_price, smart_adjust, smart_step, BidRules, BiddingConfig,
};
use crate::cache::{
    generate_cache_key, FileStore, MemoryStore, PersistentStore, TieredCache,
};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::requests::check_price;
use crate::models::{
    AdjustBidRequest, AdjustBidResponse, BidRulesResponse, BiddingViewRequest, CacheKeyRequest,
    CacheKeyResponse, ClearResponse, DeleteResponse, GetCacheQuery, GetCacheResponse,
    HealthResponse, RoundPriceResponse, SetCacheRequest, SetResponse, SmartStepResponse,
    StatsResponse, ValidateBidRequest, ValidateBidResponse,
};

/// Application state shared across all handlers.
///
/// The cache is created once at startup and shared by reference count.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<TieredCache>,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: TieredCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Uses a file-backed persistent tier when a store path is configured,
    /// otherwise an in-memory one.
    pub fn from_config(config: &Config) -> Self {
        let store: Arc<dyn PersistentStore> = match &config.store_path {
            Some(path) => {
                info!("Persistent cache tier at {}", path.display());
                Arc::new(FileStore::new(path))
            }
            None => {
                info!("Persistent cache tier disabled, using in-memory store");
                Arc::new(MemoryStore::new())
            }
        };
        Self::new(TieredCache::new(store).with_default_ttl(config.default_ttl()))
    }
}

fn reject(error: Option<String>) -> Result<()> {
    match error {
        Some(msg) => Err(ApiError::InvalidRequest(msg)),
        None => Ok(()),
    }
}

// == Bidding ==

/// Handler for GET /bids/rules/:asked_price
pub async fn bid_rules_handler(Path(asked_price): Path<f64>) -> Result<Json<BidRulesResponse>> {
    reject(check_price("asked_price", asked_price))?;
    Ok(Json(BidRules::for_asked_price(asked_price).into()))
}

/// Handler for POST /bids/validate
pub async fn validate_bid_handler(
    Json(req): Json<ValidateBidRequest>,
) -> Result<Json<ValidateBidResponse>> {
    reject(req.validate())?;
    let assessment = assess_bid(req.asked_price, req.bid_amount);
    Ok(Json(ValidateBidResponse::new(
        req.asked_price,
        req.bid_amount,
        assessment,
    )))
}

/// Handler for GET /bids/step/:price
pub async fn smart_step_handler(Path(price): Path<f64>) -> Result<Json<SmartStepResponse>> {
    if !price.is_finite() || price < 0.0 {
        return Err(ApiError::InvalidRequest(
            "price must be a non-negative number".to_string(),
        ));
    }
    Ok(Json(SmartStepResponse {
        price,
        step: smart_step(price),
    }))
}

/// Handler for POST /bids/adjust
pub async fn adjust_bid_handler(
    Json(req): Json<AdjustBidRequest>,
) -> Result<Json<AdjustBidResponse>> {
    reject(req.validate())?;
    Ok(Json(AdjustBidResponse {
        amount: smart_adjust(req.current, req.direction),
        step: smart_step(req.current),
    }))
}

/// Handler for POST /bids/view
pub async fn bidding_view_handler(
    Json(req): Json<BiddingViewRequest>,
) -> Result<Json<BiddingConfig>> {
    reject(req.validate())?;
    Ok(Json(BiddingConfig::for_listing(
        &req.listing,
        req.viewer_id.as_deref(),
        &req.bids,
    )))
}

/// Handler for GET /prices/round/:amount
pub async fn round_price_handler(Path(amount): Path<f64>) -> Result<Json<RoundPriceResponse>> {
    if !amount.is_finite() {
        return Err(ApiError::InvalidRequest("amount must be a number".to_string()));
    }
    Ok(Json(RoundPriceResponse {
        amount,
        rounded: round_to_reasonable_price(amount),
    }))
}

// == Cache ==

/// Handler for POST /cache-key
pub async fn cache_key_handler(Json(req): Json<CacheKeyRequest>) -> Result<Json<CacheKeyResponse>> {
    reject(req.validate())?;
    Ok(Json(CacheKeyResponse {
        key: generate_cache_key(&req.namespace, &req.params),
    }))
}

/// Handler for PUT /cache
pub async fn set_cache_handler(
    State(state): State<AppState>,
    Json(req): Json<SetCacheRequest>,
) -> Result<Json<SetResponse>> {
    reject(req.validate())?;
    state.cache.set(&req.key, &req.data, &req.options()).await;
    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /cache/:key
///
/// A miss is a normal response with `data: null` and `from: "none"`.
pub async fn get_cache_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<GetCacheQuery>,
) -> Json<GetCacheResponse> {
    let lookup = state.cache.get::<Value>(&key, &query.options()).await;
    Json(GetCacheResponse::new(key, lookup))
}

/// Handler for DELETE /cache/:key
pub async fn remove_cache_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    state.cache.remove(&key).await;
    Json(DeleteResponse::new(key))
}

/// Handler for DELETE /cache
///
/// Clears both tiers; clients call this on logout.
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.cache.clear_all().await;
    Json(ClearResponse::cleared())
}

// == Service ==

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bidding::{BidAssessment, StepDirection};
    use crate::cache::CacheSource;
    use serde_json::json;

    fn test_state() -> AppState {
        AppState::new(TieredCache::new(Arc::new(MemoryStore::new())))
    }

    #[tokio::test]
    async fn test_bid_rules_handler() {
        let response = bid_rules_handler(Path(25_000.0)).await.unwrap();
        assert_eq!(response.rules.min_bid, 17_500.0);
        assert_eq!(response.rules.max_bid, 37_500.0);
    }

    #[tokio::test]
    async fn test_bid_rules_rejects_zero() {
        let result = bid_rules_handler(Path(0.0)).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_validate_bid_handler() {
        let req = ValidateBidRequest {
            asked_price: 25_000.0,
            bid_amount: 17_499.0,
        };
        let response = validate_bid_handler(Json(req)).await.unwrap();
        assert!(!response.valid);
        assert_eq!(response.assessment, BidAssessment::BelowMinimum);
    }

    #[tokio::test]
    async fn test_adjust_bid_handler() {
        let req = AdjustBidRequest {
            current: 9_900.0,
            direction: StepDirection::Up,
        };
        let response = adjust_bid_handler(Json(req)).await.unwrap();
        assert_eq!(response.amount, 10_000.0);
        assert_eq!(response.step, 100.0);
    }

    #[tokio::test]
    async fn test_set_and_get_cache_handler() {
        let state = test_state();

        let req = SetCacheRequest {
            key: "listing-1".to_string(),
            data: json!({"title": "Sofa"}),
            namespace: None,
            skip_memory: false,
        };
        set_cache_handler(State(state.clone()), Json(req)).await.unwrap();

        let response = get_cache_handler(
            State(state),
            Path("listing-1".to_string()),
            Query(GetCacheQuery::default()),
        )
        .await;
        assert_eq!(response.data, Some(json!({"title": "Sofa"})));
        assert_eq!(response.from, CacheSource::Memory);
    }

    #[tokio::test]
    async fn test_set_cache_rejects_empty_key() {
        let req = SetCacheRequest {
            key: String::new(),
            data: json!(1),
            namespace: None,
            skip_memory: false,
        };
        let result = set_cache_handler(State(test_state()), Json(req)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_clear_cache_handler() {
        let state = test_state();
        state.cache.set("k", &1u32, &Default::default()).await;

        clear_cache_handler(State(state.clone())).await;

        let response = stats_handler(State(state)).await;
        assert_eq!(response.stats.total_entries, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
