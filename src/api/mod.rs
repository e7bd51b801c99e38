//! API Module
//!
//! HTTP handlers and routing for the marketplace core service.
//!
//! # Endpoints
//! - `GET /bids/rules/:asked_price` - Allowed bid range for an asking price
//! - `POST /bids/validate` - Check a bid amount
//! - `GET /bids/step/:price` - Smart increment step
//! - `POST /bids/adjust` - Apply one increment/decrement step
//! - `POST /bids/view` - Public/hidden bidding view for a listing
//! - `GET /prices/round/:amount` - Round to a reasonable price
//! - `POST /cache-key` - Build a canonical cache key
//! - `PUT /cache` - Cache a payload
//! - `GET /cache/:key` - Read a payload
//! - `DELETE /cache/:key` - Remove a payload
//! - `DELETE /cache` - Clear the whole cache (logout)
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
