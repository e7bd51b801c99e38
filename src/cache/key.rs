//! Cache Key Module
//!
//! Builds deterministic cache keys from a namespace and request parameters.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Prefix shared by every key. Bumping the version invalidates all entries.
pub const CACHE_PREFIX: &str = "boliyan-cache-v1-";

// == Generate Key ==
/// Generates the cache key for `namespace` and `params`.
///
/// Parameters that are `null`, `None` or empty strings are dropped and the
/// rest are sorted by name, so `{a: 1, b: 2}` and `{b: 2, a: 1}` map to the
/// same key. Parameters that do not serialize to a JSON object are treated
/// as empty.
///
/// # Example
/// ```
/// use boliyan_core::cache::generate_cache_key;
/// use serde_json::json;
///
/// let key = generate_cache_key("listings", &json!({"page": 2, "category": "bikes"}));
/// assert_eq!(key, r#"boliyan-cache-v1-listings-{"category":"bikes","page":2}"#);
/// ```
pub fn generate_cache_key<P>(namespace: &str, params: &P) -> String
where
    P: Serialize + ?Sized,
{
    let canonical = match serde_json::to_value(params) {
        Ok(Value::Object(map)) => map
            .into_iter()
            .filter(|(_, value)| !is_blank(value))
            .collect::<BTreeMap<String, Value>>(),
        Ok(Value::Null) => BTreeMap::new(),
        Ok(other) => {
            warn!("Cache key params for '{}' are not an object: {}", namespace, other);
            BTreeMap::new()
        }
        Err(err) => {
            warn!("Failed to serialize cache key params for '{}': {}", namespace, err);
            BTreeMap::new()
        }
    };

    // A BTreeMap of JSON values always serializes
    let params_json = serde_json::to_string(&canonical).unwrap_or_else(|_| "{}".to_string());
    format!("{}{}-{}", CACHE_PREFIX, namespace, params_json)
}

/// Values left out of keys.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
