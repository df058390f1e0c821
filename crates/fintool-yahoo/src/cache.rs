//! Request-result cache keyed by canonical request arguments
//!
//! Every tool invocation is keyed by a canonical serialization of its
//! resolved arguments; results from successful fetches are held for a fixed
//! freshness window so repeated identical requests within that window skip
//! the upstream call. Staleness is checked lazily on lookup and stale
//! entries stay in the map until the next `put` overwrites them.

use crate::error::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::RwLock;

/// Compute the canonical cache key for a resolved request
///
/// Keys are independent of argument ordering (objects serialize with sorted
/// keys) and of numeric spelling: a float with no fractional part
/// canonicalizes to its integer form, so `{"count": 5}` and
/// `{"count": 5.0}` address the same entry.
pub fn canonical_key(request: &Value) -> String {
    normalize(request).to_string()
}

/// Rewrite numeric values into their canonical form, recursively
///
/// Floats with no fractional part become integers so `5` and `5.0` read as
/// the same argument wherever they appear.
pub fn normalize(value: &Value) -> Value {
    match value {
        Value::Number(n) => {
            if n.is_f64() {
                if let Some(f) = n.as_f64() {
                    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                        return Value::from(f as i64);
                    }
                }
            }
            value.clone()
        }
        Value::Array(items) => Value::Array(items.iter().map(normalize).collect()),
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), normalize(v))).collect(),
        _ => value.clone(),
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    result: Value,
    stored_at: SystemTime,
}

/// Cache of fetch results for the lifetime of the tool instance
///
/// Entries are only ever written by successful fetches; fetch failures
/// leave the map untouched. Nothing is evicted on expiry, so memory grows
/// with the number of distinct request shapes seen by the instance.
#[derive(Clone)]
pub struct RequestCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    expiry: Duration,
}

impl RequestCache {
    /// Create an empty cache with the given freshness window
    pub fn new(expiry: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            expiry,
        }
    }

    /// The configured freshness window
    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    /// Look up a key at the given instant
    ///
    /// Returns the stored result iff an entry exists and is younger than
    /// the freshness window. Stale entries are reported as misses but left
    /// in place. A `now` earlier than the store time reads as age zero.
    pub async fn get(&self, key: &str, now: SystemTime) -> Option<Value> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        let age = now
            .duration_since(entry.stored_at)
            .unwrap_or(Duration::ZERO);
        (age < self.expiry).then(|| entry.result.clone())
    }

    /// Store a result for a key, replacing any previous entry
    pub async fn put(&self, key: String, result: Value, now: SystemTime) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key,
            CacheEntry {
                result,
                stored_at: now,
            },
        );
    }

    /// Serve a request from cache or delegate to the fetch function
    ///
    /// Canonicalizes the request, returns a fresh cached result when one
    /// exists, and otherwise invokes `fetch`, storing its outcome before
    /// returning it. Fetch errors propagate to the caller and are never
    /// cached.
    pub async fn fetch_or_get<F, Fut>(
        &self,
        request: &Value,
        now: SystemTime,
        fetch: F,
    ) -> Result<Value>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value>>,
    {
        let key = canonical_key(request);

        if let Some(result) = self.get(&key, now).await {
            tracing::debug!(%key, "cache hit");
            return Ok(result);
        }
        tracing::debug!(%key, "cache miss");

        let result = fetch().await?;
        self.put(key, result.clone(), now).await;
        Ok(result)
    }

    /// Whether an entry (fresh or stale) exists for a key
    pub async fn contains(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }

    /// Number of entries, fresh and stale
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Check if the cache is empty
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
