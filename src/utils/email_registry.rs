//! In-memory index of taken email addresses sitting in front of the
//! repository.
//!
//! The cuckoo filter answers "definitely free" without touching storage;
//! the TTL cache answers "definitely taken" for recently seen addresses.
//! Anything in between is decided by the repository.

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use autoscale_cuckoo_filter::CuckooFilter;
use moka::future::Cache;

/// Expected capacity and false-positive rate of the filter. It grows past
/// the capacity on its own.
const FILTER_CAPACITY: usize = 100_000;
const FALSE_POSITIVE_RATE: f64 = 0.001;

const CACHE_CAPACITY: u64 = 500_000;
const CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[inline]
fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

pub struct EmailRegistry {
    filter: RwLock<CuckooFilter<String>>,
    taken: Cache<String, bool>,
}

impl Default for EmailRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EmailRegistry {
    pub fn new() -> Self {
        Self {
            filter: RwLock::new(CuckooFilter::new(FILTER_CAPACITY, FALSE_POSITIVE_RATE)),
            taken: Cache::builder()
                .max_capacity(CACHE_CAPACITY)
                .time_to_live(CACHE_TTL)
                .build(),
        }
    }

    /// `false` means the address is certainly not registered.
    pub fn might_exist(&self, email: &str) -> bool {
        let email = normalize(email);
        self.filter
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&email)
    }

    /// `true` when the address was recently seen as taken.
    pub async fn is_taken(&self, email: &str) -> bool {
        self.taken.get(&normalize(email)).await.unwrap_or(false)
    }

    pub async fn mark_taken(&self, email: &str) {
        let email = normalize(email);
        self.filter
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .add(&email);
        self.taken.insert(email, true).await;
    }

    pub async fn release(&self, email: &str) {
        let email = normalize(email);
        self.filter
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&email);
        self.taken.invalidate(&email).await;
    }

    /// Drops a stale cache entry. The filter keeps its fingerprint, which
    /// only costs a storage lookup.
    pub async fn forget(&self, email: &str) {
        self.taken.invalidate(&normalize(email)).await;
    }

    /// Adds a batch of stored addresses to both structures.
    pub async fn mark_batch(&self, emails: &[String]) {
        let normalized: Vec<String> = emails.iter().map(|e| normalize(e)).collect();
        {
            let mut filter = self.filter.write().unwrap_or_else(PoisonError::into_inner);
            for email in &normalized {
                filter.add(email);
            }
        }

        let inserts: Vec<_> = normalized
            .into_iter()
            .map(|email| self.taken.insert(email, true))
            .collect();
        futures::future::join_all(inserts).await;
    }
}
