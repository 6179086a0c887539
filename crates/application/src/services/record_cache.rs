use dashmap::DashMap;
use spf_flattener_domain::DomainError;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordCacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Memoizes fetched SPF records for the lifetime of one run.
///
/// Keys are domain names exactly as looked up. Each key owns a `OnceCell`,
/// so concurrent fetches of the same uncached domain share one in-flight
/// lookup. Failed fetches leave the cell empty and the next caller queries
/// again; negative results are never stored.
#[derive(Default)]
pub struct SpfRecordCache {
    entries: DashMap<Arc<str>, Arc<OnceCell<Arc<str>>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl SpfRecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached record, running `fetch` only if none is stored yet.
    pub async fn get_or_fetch<F, Fut>(&self, domain: &str, fetch: F) -> Result<Arc<str>, DomainError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Arc<str>, DomainError>>,
    {
        let cell = self.slot(domain);

        if let Some(record) = cell.get() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::clone(record));
        }

        let mut fetched = false;
        let record = cell
            .get_or_try_init(|| {
                fetched = true;
                fetch()
            })
            .await?;

        if fetched {
            self.misses.fetch_add(1, Ordering::Relaxed);
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }

        Ok(Arc::clone(record))
    }

    pub fn get(&self, domain: &str) -> Option<Arc<str>> {
        self.entries
            .get(domain)
            .and_then(|cell| cell.get().map(Arc::clone))
    }

    /// Number of domains with a stored record.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.value().initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> RecordCacheStats {
        RecordCacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    fn slot(&self, domain: &str) -> Arc<OnceCell<Arc<str>>> {
        if let Some(cell) = self.entries.get(domain) {
            return Arc::clone(cell.value());
        }
        Arc::clone(
            self.entries
                .entry(Arc::from(domain))
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .value(),
        )
    }
}
