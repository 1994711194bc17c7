// tests/support/mocks/cache.rs
use super::events::EventLog;
use async_trait::async_trait;
use quill_core::{
    application::ports::{
        cache::{CacheError, CacheLife, CacheLookup, CacheTag, Generation, TagCache},
        time::Clock,
    },
    infrastructure::cache::InMemoryTagCache,
};
use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

/// The real in-memory cache with switchable failures and call counters.
pub struct FlakyCache {
    inner: InMemoryTagCache,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub fail_invalidations: AtomicBool,
    hits: AtomicUsize,
    events: EventLog,
}

impl FlakyCache {
    pub fn new(clock: Arc<dyn Clock>, events: EventLog) -> Self {
        Self {
            inner: InMemoryTagCache::new(clock),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            fail_invalidations: AtomicBool::new(false),
            hits: AtomicUsize::new(0),
            events,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub async fn holds_listing(&self) -> bool {
        matches!(
            self.inner.get(&CacheTag::article_listing()).await.unwrap(),
            CacheLookup::Hit(_)
        )
    }
}

fn down() -> CacheError {
    CacheError::Backend("cache offline".into())
}

#[async_trait]
impl TagCache for FlakyCache {
    async fn get(&self, tag: &CacheTag) -> Result<CacheLookup, CacheError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(down());
        }
        let lookup = self.inner.get(tag).await?;
        if matches!(lookup, CacheLookup::Hit(_)) {
            self.hits.fetch_add(1, Ordering::SeqCst);
        }
        Ok(lookup)
    }

    async fn populate(
        &self,
        tag: &CacheTag,
        value: String,
        life: CacheLife,
        seen: Generation,
    ) -> Result<bool, CacheError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(down());
        }
        self.inner.populate(tag, value, life, seen).await
    }

    async fn invalidate(&self, tag: &CacheTag) -> Result<(), CacheError> {
        if self.fail_invalidations.load(Ordering::SeqCst) {
            return Err(down());
        }
        self.events.push("invalidate");
        self.inner.invalidate(tag).await
    }
}
