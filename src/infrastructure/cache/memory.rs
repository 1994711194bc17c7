// src/infrastructure/cache/memory.rs
use crate::application::ports::{
    cache::{CacheError, CacheLife, CacheLookup, CacheTag, Generation, TagCache},
    time::Clock,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Slot {
    generation: Generation,
    entry: Option<Entry>,
}

/// Process-local tag cache. Expired entries read as a miss and are dropped
/// on the next access. A tag's slot outlives its entry so the generation
/// keeps counting across invalidations.
pub struct InMemoryTagCache {
    slots: RwLock<HashMap<CacheTag, Slot>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryTagCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            clock,
        }
    }
}

#[async_trait]
impl TagCache for InMemoryTagCache {
    async fn get(&self, tag: &CacheTag) -> Result<CacheLookup, CacheError> {
        let now = self.clock.now();
        {
            let slots = self.slots.read().await;
            match slots.get(tag) {
                None => return Ok(CacheLookup::Miss(Generation::default())),
                Some(Slot {
                    entry: Some(entry), ..
                }) if entry.expires_at > now => return Ok(CacheLookup::Hit(entry.value.clone())),
                Some(Slot { entry: None, generation }) => {
                    return Ok(CacheLookup::Miss(*generation));
                }
                Some(_) => {}
            }
        }

        let mut slots = self.slots.write().await;
        let slot = slots.entry(tag.clone()).or_default();
        if slot.entry.as_ref().is_some_and(|entry| entry.expires_at <= now) {
            slot.entry = None;
        }
        Ok(match &slot.entry {
            Some(entry) => CacheLookup::Hit(entry.value.clone()),
            None => CacheLookup::Miss(slot.generation),
        })
    }

    async fn populate(
        &self,
        tag: &CacheTag,
        value: String,
        life: CacheLife,
        seen: Generation,
    ) -> Result<bool, CacheError> {
        let max_age = chrono::Duration::from_std(life.max_age())
            .map_err(|err| CacheError::Backend(err.to_string()))?;
        let expires_at = self.clock.now() + max_age;

        let mut slots = self.slots.write().await;
        let slot = slots.entry(tag.clone()).or_default();
        if slot.generation != seen {
            return Ok(false);
        }
        slot.entry = Some(Entry { value, expires_at });
        Ok(true)
    }

    async fn invalidate(&self, tag: &CacheTag) -> Result<(), CacheError> {
        let mut slots = self.slots.write().await;
        let slot = slots.entry(tag.clone()).or_default();
        slot.generation = slot.generation.next();
        slot.entry = None;
        Ok(())
    }
}
