// src/infrastructure/cache/redis_tag_cache.rs
use crate::application::ports::cache::{
    CacheError, CacheLife, CacheLookup, CacheTag, Generation, TagCache,
};
use async_trait::async_trait;
use deadpool_redis::{Config as DeadpoolConfig, Connection, Pool, Runtime};
use redis::AsyncCommands;

const VALUE_PREFIX: &str = "cache:tag:";
const GENERATION_PREFIX: &str = "cache:gen:";

// KEYS[1] value, KEYS[2] generation; ARGV[1] seen generation, ARGV[2] value,
// ARGV[3] ttl seconds. A missing generation key counts as 0.
const POPULATE_IF_CURRENT: &str = r"
local current = redis.call('GET', KEYS[2]) or '0'
if current ~= ARGV[1] then
  return 0
end
redis.call('SET', KEYS[1], ARGV[2], 'EX', ARGV[3])
return 1
";

// KEYS[1] value, KEYS[2] generation.
const INVALIDATE: &str = r"
redis.call('INCR', KEYS[2])
redis.call('DEL', KEYS[1])
return 1
";

/// Tag cache shared by every instance through Redis. Each tag owns a value
/// key written with `SET .. EX` and a generation key that `INCR`s on every
/// invalidation. Both multi-key updates run as one `EVAL`, so a fill computed
/// before an invalidation is dropped instead of stored.
#[derive(Clone)]
pub struct RedisTagCache {
    pool: Pool,
}

impl RedisTagCache {
    /// Create a cache from a redis URL (e.g. redis://:password@host:6379/0)
    pub fn from_url(url: &str) -> Result<Self, CacheError> {
        let cfg = DeadpoolConfig::from_url(url);
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|err| CacheError::Backend(err.to_string()))?;

        Ok(Self { pool })
    }

    async fn connection(&self) -> Result<Connection, CacheError> {
        self.pool
            .get()
            .await
            .map_err(|err| CacheError::Backend(err.to_string()))
    }
}

fn value_key(tag: &CacheTag) -> String {
    format!("{VALUE_PREFIX}{tag}")
}

fn generation_key(tag: &CacheTag) -> String {
    format!("{GENERATION_PREFIX}{tag}")
}

fn backend(err: redis::RedisError) -> CacheError {
    CacheError::Backend(err.to_string())
}

#[async_trait]
impl TagCache for RedisTagCache {
    async fn get(&self, tag: &CacheTag) -> Result<CacheLookup, CacheError> {
        let mut conn = self.connection().await?;
        // One MGET so the value and generation are read at the same instant.
        let (value, generation): (Option<String>, Option<u64>) = conn
            .mget(vec![value_key(tag), generation_key(tag)])
            .await
            .map_err(backend)?;

        Ok(match value {
            Some(value) => CacheLookup::Hit(value),
            None => CacheLookup::Miss(Generation(generation.unwrap_or_default())),
        })
    }

    async fn populate(
        &self,
        tag: &CacheTag,
        value: String,
        life: CacheLife,
        seen: Generation,
    ) -> Result<bool, CacheError> {
        let mut conn = self.connection().await?;
        let seconds = life.max_age().as_secs().max(1);
        let stored: i32 = redis::cmd("EVAL")
            .arg(POPULATE_IF_CURRENT)
            .arg(2)
            .arg(value_key(tag))
            .arg(generation_key(tag))
            .arg(seen.0)
            .arg(value)
            .arg(seconds)
            .query_async(&mut conn)
            .await
            .map_err(backend)?;
        Ok(stored == 1)
    }

    async fn invalidate(&self, tag: &CacheTag) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        let _: i32 = redis::cmd("EVAL")
            .arg(INVALIDATE)
            .arg(2)
            .arg(value_key(tag))
            .arg(generation_key(tag))
            .query_async(&mut conn)
            .await
            .map_err(backend)?;
        Ok(())
    }
}
