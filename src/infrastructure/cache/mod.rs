mod memory;
mod redis_tag_cache;

pub use memory::InMemoryTagCache;
pub use redis_tag_cache::RedisTagCache;
