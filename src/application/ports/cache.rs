// src/application/ports/cache.rs
use async_trait::async_trait;
use std::{fmt, time::Duration};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheTag(String);

impl CacheTag {
    pub const ARTICLE_LISTING: &'static str = "article-listing";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn article_listing() -> Self {
        Self::new(Self::ARTICLE_LISTING)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How long a populated entry stays fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheLife {
    Minutes,
    Hours,
    Days,
    Custom(Duration),
}

impl CacheLife {
    pub const fn max_age(self) -> Duration {
        match self {
            Self::Minutes => Duration::from_secs(60),
            Self::Hours => Duration::from_secs(60 * 60),
            Self::Days => Duration::from_secs(60 * 60 * 24),
            Self::Custom(duration) => duration,
        }
    }

    /// Accepts `minutes`, `hours`, `days` or a number of seconds such as `90s`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "minutes" => Some(Self::Minutes),
            "hours" => Some(Self::Hours),
            "days" => Some(Self::Days),
            other => other
                .strip_suffix('s')
                .and_then(|secs| secs.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(|secs| Self::Custom(Duration::from_secs(secs))),
        }
    }
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Backend(String),
}

/// Invalidation counter of a tag. Every `invalidate` moves it forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(pub u64);

impl Generation {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of a cache read. A miss carries the tag's generation as of the
/// read; hand it back to `populate` with the recomputed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    Hit(String),
    Miss(Generation),
}

/// Tag-keyed cache in front of read paths.
///
/// An entry is valid until its tag is invalidated or its max-age elapses,
/// whichever comes first. Each operation is atomic for its tag.
///
/// `populate` is conditional: it stores only if the tag has not been
/// invalidated since the miss that produced `seen`. A recompute that read the
/// store before a write committed can therefore never overwrite the
/// invalidation that write issued.
#[async_trait]
pub trait TagCache: Send + Sync {
    async fn get(&self, tag: &CacheTag) -> Result<CacheLookup, CacheError>;

    /// Returns `false` when the value was discarded as stale.
    async fn populate(
        &self,
        tag: &CacheTag,
        value: String,
        life: CacheLife,
        seen: Generation,
    ) -> Result<bool, CacheError>;

    async fn invalidate(&self, tag: &CacheTag) -> Result<(), CacheError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_and_custom_lives() {
        assert_eq!(CacheLife::parse("Hours"), Some(CacheLife::Hours));
        assert_eq!(CacheLife::parse("minutes"), Some(CacheLife::Minutes));
        assert_eq!(
            CacheLife::parse("90s"),
            Some(CacheLife::Custom(Duration::from_secs(90)))
        );
        assert_eq!(CacheLife::parse("0s"), None);
        assert_eq!(CacheLife::parse("weeks"), None);
    }

    #[test]
    fn named_lives_map_to_durations() {
        assert_eq!(CacheLife::Minutes.max_age(), Duration::from_secs(60));
        assert_eq!(CacheLife::Days.max_age(), Duration::from_secs(86_400));
    }

    #[test]
    fn generations_advance() {
        assert_eq!(Generation::default().next(), Generation(1));
        assert!(Generation(4) < Generation(4).next());
    }
}
