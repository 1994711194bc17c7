// src/infrastructure/storage/resolver.rs
use crate::{application::ports::storage::BlobUrlResolver, domain::storage::StorageId};

/// Turns a storage id into the URL browsers load the blob from.
#[derive(Debug, Clone)]
pub struct PublicBlobUrlResolver {
    base: String,
}

impl PublicBlobUrlResolver {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }
}

impl BlobUrlResolver for PublicBlobUrlResolver {
    fn resolve(&self, id: &StorageId) -> String {
        format!("{}/{id}", self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_base_and_id() {
        let resolver = PublicBlobUrlResolver::new("https://cdn.test/storage/");
        let id = StorageId::new("kg2abc").unwrap();
        assert_eq!(resolver.resolve(&id), "https://cdn.test/storage/kg2abc");
    }
}
