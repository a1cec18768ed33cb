use async_trait::async_trait;
use dashmap::DashMap;

use crate::user::errors::CacheError;
use crate::user::ports::UserCache;

/// Process-local user cache backed by a concurrent map.
#[derive(Debug, Default)]
pub struct InMemoryUserCache {
    entries: DashMap<String, String>,
}

impl InMemoryUserCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl UserCache for InMemoryUserCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), CacheError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), CacheError> {
        self.entries.remove(key);
        Ok(())
    }

    async fn reset_all(&self) -> Result<(), CacheError> {
        self.entries.clear();
        Ok(())
    }
}
