use crate::{Result, storage::KeyValueStore};
use std::sync::Arc;
use tracing::info;

/// Per-article view counts, kept in the store's counter keyspace.
#[derive(Clone)]
pub struct ViewCounter {
    store: Arc<KeyValueStore>,
}

impl ViewCounter {
    pub fn new(store: Arc<KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn increment(&self, article_id: &str) -> Result<u64> {
        let count = self.store.increment(article_id).await?;
        info!("Article {} viewed {} times", article_id, count);
        Ok(count.max(0) as u64)
    }

    pub async fn count(&self, article_id: &str) -> Result<u64> {
        let count = self.store.counter(article_id).await?;
        Ok(count.max(0) as u64)
    }
}
