use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{Collection, CollectionStore, StoreResult};

/// Process-local store used by tests and ephemeral runs
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn get(&self, collection: Collection) -> StoreResult<Option<Vec<Value>>> {
        Ok(self.collections.read().await.get(&collection).cloned())
    }

    async fn put(&self, collection: Collection, records: Vec<Value>) -> StoreResult<()> {
        self.collections.write().await.insert(collection, records);
        Ok(())
    }
}
