use std::marker::PhantomData;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use super::{Collection, CollectionStore, StoreError, StoreResult};

/// Typed view over one collection
pub struct Repository<T> {
    store: Arc<dyn CollectionStore>,
    collection: Collection,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            collection: self.collection,
            _record: PhantomData,
        }
    }
}

impl<T> Repository<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn CollectionStore>, collection: Collection) -> Self {
        Self {
            store,
            collection,
            _record: PhantomData,
        }
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Load every record, or `None` if the collection was never written
    pub async fn load(&self) -> StoreResult<Option<Vec<T>>> {
        let Some(values) = self.store.get(self.collection).await? else {
            return Ok(None);
        };

        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                serde_json::from_value(value).map_err(|e| StoreError::Corrupt {
                    collection: self.collection.as_str(),
                    reason: format!("record {}: {}", index, e),
                })
            })
            .collect::<StoreResult<Vec<T>>>()
            .map(Some)
    }

    /// Load every record; a never-written collection is empty
    pub async fn load_all(&self) -> StoreResult<Vec<T>> {
        Ok(self.load().await?.unwrap_or_default())
    }

    /// Replace the collection with `records`
    pub async fn save_all(&self, records: &[T]) -> StoreResult<()> {
        let values = records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        self.store.put(self.collection, values).await
    }

    /// First record matching `predicate`
    pub async fn find<F>(&self, predicate: F) -> StoreResult<Option<T>>
    where
        F: Fn(&T) -> bool,
    {
        Ok(self.load_all().await?.into_iter().find(|record| predicate(record)))
    }
}
