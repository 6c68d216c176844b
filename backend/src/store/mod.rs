//! Collection store: the persistence port behind every service
//!
//! Storage is a key-value map from a collection name to the full list of its
//! records. Reads return the whole collection and writes replace it; there
//! are no partial updates at this layer. Services never touch the port
//! directly, they go through a typed [`Repository`].

mod json_file;
mod memory;
mod repository;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{error, info};

use crate::config::{StorageBackend, StorageConfig};

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use repository::Repository;

/// Named collections held by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Products,
    Categories,
    Suppliers,
    Customers,
    SalesOrders,
    PurchaseOrders,
    Settings,
    Users,
}

impl Collection {
    pub const ALL: [Collection; 8] = [
        Collection::Products,
        Collection::Categories,
        Collection::Suppliers,
        Collection::Customers,
        Collection::SalesOrders,
        Collection::PurchaseOrders,
        Collection::Settings,
        Collection::Users,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Products => "products",
            Collection::Categories => "categories",
            Collection::Suppliers => "suppliers",
            Collection::Customers => "customers",
            Collection::SalesOrders => "sales_orders",
            Collection::PurchaseOrders => "purchase_orders",
            Collection::Settings => "settings",
            Collection::Users => "users",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage adapter failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Collection {collection} is corrupt: {reason}")]
    Corrupt {
        collection: &'static str,
        reason: String,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Whole-collection persistence port
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Read a collection. `None` means it has never been written.
    async fn get(&self, collection: Collection) -> StoreResult<Option<Vec<Value>>>;

    /// Replace a collection with `records`
    async fn put(&self, collection: Collection, records: Vec<Value>) -> StoreResult<()>;
}

/// Proof that the caller holds the storage write lock
pub type WriteGuard<'a> = MutexGuard<'a, ()>;

/// Handle shared by all services: the store plus the single write lock that
/// serializes every mutating operation.
///
/// Ledger operations read products and orders, validate, then write several
/// collections. Holding the lock across those steps keeps concurrent requests
/// from interleaving stock adjustments.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn CollectionStore>,
    write_lock: Arc<Mutex<()>>,
}

impl Storage {
    pub fn new(backend: Arc<dyn CollectionStore>) -> Self {
        Self {
            backend,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Acquire the write lock. Not reentrant: code already holding a guard
    /// passes it down instead of locking again.
    pub async fn lock(&self) -> WriteGuard<'_> {
        self.write_lock.lock().await
    }

    pub fn repository<T>(&self, collection: Collection) -> Repository<T>
    where
        T: Serialize + DeserializeOwned,
    {
        Repository::new(self.backend.clone(), collection)
    }

    pub fn backend(&self) -> &Arc<dyn CollectionStore> {
        &self.backend
    }

    /// Copy `collections` as they are now, so a unit of work that writes
    /// several of them can put them back if a later write fails
    pub async fn snapshot(
        &self,
        _guard: &WriteGuard<'_>,
        collections: &[Collection],
    ) -> StoreResult<Snapshot> {
        let mut saved = Vec::with_capacity(collections.len());
        for &collection in collections {
            saved.push((collection, self.backend.get(collection).await?));
        }
        Ok(Snapshot {
            backend: self.backend.clone(),
            saved,
        })
    }
}

/// Collections captured by [`Storage::snapshot`]
pub struct Snapshot {
    backend: Arc<dyn CollectionStore>,
    saved: Vec<(Collection, Option<Vec<Value>>)>,
}

impl Snapshot {
    /// Write every captured collection back. A collection that had never
    /// been written comes back empty.
    pub async fn restore(self) {
        for (collection, records) in self.saved {
            if let Err(e) = self
                .backend
                .put(collection, records.unwrap_or_default())
                .await
            {
                error!(%collection, "failed to restore collection after a failed write: {}", e);
            }
        }
    }

    /// Pass `result` through, restoring first if it is an error
    pub async fn restore_on_error<T, E>(self, result: Result<T, E>) -> Result<T, E> {
        if result.is_err() {
            self.restore().await;
        }
        result
    }
}

/// Builds the store selected by configuration
pub struct StoreFactory;

impl StoreFactory {
    pub async fn create(config: &StorageConfig) -> StoreResult<Storage> {
        match config.backend {
            StorageBackend::Memory => {
                info!("Using in-memory storage; data is lost on shutdown");
                Ok(Storage::in_memory())
            }
            StorageBackend::File => {
                info!("Using JSON file storage at {:?}", config.data_dir);
                let store = JsonFileStore::open(&config.data_dir).await?;
                Ok(Storage::new(Arc::new(store)))
            }
        }
    }
}
