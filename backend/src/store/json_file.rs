use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tracing::debug;

use super::{Collection, CollectionStore, StoreError, StoreResult};

/// Durable store keeping each collection in `<data_dir>/<collection>.json`
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if needed) the data directory
    pub async fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    fn path_for(&self, collection: Collection) -> PathBuf {
        self.dir.join(format!("{}.json", collection.as_str()))
    }
}

#[async_trait]
impl CollectionStore for JsonFileStore {
    async fn get(&self, collection: Collection) -> StoreResult<Option<Vec<Value>>> {
        let bytes = match fs::read(self.path_for(collection)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let value: Value = serde_json::from_slice(&bytes)?;
        match value {
            Value::Array(records) => Ok(Some(records)),
            other => Err(StoreError::Corrupt {
                collection: collection.as_str(),
                reason: format!("expected a JSON array, found {}", json_kind(&other)),
            }),
        }
    }

    async fn put(&self, collection: Collection, records: Vec<Value>) -> StoreResult<()> {
        let path = self.path_for(collection);
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(&records)?;

        // Rename over the old file so readers never see a partial write
        fs::write(&tmp, &bytes).await?;
        fs::rename(&tmp, &path).await?;

        debug!(collection = %collection, records = records.len(), "collection written");
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
