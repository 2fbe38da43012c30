use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::RwLock};
use tracing::{error, info};

use crate::errors::ServiceError;

/// Generic JSON file-backed ordered list store.
///
/// Keeps a `Vec<T>` in memory and rewrites the whole file, pretty-printed,
/// after every mutation. Mutations hold the write lock across the file write
/// so concurrent appends are serialized.
pub struct JsonListStore<T> {
    inner: RwLock<Vec<T>>,
    file_path: PathBuf,
}

impl<T> JsonListStore<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// Open the store at `path`. When the file is missing it is first written
    /// with `seed()`. A file that exists but does not parse is an error.
    /// The parent directory must already exist.
    pub async fn open<P, F>(path: P, seed: F) -> Result<Self, ServiceError>
    where
        P: Into<PathBuf>,
        F: FnOnce() -> Vec<T>,
    {
        let file_path = path.into();
        let exists = fs::try_exists(&file_path)
            .await
            .map_err(|e| io_error("stat", &file_path, e))?;
        if !exists {
            let seeded = seed();
            write_pretty(&file_path, &seeded).await?;
            info!(path = %file_path.display(), records = seeded.len(), "data file missing; wrote seed records");
        }

        let items = read_items::<T>(&file_path).await?;
        info!(path = %file_path.display(), records = items.len(), "data file loaded");
        Ok(Self { inner: RwLock::new(items), file_path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Clone of the whole collection in insertion order.
    pub async fn snapshot(&self) -> Vec<T> {
        self.inner.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// First item matching `pred`.
    pub async fn find<F>(&self, pred: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        let items = self.inner.read().await;
        items.iter().find(|&item| pred(item)).cloned()
    }

    /// Build one new item from the current contents, append it to a fresh
    /// copy of the list, persist the copy, then swap it in.
    ///
    /// If `build` fails nothing changes. If the write fails the cache keeps
    /// its previous contents.
    pub async fn append_with<F>(&self, build: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&[T]) -> Result<T, ServiceError>,
    {
        let mut items = self.inner.write().await;
        let item = build(items.as_slice())?;

        let mut next = Vec::with_capacity(items.len() + 1);
        next.extend(items.iter().cloned());
        next.push(item.clone());

        write_pretty(&self.file_path, &next).await?;
        *items = next;
        Ok(item)
    }
}

async fn read_items<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ServiceError> {
    let bytes = fs::read(path).await.map_err(|e| io_error("read", path, e))?;
    serde_json::from_slice(&bytes).map_err(|e| {
        error!(path = %path.display(), error = %e, "data file is not a valid JSON array of records");
        ServiceError::Persistence(format!("malformed data file {}: {e}", path.display()))
    })
}

async fn write_pretty<T: Serialize>(path: &Path, items: &[T]) -> Result<(), ServiceError> {
    let data = serde_json::to_vec_pretty(items)
        .map_err(|e| ServiceError::Persistence(format!("serialize {}: {e}", path.display())))?;
    fs::write(path, data).await.map_err(|e| {
        error!(path = %path.display(), error = %e, "failed to write data file");
        io_error("write", path, e)
    })
}

fn io_error(op: &str, path: &Path, e: std::io::Error) -> ServiceError {
    ServiceError::Persistence(format!("{op} {}: {e}", path.display()))
}
