use std::path::PathBuf;
use std::sync::Arc;

use models::user::{next_id, seed_users, NewUser, User};
use tracing::info;

use crate::errors::ServiceError;
use crate::repository::UserRepository;
use crate::storage::json_list_store::JsonListStore;

/// File-backed user collection.
/// The whole list lives in memory and is rewritten to disk on every create.
pub struct UserStore {
    store: JsonListStore<User>,
}

impl UserStore {
    /// Load users from `path`, writing the seed records first if the file is missing.
    pub async fn initialize<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonListStore::open(path, seed_users).await?;
        Ok(Arc::new(Self { store }))
    }

    pub async fn find_by_id(&self, id: u64) -> Option<User> {
        self.store.find(|u| u.id == id).await
    }

    /// Validate and trim `name`, assign the next id and persist.
    pub async fn create(&self, name: &str) -> Result<User, ServiceError> {
        let new_user = NewUser::parse(name)?;
        let created = self
            .store
            .append_with(move |users| Ok(new_user.into_user(next_id(users)?)))
            .await?;
        info!(user_id = created.id, path = %self.store.path().display(), "user created");
        Ok(created)
    }

    pub async fn list(&self) -> Vec<User> {
        self.store.snapshot().await
    }

    pub async fn len(&self) -> usize {
        self.store.len().await
    }

    pub async fn is_empty(&self) -> bool {
        self.store.is_empty().await
    }
}

#[async_trait::async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: u64) -> Option<User> { self.find_by_id(id).await }
    async fn create(&self, name: &str) -> Result<User, ServiceError> { self.create(name).await }
    async fn list(&self) -> Vec<User> { self.list().await }
}
