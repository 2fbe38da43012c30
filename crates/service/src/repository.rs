use async_trait::async_trait;
use models::user::User;

use crate::errors::ServiceError;

/// Trait abstraction for user storage.
/// Implementations can be file-backed, in-memory, or database-backed.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: u64) -> Option<User>;
    async fn create(&self, name: &str) -> Result<User, ServiceError>;
    async fn list(&self) -> Vec<User>;
}
