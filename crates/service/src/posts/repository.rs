use async_trait::async_trait;
use models::post::{Post, PostInput};

use crate::errors::ServiceError;

/// Trait abstraction over post persistence, consumed by the web layer.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Post>, ServiceError>;
    async fn get(&self, id: &str) -> Result<Option<Post>, ServiceError>;
    async fn add(&self, input: PostInput) -> Result<Post, ServiceError>;
    async fn update(&self, id: &str, input: PostInput) -> Result<Post, ServiceError>;
    async fn delete(&self, id: &str) -> Result<bool, ServiceError>;
    async fn like(&self, id: &str) -> Result<Option<Post>, ServiceError>;
}
