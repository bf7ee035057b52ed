use std::sync::Arc;

use models::post::{new_post_id, Post, PostInput};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::errors::ServiceError;
use crate::posts::repository::PostRepository;
use crate::storage::backend::{FileBackend, StorageBackend};
use crate::storage::codec;

/// JSON-document-backed post store.
///
/// Every operation loads the whole collection, applies one change and writes
/// the whole collection back. Cycles through the same handle are serialized
/// by `cycle`; separate handles (or processes) sharing one document are not
/// coordinated and the last write wins.
#[derive(Clone)]
pub struct PostStore {
    backend: Arc<dyn StorageBackend>,
    cycle: Arc<Mutex<()>>,
}

impl PostStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend, cycle: Arc::new(Mutex::new(())) }
    }

    /// Store backed by a JSON file at `path`. The file is created on first write.
    pub fn open<P: Into<std::path::PathBuf>>(path: P) -> Self {
        Self::new(Arc::new(FileBackend::new(path)))
    }

    async fn load(&self) -> Result<Vec<Post>, ServiceError> {
        let location = self.backend.describe();
        let bytes = self.backend.read().await?;
        let posts = codec::decode_or_default(bytes.as_deref(), &location);
        debug!(%location, count = posts.len(), "posts loaded");
        Ok(posts)
    }

    async fn save(&self, posts: &[Post]) -> Result<(), ServiceError> {
        let data = codec::encode_collection(posts)?;
        self.backend.write(&data).await?;
        debug!(location = %self.backend.describe(), count = posts.len(), "posts saved");
        Ok(())
    }

    /// Run one load-mutate-save cycle under the handle's lock.
    async fn mutate<T, F>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut Vec<Post>) -> Result<T, ServiceError>,
    {
        let _guard = self.cycle.lock().await;
        let mut posts = self.load().await?;
        let out = f(&mut posts)?;
        self.save(&posts).await?;
        Ok(out)
    }

    /// All posts in insertion order. Missing or corrupt storage yields none.
    pub async fn list(&self) -> Result<Vec<Post>, ServiceError> {
        let _guard = self.cycle.lock().await;
        self.load().await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Post>, ServiceError> {
        Ok(self.list().await?.into_iter().find(|p| p.id == id))
    }

    /// Create a post. Any exactly-empty field is rejected and nothing is written.
    pub async fn add(&self, input: PostInput) -> Result<Post, ServiceError> {
        input.validate()?;
        let post = self
            .mutate(|posts| {
                let mut id = new_post_id();
                while posts.iter().any(|p| p.id == id) {
                    id = new_post_id();
                }
                let post = Post::with_id(id, input);
                posts.push(post.clone());
                Ok(post)
            })
            .await?;
        info!(post_id = %post.id, "post created");
        Ok(post)
    }

    /// Overwrite title/content/author of an existing post.
    /// Fields are not re-validated here; `id` and `likes` are kept.
    pub async fn update(&self, id: &str, input: PostInput) -> Result<Post, ServiceError> {
        // A miss must not write, so this cannot go through `mutate`.
        let _guard = self.cycle.lock().await;
        let mut posts = self.load().await?;
        let existing = posts.iter_mut().find(|p| p.id == id).ok_or_else(|| ServiceError::not_found("post"))?;
        existing.apply(input);
        let updated = existing.clone();
        self.save(&posts).await?;
        info!(post_id = %id, "post updated");
        Ok(updated)
    }

    /// Remove the post with `id`; returns whether one existed. A miss is not an error.
    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let removed = self
            .mutate(|posts| {
                let before = posts.len();
                posts.retain(|p| p.id != id);
                Ok(posts.len() != before)
            })
            .await?;
        info!(post_id = %id, removed, "post delete");
        Ok(removed)
    }

    /// Add one like to the first post with `id`. A miss is a successful no-op.
    pub async fn like(&self, id: &str) -> Result<Option<Post>, ServiceError> {
        let liked = self
            .mutate(|posts| {
                Ok(posts.iter_mut().find(|p| p.id == id).map(|p| {
                    p.like();
                    p.clone()
                }))
            })
            .await?;
        info!(post_id = %id, likes = liked.as_ref().map(|p| p.likes), "post like");
        Ok(liked)
    }
}

#[async_trait::async_trait]
impl PostRepository for PostStore {
    async fn list(&self) -> Result<Vec<Post>, ServiceError> { self.list().await }
    async fn get(&self, id: &str) -> Result<Option<Post>, ServiceError> { self.get(id).await }
    async fn add(&self, input: PostInput) -> Result<Post, ServiceError> { self.add(input).await }
    async fn update(&self, id: &str, input: PostInput) -> Result<Post, ServiceError> { self.update(id, input).await }
    async fn delete(&self, id: &str) -> Result<bool, ServiceError> { self.delete(id).await }
    async fn like(&self, id: &str) -> Result<Option<Post>, ServiceError> { self.like(id).await }
}
