//! Runtime wiring helpers
//!
//! Builds a file-backed [`PostStore`] from configuration so callers need not
//! depend on `common` or know about storage backends.

use configs::StorageConfig;
use tracing::info;

use crate::posts::PostStore;

/// Prepare the data directory and open the configured posts document.
pub async fn open_post_store(cfg: &StorageConfig) -> anyhow::Result<PostStore> {
    cfg.validate()?;
    common::env::ensure_data_dir(&cfg.posts_path).await?;
    info!(posts_path = %cfg.posts_path, "post store opened");
    Ok(PostStore::open(&cfg.posts_path))
}
