//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;
use tracing::info;

/// Ensure the directory holding `posts_path` exists.
pub async fn ensure_data_dir(posts_path: &str) -> anyhow::Result<()> {
    let Some(dir) = Path::new(posts_path).parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    info!(data_dir = %dir.display(), "data directory ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_parent_of_posts_file() -> anyhow::Result<()> {
        let root = std::env::temp_dir().join(format!("ensure_data_dir_{}", uuid::Uuid::new_v4()));
        let posts = root.join("data").join("blog_posts.json");
        ensure_data_dir(&posts.to_string_lossy()).await?;
        assert!(root.join("data").is_dir());
        assert!(!posts.exists());
        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }

    #[tokio::test]
    async fn bare_file_name_needs_no_directory() -> anyhow::Result<()> {
        ensure_data_dir("blog_posts.json").await
    }
}
