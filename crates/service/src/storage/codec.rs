//! Encoding of the posts document.
//!
//! Decoding is fail-open: a document that cannot be parsed is treated as an
//! empty collection. That policy lives in [`decode_or_default`] and nowhere
//! else, so tightening it later only touches this file.

use models::post::Post;
use tracing::warn;

use crate::errors::ServiceError;

/// Reason a stored document was replaced by an empty collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeFallback {
    /// No document has been written yet.
    Missing,
    /// Bytes exist but are not a JSON array of posts.
    Corrupt(String),
}

/// Strict decode. `None` means the document does not exist.
pub fn decode_collection(bytes: Option<&[u8]>) -> Result<Vec<Post>, DecodeFallback> {
    let bytes = bytes.ok_or(DecodeFallback::Missing)?;
    serde_json::from_slice(bytes).map_err(|e| DecodeFallback::Corrupt(e.to_string()))
}

/// Decode, substituting an empty collection for missing or corrupt documents.
// NOTE: this masks real corruption; the next successful write overwrites it.
pub fn decode_or_default(bytes: Option<&[u8]>, location: &str) -> Vec<Post> {
    match decode_collection(bytes) {
        Ok(posts) => posts,
        Err(DecodeFallback::Missing) => Vec::new(),
        Err(DecodeFallback::Corrupt(error)) => {
            warn!(%location, %error, "posts document unreadable; treating as empty");
            Vec::new()
        }
    }
}

pub fn encode_collection(posts: &[Post]) -> Result<Vec<u8>, ServiceError> {
    serde_json::to_vec_pretty(posts).map_err(ServiceError::storage)
}
