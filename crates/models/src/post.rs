use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

/// A single blog post as persisted in the posts document.
///
/// - `id` is assigned by the store and never supplied by callers
/// - `likes` defaults to 0 for records written before the counter existed
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub likes: u64,
}

impl Post {
    /// Build a fresh post from admitted input with a random id and zero likes.
    pub fn new(input: PostInput) -> Self {
        Self::with_id(new_post_id(), input)
    }

    pub fn with_id(id: String, input: PostInput) -> Self {
        Self {
            id,
            title: input.title,
            content: input.content,
            author: input.author,
            likes: 0,
        }
    }

    /// Overwrite the editable fields, leaving `id` and `likes` alone.
    pub fn apply(&mut self, input: PostInput) {
        self.title = input.title;
        self.content = input.content;
        self.author = input.author;
    }

    pub fn like(&mut self) {
        self.likes = self.likes.saturating_add(1);
    }
}

/// Editable fields of a post, as extracted from a form by the caller.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostInput {
    pub title: String,
    pub content: String,
    pub author: String,
}

impl PostInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>, author: impl Into<String>) -> Self {
        Self { title: title.into(), content: content.into(), author: author.into() }
    }

    /// Reject exactly-empty fields. Whitespace is not trimmed and passes.
    pub fn validate(&self) -> Result<(), ModelError> {
        for (name, value) in [("title", &self.title), ("content", &self.content), ("author", &self.author)] {
            if value.is_empty() {
                return Err(ModelError::Validation(format!("missing required field: {name}")));
            }
        }
        Ok(())
    }
}

/// Random 128-bit identifier. Counters would reuse ids once posts are deleted.
pub fn new_post_id() -> String {
    Uuid::new_v4().to_string()
}

// Counter-era documents stored ids as integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
