//! Storage abstractions for the service layer
//!
//! Raw document backends plus the codec that turns their bytes into posts.

pub mod backend;
pub mod codec;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
