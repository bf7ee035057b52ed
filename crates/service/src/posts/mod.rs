//! Blog post persistence.

pub mod repository;
pub mod store;

pub use repository::PostRepository;
pub use store::PostStore;
