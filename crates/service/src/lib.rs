//! Service layer providing blog post persistence on top of models.
//! - Loads, mutates and saves the whole posts document per operation.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod posts;
pub mod runtime;
pub mod storage;

#[cfg(test)]
mod tests;
