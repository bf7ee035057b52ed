use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn storage(e: impl std::fmt::Display) -> Self { Self::Storage(e.to_string()) }

    /// HTTP status a web caller should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::Model(_) => 400,
            Self::NotFound(_) => 404,
            Self::Storage(_) => 500,
        }
    }
}
