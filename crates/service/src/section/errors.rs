use thiserror::Error;

use models::errors::ModelError;

/// Business errors for section workflows.
///
/// Storage causes are coarsened to strings; what callers rely on is the
/// variant, in particular NotFound versus any other storage failure.
#[derive(Debug, Error)]
pub enum SectionError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("section not found")]
    NotFound,
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<ModelError> for SectionError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => SectionError::Validation(msg),
            ModelError::Db(msg) => SectionError::Storage(msg),
        }
    }
}
