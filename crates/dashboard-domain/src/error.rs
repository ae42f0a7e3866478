//! Domain-level errors

use thiserror::Error;

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors.
///
/// `Display` output is meant for direct human reading; views put it in a
/// toast as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Form input rejected before any request is sent
    #[error("{0}")]
    Validation(String),

    #[error("Invalid permission catalog: {0}")]
    Catalog(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Could not parse {what}: {detail}")]
    Parse { what: &'static str, detail: String },
}

impl DomainError {
    pub fn parse(what: &'static str, detail: impl ToString) -> Self {
        DomainError::Parse {
            what,
            detail: detail.to_string(),
        }
    }
}
