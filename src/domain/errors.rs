use thiserror::Error;

/// Errors raised by domain-level validation
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Only the prompt author can delete it")]
    NotPromptAuthor,

    #[error("Unknown vote kind: {0} (expected 'up' or 'down')")]
    UnknownVoteKind(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
