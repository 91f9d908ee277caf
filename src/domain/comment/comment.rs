use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};

/// A comment left on a prompt
///
/// # Invariants
/// - Body is non-empty after trimming
#[derive(Debug, Clone)]
pub struct Comment {
    id: Uuid,
    prompt_id: Uuid,
    author_id: String,
    body: String,
    created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a new comment
    ///
    /// # Returns
    /// * `Ok(Comment)` - When the body is non-blank
    /// * `Err(DomainError::EmptyField)` - Otherwise
    pub fn new(prompt_id: Uuid, author_id: String, body: String) -> DomainResult<Self> {
        let body = body.trim().to_string();
        if body.is_empty() {
            return Err(DomainError::EmptyField { field: "Comment" });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            prompt_id,
            author_id,
            body,
            created_at: Utc::now(),
        })
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn prompt_id(&self) -> Uuid {
        self.prompt_id
    }

    pub fn author_id(&self) -> &str {
        &self.author_id
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Reconstructs a Comment from persistence layer data
    ///
    /// # Note
    /// Only to be used by repository implementations for data reconstruction.
    pub fn from_persistence(
        id: Uuid,
        prompt_id: Uuid,
        author_id: String,
        body: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            prompt_id,
            author_id,
            body,
            created_at,
        }
    }
}
