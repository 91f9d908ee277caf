use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::comment::Comment;
use crate::domain::user::ProfileRecord;

/// A comment as read back for display, with its author's profile row when
/// one still exists.
#[derive(Debug, Clone)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author: Option<ProfileRecord>,
}

/// Repository trait for comments
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Save a comment
    async fn save(&self, comment: &Comment) -> Result<(), String>;

    /// List a prompt's comments, oldest first
    async fn list_for_prompt(&self, prompt_id: Uuid) -> Result<Vec<CommentWithAuthor>, String>;
}
