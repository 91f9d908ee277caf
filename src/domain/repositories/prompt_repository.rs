use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::prompt::Prompt;
use crate::domain::user::ProfileRecord;
use crate::domain::vote::VoteTally;

/// A prompt as read back for display. Bundles the aggregate with the derived
/// data every listing needs: its author's profile row (when one still
/// exists) and the vote/comment counts.
#[derive(Debug, Clone)]
pub struct PromptListing {
    pub prompt: Prompt,
    pub author: Option<ProfileRecord>,
    pub tally: VoteTally,
    pub comment_count: i64,
}

/// Read-side filters for prompt listings
#[derive(Debug, Clone, Default)]
pub struct PromptFilter {
    /// Exact category match
    pub category: Option<String>,
    /// Case-insensitive substring over title, description, and tags
    pub search: Option<String>,
    pub featured_only: bool,
    pub trending_only: bool,
}

impl PromptFilter {
    pub fn featured() -> Self {
        Self {
            featured_only: true,
            ..Self::default()
        }
    }

    pub fn trending() -> Self {
        Self {
            trending_only: true,
            ..Self::default()
        }
    }
}

/// Repository trait for the Prompt aggregate
///
/// Defines the contract for persisting and retrieving prompts.
/// Implementations handle store-specific details.
#[async_trait]
pub trait PromptRepository: Send + Sync {
    /// Save a prompt
    async fn save(&self, prompt: &Prompt) -> Result<(), String>;

    /// Find a prompt by its ID, with author and tallies
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PromptListing>, String>;

    /// List prompts matching a filter, newest first
    async fn list(&self, filter: &PromptFilter) -> Result<Vec<PromptListing>, String>;

    /// List all prompts created by one author, newest first
    async fn find_by_author(&self, author_id: &str) -> Result<Vec<PromptListing>, String>;

    /// Number of prompts filed under each category
    async fn count_by_category(&self) -> Result<Vec<(String, i64)>, String>;

    /// Delete a prompt and its dependent comments and votes
    async fn delete(&self, id: Uuid) -> Result<(), String>;
}
