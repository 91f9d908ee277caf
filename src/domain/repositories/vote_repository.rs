use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::vote::{Vote, VoteKind, VoteTally};

/// Repository trait for votes
///
/// The store holds at most one vote per (prompt, voter) pair; `record`
/// overwrites the kind when a row already exists.
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// The voter's current vote on a prompt, if any
    async fn find(&self, prompt_id: Uuid, user_id: &str) -> Result<Option<VoteKind>, String>;

    /// Insert or overwrite the voter's vote
    async fn record(&self, vote: &Vote) -> Result<(), String>;

    /// Remove the voter's vote
    async fn remove(&self, prompt_id: Uuid, user_id: &str) -> Result<(), String>;

    /// Aggregate up/down counts for a prompt
    async fn tally(&self, prompt_id: Uuid) -> Result<VoteTally, String>;
}
