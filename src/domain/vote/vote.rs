use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};

/// Direction of a vote on a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteKind {
    Up,
    Down,
}

impl VoteKind {
    /// Stable string form used in the `votes.kind` column
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteKind::Up => "up",
            VoteKind::Down => "down",
        }
    }
}

impl FromStr for VoteKind {
    type Err = DomainError;

    fn from_str(value: &str) -> DomainResult<Self> {
        match value {
            "up" => Ok(VoteKind::Up),
            "down" => Ok(VoteKind::Down),
            other => Err(DomainError::UnknownVoteKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for VoteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One voter's vote on one prompt
///
/// At most one row exists per (prompt, voter) pair; casting again either
/// removes or switches it (see [`apply_vote`]).
#[derive(Debug, Clone)]
pub struct Vote {
    pub prompt_id: Uuid,
    pub user_id: String,
    pub kind: VoteKind,
    pub created_at: DateTime<Utc>,
}

impl Vote {
    pub fn new(prompt_id: Uuid, user_id: String, kind: VoteKind) -> Self {
        Self {
            prompt_id,
            user_id,
            kind,
            created_at: Utc::now(),
        }
    }
}

/// Aggregated vote counts for a prompt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VoteTally {
    pub upvotes: i64,
    pub downvotes: i64,
}

/// What casting a vote should do to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// No prior vote: record the requested kind
    Recorded(VoteKind),
    /// Prior vote of the same kind: remove it
    Removed,
    /// Prior vote of the other kind: replace it with the requested kind
    Switched(VoteKind),
}

/// Decides the effect of casting `requested` given the voter's current vote.
///
/// Voting is a toggle: a second vote in the same direction undoes the first,
/// and a vote in the opposite direction switches it.
///
/// # Example
/// ```
/// use promptverse_api::domain::vote::{apply_vote, VoteKind, VoteOutcome};
///
/// assert_eq!(apply_vote(None, VoteKind::Up), VoteOutcome::Recorded(VoteKind::Up));
/// assert_eq!(apply_vote(Some(VoteKind::Up), VoteKind::Up), VoteOutcome::Removed);
/// assert_eq!(
///     apply_vote(Some(VoteKind::Up), VoteKind::Down),
///     VoteOutcome::Switched(VoteKind::Down),
/// );
/// ```
pub fn apply_vote(existing: Option<VoteKind>, requested: VoteKind) -> VoteOutcome {
    match existing {
        None => VoteOutcome::Recorded(requested),
        Some(current) if current == requested => VoteOutcome::Removed,
        Some(_) => VoteOutcome::Switched(requested),
    }
}
