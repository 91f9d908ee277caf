use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::middleware::JwtAuth;
use crate::domain::repositories::{PromptRepository, VoteRepository};
use crate::domain::vote::{apply_vote, Vote, VoteKind, VoteOutcome};
use crate::infrastructure::repositories::{PostgresPromptRepository, PostgresVoteRepository};

/// Request body for casting a vote
#[derive(Debug, Deserialize)]
pub struct CastVoteRequest {
    pub kind: VoteKind,
}

/// Response after casting a vote
///
/// `vote` is the caller's vote after the toggle was applied, `null` when
/// the cast removed their previous vote.
#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub prompt_id: Uuid,
    pub vote: Option<VoteKind>,
    pub upvotes: i64,
    pub downvotes: i64,
}

/// Cast a vote on a prompt (toggle semantics)
///
/// POST /api/prompts/:id/votes
pub async fn cast_vote(
    JwtAuth(user_id): JwtAuth,
    State(pool): State<PgPool>,
    Path(prompt_id): Path<Uuid>,
    Json(req): Json<CastVoteRequest>,
) -> Result<Json<VoteResponse>, ApiError> {
    let prompt_repo = PostgresPromptRepository::new(pool.clone());
    prompt_repo
        .find_by_id(prompt_id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found(format!("Prompt not found: {}", prompt_id)))?;

    let vote_repo = PostgresVoteRepository::new(pool);

    let existing = vote_repo
        .find(prompt_id, &user_id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;

    let outcome = apply_vote(existing, req.kind);
    let vote = match outcome {
        VoteOutcome::Recorded(kind) | VoteOutcome::Switched(kind) => {
            vote_repo
                .record(&Vote::new(prompt_id, user_id.clone(), kind))
                .await
                .map_err(|e| {
                    ApiError::internal_server_error(format!("Failed to record vote: {}", e))
                })?;
            Some(kind)
        }
        VoteOutcome::Removed => {
            vote_repo.remove(prompt_id, &user_id).await.map_err(|e| {
                ApiError::internal_server_error(format!("Failed to remove vote: {}", e))
            })?;
            None
        }
    };

    let tally = vote_repo
        .tally(prompt_id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;

    Ok(Json(VoteResponse {
        prompt_id,
        vote,
        upvotes: tally.upvotes,
        downvotes: tally.downvotes,
    }))
}
