use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::prompts::AuthorResponse;
use crate::api::errors::ApiError;
use crate::api::middleware::JwtAuth;
use crate::domain::comment::Comment;
use crate::domain::repositories::{
    CommentRepository, CommentWithAuthor, ProfileRepository, PromptRepository,
};
use crate::infrastructure::repositories::{
    PostgresCommentRepository, PostgresProfileRepository, PostgresPromptRepository,
};

/// Request body for adding a comment
#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub body: String,
}

/// Response for a single comment
#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub prompt_id: Uuid,
    pub body: String,
    pub author: AuthorResponse,
    pub created_at: DateTime<Utc>,
}

impl From<&CommentWithAuthor> for CommentResponse {
    fn from(entry: &CommentWithAuthor) -> Self {
        Self {
            id: entry.comment.id(),
            prompt_id: entry.comment.prompt_id(),
            body: entry.comment.body().to_string(),
            author: AuthorResponse::resolve_from(entry.author.as_ref()),
            created_at: entry.comment.created_at(),
        }
    }
}

/// List a prompt's comments, oldest first
///
/// GET /api/prompts/:id/comments
pub async fn list_comments(
    State(pool): State<PgPool>,
    Path(prompt_id): Path<Uuid>,
) -> Result<Json<Vec<CommentResponse>>, ApiError> {
    ensure_prompt_exists(&pool, prompt_id).await?;

    let comment_repo = PostgresCommentRepository::new(pool);
    let comments = comment_repo
        .list_for_prompt(prompt_id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;

    Ok(Json(comments.iter().map(CommentResponse::from).collect()))
}

/// Add a comment to a prompt
///
/// POST /api/prompts/:id/comments
pub async fn add_comment(
    JwtAuth(user_id): JwtAuth,
    State(pool): State<PgPool>,
    Path(prompt_id): Path<Uuid>,
    Json(req): Json<AddCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    ensure_prompt_exists(&pool, prompt_id).await?;

    let comment = Comment::new(prompt_id, user_id.clone(), req.body)?;

    let comment_repo = PostgresCommentRepository::new(pool.clone());
    comment_repo
        .save(&comment)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Failed to save comment: {}", e)))?;

    // Fetch the commenter's profile so the response carries the same
    // resolved author a later listing would.
    let profile_repo = PostgresProfileRepository::new(pool);
    let author = profile_repo
        .find_by_id(&user_id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;

    let entry = CommentWithAuthor { comment, author };

    Ok((StatusCode::CREATED, Json(CommentResponse::from(&entry))))
}

async fn ensure_prompt_exists(pool: &PgPool, prompt_id: Uuid) -> Result<(), ApiError> {
    let prompt_repo = PostgresPromptRepository::new(pool.clone());
    prompt_repo
        .find_by_id(prompt_id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found(format!("Prompt not found: {}", prompt_id)))?;

    Ok(())
}
