use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::middleware::JwtAuth;
use crate::domain::display_name::resolve;
use crate::domain::prompt::Prompt;
use crate::domain::repositories::{PromptFilter, PromptListing, PromptRepository};
use crate::domain::user::ProfileRecord;
use crate::infrastructure::repositories::PostgresPromptRepository;

/// Request body for creating a prompt
#[derive(Debug, Deserialize)]
pub struct CreatePromptRequest {
    pub title: String,
    pub description: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub usage_instructions: Vec<String>,
    #[serde(default)]
    pub ai_models: Vec<String>,
}

/// Query parameters accepted by the prompt listing
#[derive(Debug, Deserialize)]
pub struct ListPromptsQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

/// Display-ready author block embedded in prompt and comment payloads
///
/// Always presentable: the raw profile row goes through display-name
/// resolution, so `name` is never empty and never a backend placeholder,
/// and `avatar_url` always points somewhere renderable.
#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    /// Profile id; absent when the author row no longer exists
    pub id: Option<String>,
    pub name: String,
    pub avatar_url: String,
    pub initials: String,
}

impl AuthorResponse {
    /// Resolves a possibly-missing profile row into a displayable author
    pub fn resolve_from(author: Option<&ProfileRecord>) -> Self {
        let raw = author.map(ProfileRecord::display_source);
        let resolved = resolve(raw.as_ref());

        Self {
            id: author.map(|a| a.id.clone()),
            name: resolved.name,
            avatar_url: resolved.avatar_url,
            initials: resolved.initials,
        }
    }
}

/// Response for a single prompt
#[derive(Debug, Serialize)]
pub struct PromptResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub usage_instructions: Vec<String>,
    pub ai_models: Vec<String>,
    pub is_featured: bool,
    pub is_trending: bool,
    pub upvotes: i64,
    pub downvotes: i64,
    pub comment_count: i64,
    pub author: AuthorResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&PromptListing> for PromptResponse {
    fn from(listing: &PromptListing) -> Self {
        let prompt = &listing.prompt;
        Self {
            id: prompt.id(),
            title: prompt.title().to_string(),
            description: prompt.description().to_string(),
            content: prompt.content().to_string(),
            category: prompt.category().to_string(),
            tags: prompt.tags().to_vec(),
            usage_instructions: prompt.usage_instructions().to_vec(),
            ai_models: prompt.ai_models().to_vec(),
            is_featured: prompt.is_featured(),
            is_trending: prompt.is_trending(),
            upvotes: listing.tally.upvotes,
            downvotes: listing.tally.downvotes,
            comment_count: listing.comment_count,
            author: AuthorResponse::resolve_from(listing.author.as_ref()),
            created_at: prompt.created_at(),
            updated_at: prompt.updated_at(),
        }
    }
}

/// Create a new prompt
///
/// POST /api/prompts
pub async fn create_prompt(
    JwtAuth(user_id): JwtAuth,
    State(pool): State<PgPool>,
    Json(req): Json<CreatePromptRequest>,
) -> Result<(StatusCode, Json<PromptResponse>), ApiError> {
    let (prompt, _events) = Prompt::new(
        user_id,
        req.title,
        req.description,
        req.content,
        req.category,
        req.tags,
        req.usage_instructions,
        req.ai_models,
    )?;

    let prompt_repo = PostgresPromptRepository::new(pool);
    prompt_repo
        .save(&prompt)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Failed to save prompt: {}", e)))?;

    // Read back through the listing path so the response carries the
    // resolved author exactly as later fetches will.
    let listing = prompt_repo
        .find_by_id(prompt.id())
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::internal_server_error("Saved prompt not found"))?;

    Ok((StatusCode::CREATED, Json(PromptResponse::from(&listing))))
}

/// List prompts, optionally filtered by category and search text
///
/// GET /api/prompts
pub async fn list_prompts(
    State(pool): State<PgPool>,
    Query(query): Query<ListPromptsQuery>,
) -> Result<Json<Vec<PromptResponse>>, ApiError> {
    let filter = PromptFilter {
        category: query.category,
        search: query.search,
        ..PromptFilter::default()
    };

    list_with_filter(pool, filter).await
}

/// List featured prompts
///
/// GET /api/prompts/featured
pub async fn featured_prompts(
    State(pool): State<PgPool>,
) -> Result<Json<Vec<PromptResponse>>, ApiError> {
    list_with_filter(pool, PromptFilter::featured()).await
}

/// List trending prompts
///
/// GET /api/prompts/trending
pub async fn trending_prompts(
    State(pool): State<PgPool>,
) -> Result<Json<Vec<PromptResponse>>, ApiError> {
    list_with_filter(pool, PromptFilter::trending()).await
}

async fn list_with_filter(
    pool: PgPool,
    filter: PromptFilter,
) -> Result<Json<Vec<PromptResponse>>, ApiError> {
    let prompt_repo = PostgresPromptRepository::new(pool);
    let listings = prompt_repo
        .list(&filter)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;

    Ok(Json(listings.iter().map(PromptResponse::from).collect()))
}

/// Get a prompt by ID
///
/// GET /api/prompts/:id
pub async fn get_prompt(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Json<PromptResponse>, ApiError> {
    let prompt_repo = PostgresPromptRepository::new(pool);
    let listing = prompt_repo
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found(format!("Prompt not found: {}", id)))?;

    Ok(Json(PromptResponse::from(&listing)))
}

/// Get all prompts created by one author
///
/// GET /api/prompts/user/:user_id
pub async fn prompts_by_author(
    State(pool): State<PgPool>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<PromptResponse>>, ApiError> {
    let prompt_repo = PostgresPromptRepository::new(pool);
    let listings = prompt_repo
        .find_by_author(&user_id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;

    Ok(Json(listings.iter().map(PromptResponse::from).collect()))
}

/// Delete a prompt (author only)
///
/// DELETE /api/prompts/:id
pub async fn delete_prompt(
    JwtAuth(user_id): JwtAuth,
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let prompt_repo = PostgresPromptRepository::new(pool);
    let listing = prompt_repo
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found(format!("Prompt not found: {}", id)))?;

    let _event = listing.prompt.delete_by(&user_id)?;

    prompt_repo
        .delete(id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Failed to delete prompt: {}", e)))?;

    Ok(StatusCode::NO_CONTENT)
}
