use axum::{extract::State, Json};
use serde::Serialize;
use sqlx::PgPool;

use crate::api::errors::ApiError;
use crate::domain::prompt::BUILT_IN_CATEGORIES;
use crate::domain::repositories::PromptRepository;
use crate::infrastructure::repositories::PostgresPromptRepository;

/// One entry of the category catalog
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub prompt_count: i64,
}

/// List the built-in categories with live prompt counts
///
/// GET /api/categories
pub async fn list_categories(
    State(pool): State<PgPool>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let prompt_repo = PostgresPromptRepository::new(pool);
    let counts = prompt_repo
        .count_by_category()
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;

    let responses = BUILT_IN_CATEGORIES
        .iter()
        .map(|category| {
            let prompt_count = counts
                .iter()
                .find(|(name, _)| name.as_str() == category.name)
                .map(|(_, count)| *count)
                .unwrap_or(0);

            CategoryResponse {
                name: category.name,
                icon: category.icon,
                description: category.description,
                prompt_count,
            }
        })
        .collect();

    Ok(Json(responses))
}
