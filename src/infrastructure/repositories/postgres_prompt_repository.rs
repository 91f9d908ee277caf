use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::prompt::Prompt;
use crate::domain::repositories::{PromptFilter, PromptListing, PromptRepository};
use crate::domain::user::ProfileRecord;
use crate::domain::vote::VoteTally;

/// PostgreSQL implementation of PromptRepository
///
/// Listings join the author's profile row and derive vote tallies and
/// comment counts at read time; nothing denormalized lives on the prompt
/// row itself.
pub struct PostgresPromptRepository {
    pool: PgPool,
}

/// Shared SELECT for every listing-shaped read. Author columns are aliased
/// because the profile row is optional under the LEFT JOIN.
const LISTING_SELECT: &str = r#"
SELECT
    p.id, p.user_id, p.title, p.description, p.content, p.category,
    p.tags, p.usage_instructions, p.ai_models,
    p.is_featured, p.is_trending, p.created_at, p.updated_at,
    a.id AS author_id, a.name AS author_name, a.email AS author_email,
    a.avatar_url AS author_avatar_url, a.password_hash AS author_password_hash,
    a.created_at AS author_created_at,
    (SELECT COUNT(*) FROM votes v WHERE v.prompt_id = p.id AND v.kind = 'up') AS upvotes,
    (SELECT COUNT(*) FROM votes v WHERE v.prompt_id = p.id AND v.kind = 'down') AS downvotes,
    (SELECT COUNT(*) FROM comments c WHERE c.prompt_id = p.id) AS comment_count
FROM user_prompts p
LEFT JOIN profiles a ON a.id = p.user_id
"#;

impl PostgresPromptRepository {
    /// Creates a new PostgresPromptRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn listing_from_row(row: &PgRow) -> Result<PromptListing, sqlx::Error> {
    let prompt = Prompt::from_persistence(
        row.try_get("id")?,
        row.try_get("user_id")?,
        row.try_get("title")?,
        row.try_get("description")?,
        row.try_get("content")?,
        row.try_get("category")?,
        row.try_get("tags")?,
        row.try_get("usage_instructions")?,
        row.try_get("ai_models")?,
        row.try_get("is_featured")?,
        row.try_get("is_trending")?,
        row.try_get("created_at")?,
        row.try_get("updated_at")?,
    );

    let author = match row.try_get::<Option<String>, _>("author_id")? {
        Some(id) => Some(ProfileRecord {
            id,
            name: row.try_get("author_name")?,
            email: row.try_get("author_email")?,
            avatar_url: row.try_get("author_avatar_url")?,
            password_hash: row.try_get("author_password_hash")?,
            created_at: row.try_get("author_created_at")?,
        }),
        None => None,
    };

    Ok(PromptListing {
        prompt,
        author,
        tally: VoteTally {
            upvotes: row.try_get("upvotes")?,
            downvotes: row.try_get("downvotes")?,
        },
        comment_count: row.try_get("comment_count")?,
    })
}

#[async_trait]
impl PromptRepository for PostgresPromptRepository {
    async fn save(&self, prompt: &Prompt) -> Result<(), String> {
        sqlx::query(
            r#"
            INSERT INTO user_prompts (
                id, user_id, title, description, content, category,
                tags, usage_instructions, ai_models,
                is_featured, is_trending, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                content = EXCLUDED.content,
                category = EXCLUDED.category,
                tags = EXCLUDED.tags,
                usage_instructions = EXCLUDED.usage_instructions,
                ai_models = EXCLUDED.ai_models,
                is_featured = EXCLUDED.is_featured,
                is_trending = EXCLUDED.is_trending,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(prompt.id())
        .bind(prompt.author_id())
        .bind(prompt.title())
        .bind(prompt.description())
        .bind(prompt.content())
        .bind(prompt.category())
        .bind(prompt.tags())
        .bind(prompt.usage_instructions())
        .bind(prompt.ai_models())
        .bind(prompt.is_featured())
        .bind(prompt.is_trending())
        .bind(prompt.created_at())
        .bind(prompt.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to save prompt: {}", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PromptListing>, String> {
        let sql = format!("{} WHERE p.id = $1", LISTING_SELECT);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| format!("Failed to find prompt by id: {}", e))?;

        row.map(|r| listing_from_row(&r))
            .transpose()
            .map_err(|e| format!("Invalid prompt row: {}", e))
    }

    async fn list(&self, filter: &PromptFilter) -> Result<Vec<PromptListing>, String> {
        let sql = format!(
            r#"{}
            WHERE ($1::text IS NULL OR p.category = $1)
              AND ($2::text IS NULL
                   OR p.title ILIKE '%' || $2 || '%'
                   OR p.description ILIKE '%' || $2 || '%'
                   OR EXISTS (
                       SELECT 1 FROM unnest(p.tags) tag
                       WHERE tag ILIKE '%' || $2 || '%'
                   ))
              AND (NOT $3 OR p.is_featured)
              AND (NOT $4 OR p.is_trending)
            ORDER BY p.created_at DESC
            "#,
            LISTING_SELECT
        );

        let rows = sqlx::query(&sql)
            .bind(filter.category.as_deref())
            .bind(filter.search.as_deref())
            .bind(filter.featured_only)
            .bind(filter.trending_only)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| format!("Failed to list prompts: {}", e))?;

        rows.iter()
            .map(listing_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("Invalid prompt row: {}", e))
    }

    async fn find_by_author(&self, author_id: &str) -> Result<Vec<PromptListing>, String> {
        let sql = format!(
            "{} WHERE p.user_id = $1 ORDER BY p.created_at DESC",
            LISTING_SELECT
        );
        let rows = sqlx::query(&sql)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| format!("Failed to find prompts by author: {}", e))?;

        rows.iter()
            .map(listing_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("Invalid prompt row: {}", e))
    }

    async fn count_by_category(&self) -> Result<Vec<(String, i64)>, String> {
        let rows = sqlx::query(
            r#"
            SELECT category, COUNT(*) AS prompt_count
            FROM user_prompts
            GROUP BY category
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| format!("Failed to count prompts by category: {}", e))?;

        rows.iter()
            .map(|row| {
                Ok((
                    row.try_get::<String, _>("category")?,
                    row.try_get::<i64, _>("prompt_count")?,
                ))
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(|e| format!("Invalid category row: {}", e))
    }

    async fn delete(&self, id: Uuid) -> Result<(), String> {
        // Dependent comments and votes go with the prompt (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM user_prompts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| format!("Failed to delete prompt: {}", e))?;

        if result.rows_affected() == 0 {
            return Err(format!("Prompt not found: {}", id));
        }

        Ok(())
    }
}
