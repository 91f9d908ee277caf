use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::comment::Comment;
use crate::domain::repositories::{CommentRepository, CommentWithAuthor};
use crate::domain::user::ProfileRecord;

/// PostgreSQL implementation of CommentRepository
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    /// Creates a new PostgresCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn comment_from_row(row: &PgRow) -> Result<CommentWithAuthor, sqlx::Error> {
    let comment = Comment::from_persistence(
        row.try_get("id")?,
        row.try_get("prompt_id")?,
        row.try_get("user_id")?,
        row.try_get("body")?,
        row.try_get("created_at")?,
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

    Ok(CommentWithAuthor { comment, author })
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn save(&self, comment: &Comment) -> Result<(), String> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, prompt_id, user_id, body, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(comment.id())
        .bind(comment.prompt_id())
        .bind(comment.author_id())
        .bind(comment.body())
        .bind(comment.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to save comment: {}", e))?;

        Ok(())
    }

    async fn list_for_prompt(&self, prompt_id: Uuid) -> Result<Vec<CommentWithAuthor>, String> {
        let rows = sqlx::query(
            r#"
            SELECT
                c.id, c.prompt_id, c.user_id, c.body, c.created_at,
                a.id AS author_id, a.name AS author_name, a.email AS author_email,
                a.avatar_url AS author_avatar_url,
                a.password_hash AS author_password_hash,
                a.created_at AS author_created_at
            FROM comments c
            LEFT JOIN profiles a ON a.id = c.user_id
            WHERE c.prompt_id = $1
            ORDER BY c.created_at ASC
            "#,
        )
        .bind(prompt_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| format!("Failed to list comments: {}", e))?;

        rows.iter()
            .map(comment_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("Invalid comment row: {}", e))
    }
}
