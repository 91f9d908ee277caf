use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::repositories::VoteRepository;
use crate::domain::vote::{Vote, VoteKind, VoteTally};

/// PostgreSQL implementation of VoteRepository
///
/// The `(prompt_id, user_id)` unique constraint makes `record` an upsert,
/// which is what keeps switch-votes a single statement.
pub struct PostgresVoteRepository {
    pool: PgPool,
}

impl PostgresVoteRepository {
    /// Creates a new PostgresVoteRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoteRepository for PostgresVoteRepository {
    async fn find(&self, prompt_id: Uuid, user_id: &str) -> Result<Option<VoteKind>, String> {
        let row = sqlx::query(
            r#"
            SELECT kind FROM votes
            WHERE prompt_id = $1 AND user_id = $2
            "#,
        )
        .bind(prompt_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| format!("Failed to find vote: {}", e))?;

        row.map(|r| {
            r.try_get::<String, _>("kind")
                .map_err(|e| format!("Invalid vote row: {}", e))
                .and_then(|kind| kind.parse::<VoteKind>().map_err(|e| e.to_string()))
        })
        .transpose()
    }

    async fn record(&self, vote: &Vote) -> Result<(), String> {
        sqlx::query(
            r#"
            INSERT INTO votes (prompt_id, user_id, kind, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (prompt_id, user_id) DO UPDATE SET
                kind = EXCLUDED.kind,
                created_at = EXCLUDED.created_at
            "#,
        )
        .bind(vote.prompt_id)
        .bind(&vote.user_id)
        .bind(vote.kind.as_str())
        .bind(vote.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to record vote: {}", e))?;

        Ok(())
    }

    async fn remove(&self, prompt_id: Uuid, user_id: &str) -> Result<(), String> {
        sqlx::query(
            r#"
            DELETE FROM votes
            WHERE prompt_id = $1 AND user_id = $2
            "#,
        )
        .bind(prompt_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to remove vote: {}", e))?;

        Ok(())
    }

    async fn tally(&self, prompt_id: Uuid) -> Result<VoteTally, String> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE kind = 'up') AS upvotes,
                COUNT(*) FILTER (WHERE kind = 'down') AS downvotes
            FROM votes
            WHERE prompt_id = $1
            "#,
        )
        .bind(prompt_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| format!("Failed to tally votes: {}", e))?;

        Ok(VoteTally {
            upvotes: row
                .try_get("upvotes")
                .map_err(|e| format!("Invalid tally row: {}", e))?,
            downvotes: row
                .try_get("downvotes")
                .map_err(|e| format!("Invalid tally row: {}", e))?,
        })
    }
}
