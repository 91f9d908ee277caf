use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::repositories::ProfileRepository;
use crate::domain::user::{Email, ProfileRecord};

/// PostgreSQL implementation of ProfileRepository
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    /// Creates a new PostgresProfileRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn profile_from_row(row: &PgRow) -> Result<ProfileRecord, sqlx::Error> {
    Ok(ProfileRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        avatar_url: row.try_get("avatar_url")?,
        password_hash: row.try_get("password_hash")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn create(&self, profile: ProfileRecord) -> Result<String, String> {
        sqlx::query(
            r#"
            INSERT INTO profiles (id, name, email, avatar_url, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.name)
        .bind(&profile.email)
        .bind(&profile.avatar_url)
        .bind(&profile.password_hash)
        .bind(profile.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to create profile: {}", e))?;

        Ok(profile.id)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ProfileRecord>, String> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, avatar_url, password_hash, created_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| format!("Failed to find profile by id: {}", e))?;

        row.map(|r| profile_from_row(&r))
            .transpose()
            .map_err(|e| format!("Invalid profile row: {}", e))
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<ProfileRecord>, String> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, avatar_url, password_hash, created_at
            FROM profiles
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| format!("Failed to find profile by email: {}", e))?;

        row.map(|r| profile_from_row(&r))
            .transpose()
            .map_err(|e| format!("Invalid profile row: {}", e))
    }
}
