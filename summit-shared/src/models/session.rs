/// Session model and database operations
///
/// A session row is created at login and holds the exact bearer token that was
/// issued. The auth middleware only accepts a token while its session row
/// exists, so deleting the row revokes the token server-side regardless of the
/// JWT expiration.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE sessions (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     token TEXT NOT NULL UNIQUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// An active login session
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    /// Unique session ID (UUID v4)
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// The issued bearer token, verbatim
    pub token: String,

    /// When the session was created
    pub created_at: DateTime<Utc>,

    /// When the session was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSession {
    /// Owning user
    pub user_id: Uuid,

    /// The bearer token to persist
    pub token: String,
}

impl Session {
    /// Persists a new session for an issued token
    ///
    /// # Errors
    ///
    /// Returns an error if the token is already persisted or the database
    /// connection fails
    pub async fn create(pool: &PgPool, data: CreateSession) -> Result<Self, sqlx::Error> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (user_id, token)
            VALUES ($1, $2)
            RETURNING id, user_id, token, created_at, updated_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.token)
        .fetch_one(pool)
        .await?;

        Ok(session)
    }

    /// Finds a session by its bearer token
    ///
    /// # Returns
    ///
    /// The session if the token is still active, None otherwise
    pub async fn find_by_token(pool: &PgPool, token: &str) -> Result<Option<Self>, sqlx::Error> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, user_id, token, created_at, updated_at
            FROM sessions
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(pool)
        .await?;

        Ok(session)
    }
}
