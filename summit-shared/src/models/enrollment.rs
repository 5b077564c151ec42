/// Enrollment model and database operations
///
/// An enrollment ties a user to the event (1:1) and is the entry point of the
/// hotel eligibility chain: no enrollment means no ticket, no payment, and no
/// hotel access.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE enrollments (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
///     name VARCHAR(255) NOT NULL,
///     document VARCHAR(32) NOT NULL,
///     birthday DATE,
///     phone VARCHAR(32),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A user's event enrollment
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Enrollment {
    /// Unique enrollment ID (UUID v4)
    pub id: Uuid,

    /// Enrolled user (unique, 1:1)
    pub user_id: Uuid,

    /// Attendee full name
    pub name: String,

    /// Identity document number
    pub document: String,

    /// Attendee birthday
    pub birthday: Option<NaiveDate>,

    /// Contact phone
    pub phone: Option<String>,

    /// When the enrollment was created
    pub created_at: DateTime<Utc>,

    /// When the enrollment was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new enrollment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEnrollment {
    /// Enrolling user
    pub user_id: Uuid,

    /// Attendee full name
    pub name: String,

    /// Identity document number
    pub document: String,

    /// Attendee birthday
    pub birthday: Option<NaiveDate>,

    /// Contact phone
    pub phone: Option<String>,
}

impl Enrollment {
    /// Creates a new enrollment
    ///
    /// # Errors
    ///
    /// Returns an error if the user already has an enrollment (unique
    /// constraint) or the database connection fails
    pub async fn create(pool: &PgPool, data: CreateEnrollment) -> Result<Self, sqlx::Error> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            INSERT INTO enrollments (user_id, name, document, birthday, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, name, document, birthday, phone, created_at, updated_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.name)
        .bind(data.document)
        .bind(data.birthday)
        .bind(data.phone)
        .fetch_one(pool)
        .await?;

        Ok(enrollment)
    }

    /// Finds the enrollment belonging to a user
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            SELECT id, user_id, name, document, birthday, phone, created_at, updated_at
            FROM enrollments
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(enrollment)
    }
}
