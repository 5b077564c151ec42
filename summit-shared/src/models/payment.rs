/// Payment model and database operations
///
/// A payment row (1:1 with tickets) is what the eligibility gate treats as
/// proof that a ticket was paid.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE payments (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     ticket_id UUID NOT NULL UNIQUE REFERENCES tickets(id) ON DELETE CASCADE,
///     amount INTEGER NOT NULL,
///     card_issuer VARCHAR(64),
///     card_last_digits VARCHAR(4),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A confirmed ticket payment
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Payment {
    /// Unique payment ID (UUID v4)
    pub id: Uuid,

    /// Paid ticket (unique, 1:1)
    pub ticket_id: Uuid,

    /// Amount paid in cents
    pub amount: i32,

    /// Card issuer (e.g., "VISA")
    pub card_issuer: Option<String>,

    /// Last four digits of the card
    pub card_last_digits: Option<String>,

    /// When the payment was recorded
    pub created_at: DateTime<Utc>,

    /// When the payment was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for recording a new payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePayment {
    /// Paid ticket
    pub ticket_id: Uuid,

    /// Amount paid in cents
    pub amount: i32,

    /// Card issuer
    pub card_issuer: Option<String>,

    /// Last four digits of the card
    pub card_last_digits: Option<String>,
}

impl Payment {
    /// Records a new payment
    ///
    /// # Errors
    ///
    /// Returns an error if the ticket is already paid (unique constraint) or
    /// the database connection fails
    pub async fn create(pool: &PgPool, data: CreatePayment) -> Result<Self, sqlx::Error> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (ticket_id, amount, card_issuer, card_last_digits)
            VALUES ($1, $2, $3, $4)
            RETURNING id, ticket_id, amount, card_issuer, card_last_digits,
                      created_at, updated_at
            "#,
        )
        .bind(data.ticket_id)
        .bind(data.amount)
        .bind(data.card_issuer)
        .bind(data.card_last_digits)
        .fetch_one(pool)
        .await?;

        Ok(payment)
    }

    /// Finds the payment for a ticket
    pub async fn find_by_ticket_id(
        pool: &PgPool,
        ticket_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, ticket_id, amount, card_issuer, card_last_digits,
                   created_at, updated_at
            FROM payments
            WHERE ticket_id = $1
            "#,
        )
        .bind(ticket_id)
        .fetch_optional(pool)
        .await?;

        Ok(payment)
    }
}
