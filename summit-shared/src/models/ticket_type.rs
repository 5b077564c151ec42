/// Ticket type model and database operations
///
/// Ticket types are the catalog the eligibility gate reads its flags from:
/// `is_remote` tickets never include lodging, and only `includes_hotel` types
/// unlock the hotel endpoints.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE ticket_types (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     price INTEGER NOT NULL,
///     is_remote BOOLEAN NOT NULL DEFAULT FALSE,
///     includes_hotel BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A purchasable ticket type
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TicketType {
    /// Unique ticket type ID (UUID v4)
    pub id: Uuid,

    /// Display name (e.g., "In-person + hotel")
    pub name: String,

    /// Price in cents
    pub price: i32,

    /// Whether attendance is remote (remote tickets never include lodging)
    pub is_remote: bool,

    /// Whether the ticket includes hotel accommodation
    pub includes_hotel: bool,

    /// When the ticket type was created
    pub created_at: DateTime<Utc>,

    /// When the ticket type was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new ticket type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicketType {
    /// Display name
    pub name: String,

    /// Price in cents
    pub price: i32,

    /// Remote attendance flag
    pub is_remote: bool,

    /// Hotel inclusion flag
    pub includes_hotel: bool,
}

impl TicketType {
    /// Creates a new ticket type
    pub async fn create(pool: &PgPool, data: CreateTicketType) -> Result<Self, sqlx::Error> {
        let ticket_type = sqlx::query_as::<_, TicketType>(
            r#"
            INSERT INTO ticket_types (name, price, is_remote, includes_hotel)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, price, is_remote, includes_hotel, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.price)
        .bind(data.is_remote)
        .bind(data.includes_hotel)
        .fetch_one(pool)
        .await?;

        Ok(ticket_type)
    }
}
