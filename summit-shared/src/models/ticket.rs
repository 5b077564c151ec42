/// Ticket model and database operations
///
/// A ticket ties an enrollment (1:1) to a ticket type. The eligibility gate
/// reads the ticket joined with its type flags via [`Ticket::find_by_enrollment_id`].
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tickets (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     enrollment_id UUID NOT NULL UNIQUE REFERENCES enrollments(id) ON DELETE CASCADE,
///     ticket_type_id UUID NOT NULL REFERENCES ticket_types(id),
///     status TEXT NOT NULL DEFAULT 'reserved',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT tickets_status_check CHECK (status IN ('reserved', 'paid'))
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Ticket lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    /// Reserved but not yet paid
    Reserved,

    /// Payment confirmed
    Paid,
}

impl TicketStatus {
    /// Converts status to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Reserved => "reserved",
            TicketStatus::Paid => "paid",
        }
    }

    /// Parses status from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "reserved" => Some(TicketStatus::Reserved),
            "paid" => Some(TicketStatus::Paid),
            _ => None,
        }
    }
}

/// A user's ticket
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Ticket {
    /// Unique ticket ID (UUID v4)
    pub id: Uuid,

    /// Owning enrollment (unique, 1:1)
    pub enrollment_id: Uuid,

    /// Purchased ticket type
    pub ticket_type_id: Uuid,

    /// Lifecycle status ("reserved" or "paid")
    pub status: String,

    /// When the ticket was created
    pub created_at: DateTime<Utc>,

    /// When the ticket was last updated
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Gets the parsed status enum
    pub fn get_status(&self) -> Option<TicketStatus> {
        TicketStatus::from_str(&self.status)
    }
}

/// A ticket joined with the type flags the eligibility gate needs
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TicketWithType {
    /// Unique ticket ID (UUID v4)
    pub id: Uuid,

    /// Owning enrollment
    pub enrollment_id: Uuid,

    /// Purchased ticket type
    pub ticket_type_id: Uuid,

    /// Lifecycle status ("reserved" or "paid")
    pub status: String,

    /// Ticket type price in cents
    pub price: i32,

    /// Whether the ticket type is remote
    pub is_remote: bool,

    /// Whether the ticket type includes hotel accommodation
    pub includes_hotel: bool,
}

/// Input for creating a new ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicket {
    /// Owning enrollment
    pub enrollment_id: Uuid,

    /// Purchased ticket type
    pub ticket_type_id: Uuid,

    /// Initial lifecycle status
    pub status: TicketStatus,
}

impl Ticket {
    /// Creates a new ticket
    ///
    /// # Errors
    ///
    /// Returns an error if the enrollment already holds a ticket (unique
    /// constraint) or the database connection fails
    pub async fn create(pool: &PgPool, data: CreateTicket) -> Result<Self, sqlx::Error> {
        let ticket = sqlx::query_as::<_, Ticket>(
            r#"
            INSERT INTO tickets (enrollment_id, ticket_type_id, status)
            VALUES ($1, $2, $3)
            RETURNING id, enrollment_id, ticket_type_id, status, created_at, updated_at
            "#,
        )
        .bind(data.enrollment_id)
        .bind(data.ticket_type_id)
        .bind(data.status.as_str())
        .fetch_one(pool)
        .await?;

        Ok(ticket)
    }

    /// Finds the ticket belonging to an enrollment, joined with its type flags
    pub async fn find_by_enrollment_id(
        pool: &PgPool,
        enrollment_id: Uuid,
    ) -> Result<Option<TicketWithType>, sqlx::Error> {
        let ticket = sqlx::query_as::<_, TicketWithType>(
            r#"
            SELECT t.id, t.enrollment_id, t.ticket_type_id, t.status,
                   tt.price, tt.is_remote, tt.includes_hotel
            FROM tickets t
            JOIN ticket_types tt ON tt.id = t.ticket_type_id
            WHERE t.enrollment_id = $1
            "#,
        )
        .bind(enrollment_id)
        .fetch_optional(pool)
        .await?;

        Ok(ticket)
    }
}
