/// Room model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE rooms (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     hotel_id UUID NOT NULL REFERENCES hotels(id) ON DELETE CASCADE,
///     name VARCHAR(255) NOT NULL,
///     capacity INTEGER NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A hotel room
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Room {
    /// Unique room ID (UUID v4)
    pub id: Uuid,

    /// Owning hotel
    pub hotel_id: Uuid,

    /// Room name or number
    pub name: String,

    /// Number of beds
    pub capacity: i32,

    /// When the room was created
    pub created_at: DateTime<Utc>,

    /// When the room was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoom {
    /// Owning hotel
    pub hotel_id: Uuid,

    /// Room name or number
    pub name: String,

    /// Number of beds
    pub capacity: i32,
}

impl Room {
    /// Creates a new room
    pub async fn create(pool: &PgPool, data: CreateRoom) -> Result<Self, sqlx::Error> {
        let room = sqlx::query_as::<_, Room>(
            r#"
            INSERT INTO rooms (hotel_id, name, capacity)
            VALUES ($1, $2, $3)
            RETURNING id, hotel_id, name, capacity, created_at, updated_at
            "#,
        )
        .bind(data.hotel_id)
        .bind(data.name)
        .bind(data.capacity)
        .fetch_one(pool)
        .await?;

        Ok(room)
    }

    /// Lists all rooms of a hotel, by name
    pub async fn list_by_hotel(pool: &PgPool, hotel_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let rooms = sqlx::query_as::<_, Room>(
            r#"
            SELECT id, hotel_id, name, capacity, created_at, updated_at
            FROM rooms
            WHERE hotel_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(hotel_id)
        .fetch_all(pool)
        .await?;

        Ok(rooms)
    }
}
