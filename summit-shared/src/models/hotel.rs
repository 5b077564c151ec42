/// Hotel model and database operations
///
/// Hotels are read-only records from the API's point of view: the write path
/// exists for seeding and tests, the endpoints only list and fetch them.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE hotels (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     image VARCHAR(512) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use summit_shared::models::hotel::Hotel;
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, hotel_id: Uuid) -> Result<(), sqlx::Error> {
/// let all = Hotel::list(&pool).await?;
/// println!("{} hotels", all.len());
///
/// if let Some(hotel) = Hotel::find_with_rooms(&pool, hotel_id).await? {
///     println!("{} has {} rooms", hotel.hotel.name, hotel.rooms.len());
/// }
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::room::Room;

/// A hotel offered to eligible attendees
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Hotel {
    /// Unique hotel ID (UUID v4)
    pub id: Uuid,

    /// Hotel name
    pub name: String,

    /// Cover image URL
    pub image: String,

    /// When the hotel was created
    pub created_at: DateTime<Utc>,

    /// When the hotel was last updated
    pub updated_at: DateTime<Utc>,
}

/// A hotel with its rooms embedded, as returned by the detail endpoint
#[derive(Debug, Clone, Serialize)]
pub struct HotelWithRooms {
    /// The hotel record
    #[serde(flatten)]
    pub hotel: Hotel,

    /// All rooms of the hotel
    pub rooms: Vec<Room>,
}

/// Input for creating a new hotel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHotel {
    /// Hotel name
    pub name: String,

    /// Cover image URL
    pub image: String,
}

impl Hotel {
    /// Creates a new hotel
    pub async fn create(pool: &PgPool, data: CreateHotel) -> Result<Self, sqlx::Error> {
        let hotel = sqlx::query_as::<_, Hotel>(
            r#"
            INSERT INTO hotels (name, image)
            VALUES ($1, $2)
            RETURNING id, name, image, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.image)
        .fetch_one(pool)
        .await?;

        Ok(hotel)
    }

    /// Lists all hotels, oldest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let hotels = sqlx::query_as::<_, Hotel>(
            r#"
            SELECT id, name, image, created_at, updated_at
            FROM hotels
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(hotels)
    }

    /// Finds a hotel by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let hotel = sqlx::query_as::<_, Hotel>(
            r#"
            SELECT id, name, image, created_at, updated_at
            FROM hotels
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(hotel)
    }

    /// Finds a hotel by ID with all of its rooms embedded
    ///
    /// # Returns
    ///
    /// None if the hotel doesn't exist; a hotel with an empty `rooms` vector
    /// is a valid result
    pub async fn find_with_rooms(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<HotelWithRooms>, sqlx::Error> {
        let Some(hotel) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let rooms = Room::list_by_hotel(pool, hotel.id).await?;

        Ok(Some(HotelWithRooms { hotel, rooms }))
    }
}
