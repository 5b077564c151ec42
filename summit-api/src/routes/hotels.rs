/// Hotel endpoints
///
/// The two gated read operations. Both walk the eligibility chain
/// (enrollment → ticket → payment → ticket-type flags) before touching hotel
/// rows, so an ineligible user never learns what hotels exist.
///
/// # Endpoints
///
/// - `GET /v1/hotels` - List all hotels
/// - `GET /v1/hotels/:hotel_id` - One hotel with its rooms
///
/// # Status mapping
///
/// - `401` from the session middleware (missing/invalid/revoked token)
/// - `404` no enrollment, no ticket, or unknown hotel id
/// - `402` ticket unpaid, remote, or without hotel accommodation
/// - `400` malformed hotel id (path extractor rejection)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use summit_shared::{
    auth::middleware::AuthContext,
    eligibility,
    models::hotel::{Hotel, HotelWithRooms},
};
use uuid::Uuid;

/// List hotels handler
///
/// Runs the eligibility gate, then returns every hotel. An empty hotels table
/// is a valid `200` with an empty array.
pub async fn list_hotels(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Hotel>>> {
    eligibility::check_hotel_access(&state.db, auth.user_id).await?;

    let hotels = Hotel::list(&state.db).await?;

    Ok(Json(hotels))
}

/// Hotel detail handler
///
/// Runs the eligibility gate, then returns the hotel with its rooms embedded.
/// The gate runs first: an ineligible user gets the gate's status even for a
/// nonexistent hotel id.
pub async fn get_hotel(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(hotel_id): Path<Uuid>,
) -> ApiResult<Json<HotelWithRooms>> {
    eligibility::check_hotel_access(&state.db, auth.user_id).await?;

    let hotel = Hotel::find_with_rooms(&state.db, hotel_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Hotel not found".to_string()))?;

    Ok(Json(hotel))
}
