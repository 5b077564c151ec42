/// Integration tests for the Summit API
///
/// These tests verify the full system works end-to-end:
/// - Session authentication (missing/invalid/expired/revoked tokens)
/// - The eligibility gate on both hotel endpoints
/// - Hotel listing and detail payloads
/// - Registration and login flows
///
/// A running PostgreSQL database is required (DATABASE_URL). Each test skips
/// itself when the variable is not set.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Duration;
use common::TestContext;
use serde_json::Value;
use summit_shared::auth::jwt::{create_token, Claims};
use summit_shared::models::session::{CreateSession, Session};
use summit_shared::models::ticket::TicketStatus;
use tower::Service as _;
use uuid::Uuid;

/// Sends a GET request with an optional bearer token
async fn get(ctx: &TestContext, uri: &str, token: Option<&str>) -> axum::response::Response {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = builder.body(Body::empty()).unwrap();
    ctx.app.clone().call(request).await.unwrap()
}

/// Sends a POST request with a JSON body
async fn post_json(ctx: &TestContext, uri: &str, body: Value) -> axum::response::Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    ctx.app.clone().call(request).await.unwrap()
}

/// Reads a response body as JSON
async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let Some(ctx) = common::try_context().await else {
        return;
    };

    let response = get(&ctx, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["database"], "connected");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_list_hotels_requires_token() {
    let Some(ctx) = common::try_context().await else {
        return;
    };

    let response = get(&ctx, "/v1/hotels", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_list_hotels_rejects_invalid_token() {
    let Some(ctx) = common::try_context().await else {
        return;
    };

    let response = get(&ctx, "/v1/hotels", Some("not-a-valid-token")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_list_hotels_rejects_token_without_session() {
    let Some(ctx) = common::try_context().await else {
        return;
    };

    // Valid signature, but no session row backs it
    let claims = Claims::new(ctx.user.id);
    let orphan_token = create_token(&claims, common::TEST_JWT_SECRET).unwrap();

    let response = get(&ctx, "/v1/hotels", Some(&orphan_token)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_list_hotels_rejects_expired_token() {
    let Some(ctx) = common::try_context().await else {
        return;
    };

    // Expired an hour ago, and persisted as a session to prove the JWT check
    // alone rejects it
    let claims = Claims::with_expiration(ctx.user.id, Duration::seconds(-3600));
    let expired_token = create_token(&claims, common::TEST_JWT_SECRET).unwrap();
    Session::create(
        &ctx.db,
        CreateSession {
            user_id: ctx.user.id,
            token: expired_token.clone(),
        },
    )
    .await
    .unwrap();

    let response = get(&ctx, "/v1/hotels", Some(&expired_token)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_list_hotels_without_enrollment() {
    let Some(ctx) = common::try_context().await else {
        return;
    };

    let response = get(&ctx, "/v1/hotels", Some(&ctx.token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_list_hotels_without_ticket() {
    let Some(ctx) = common::try_context().await else {
        return;
    };

    common::create_enrollment(&ctx).await.unwrap();

    let response = get(&ctx, "/v1/hotels", Some(&ctx.token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_list_hotels_with_unpaid_ticket() {
    let Some(ctx) = common::try_context().await else {
        return;
    };

    let enrollment = common::create_enrollment(&ctx).await.unwrap();
    let ticket_type = common::create_ticket_type(&ctx, false, true).await.unwrap();
    common::create_ticket(&ctx, enrollment.id, ticket_type.id, TicketStatus::Reserved)
        .await
        .unwrap();

    let response = get(&ctx, "/v1/hotels", Some(&ctx.token)).await;
    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);

    let json = body_json(response).await;
    assert_eq!(json["error"], "payment_required");
    assert_eq!(json["message"], "Ticket not paid");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_list_hotels_with_remote_ticket() {
    let Some(ctx) = common::try_context().await else {
        return;
    };

    let enrollment = common::create_enrollment(&ctx).await.unwrap();
    let ticket_type = common::create_ticket_type(&ctx, true, false).await.unwrap();
    let ticket = common::create_ticket(&ctx, enrollment.id, ticket_type.id, TicketStatus::Paid)
        .await
        .unwrap();
    common::create_payment(&ctx, ticket.id, ticket_type.price)
        .await
        .unwrap();

    let response = get(&ctx, "/v1/hotels", Some(&ctx.token)).await;
    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);

    let json = body_json(response).await;
    assert_eq!(json["message"], "The ticket is remote");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_list_hotels_with_ticket_without_hotel() {
    let Some(ctx) = common::try_context().await else {
        return;
    };

    let enrollment = common::create_enrollment(&ctx).await.unwrap();
    let ticket_type = common::create_ticket_type(&ctx, false, false).await.unwrap();
    let ticket = common::create_ticket(&ctx, enrollment.id, ticket_type.id, TicketStatus::Paid)
        .await
        .unwrap();
    common::create_payment(&ctx, ticket.id, ticket_type.price)
        .await
        .unwrap();

    let response = get(&ctx, "/v1/hotels", Some(&ctx.token)).await;
    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Hotel not included");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_list_hotels_success() {
    let Some(ctx) = common::try_context().await else {
        return;
    };

    common::make_user_eligible(&ctx).await.unwrap();
    let hotel = common::create_hotel(&ctx, "Copacabana Palace").await.unwrap();

    let response = get(&ctx, "/v1/hotels", Some(&ctx.token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let hotels = json.as_array().expect("response should be an array");
    let found = hotels
        .iter()
        .find(|h| h["id"] == Value::String(hotel.id.to_string()))
        .expect("created hotel should be listed");

    assert_eq!(found["name"], "Copacabana Palace");
    assert_eq!(found["image"], hotel.image);
    // Listing does not embed rooms
    assert!(found.get("rooms").is_none());

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_get_hotel_rejects_malformed_id() {
    let Some(ctx) = common::try_context().await else {
        return;
    };

    common::make_user_eligible(&ctx).await.unwrap();

    let response = get(&ctx, "/v1/hotels/not-a-uuid", Some(&ctx.token)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_get_hotel_requires_token() {
    let Some(ctx) = common::try_context().await else {
        return;
    };

    let uri = format!("/v1/hotels/{}", Uuid::new_v4());
    let response = get(&ctx, &uri, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_get_hotel_without_enrollment() {
    let Some(ctx) = common::try_context().await else {
        return;
    };

    let uri = format!("/v1/hotels/{}", Uuid::new_v4());
    let response = get(&ctx, &uri, Some(&ctx.token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_get_hotel_gate_runs_before_lookup() {
    let Some(ctx) = common::try_context().await else {
        return;
    };

    // Unpaid ticket: probing an unknown hotel id must report the gate's 402,
    // not the lookup's 404
    let enrollment = common::create_enrollment(&ctx).await.unwrap();
    let ticket_type = common::create_ticket_type(&ctx, false, true).await.unwrap();
    common::create_ticket(&ctx, enrollment.id, ticket_type.id, TicketStatus::Reserved)
        .await
        .unwrap();

    let uri = format!("/v1/hotels/{}", Uuid::new_v4());
    let response = get(&ctx, &uri, Some(&ctx.token)).await;
    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_get_hotel_not_found() {
    let Some(ctx) = common::try_context().await else {
        return;
    };

    common::make_user_eligible(&ctx).await.unwrap();

    let uri = format!("/v1/hotels/{}", Uuid::new_v4());
    let response = get(&ctx, &uri, Some(&ctx.token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_get_hotel_with_rooms() {
    let Some(ctx) = common::try_context().await else {
        return;
    };

    common::make_user_eligible(&ctx).await.unwrap();
    let hotel = common::create_hotel(&ctx, "Copacabana Palace").await.unwrap();
    let room = common::create_room(&ctx, hotel.id).await.unwrap();

    let uri = format!("/v1/hotels/{}", hotel.id);
    let response = get(&ctx, &uri, Some(&ctx.token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], hotel.id.to_string());
    assert_eq!(json["name"], "Copacabana Palace");
    assert_eq!(json["image"], hotel.image);

    let rooms = json["rooms"].as_array().expect("rooms should be an array");
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["id"], room.id.to_string());
    assert_eq!(rooms[0]["name"], room.name);
    assert_eq!(rooms[0]["capacity"], room.capacity);
    assert_eq!(rooms[0]["hotel_id"], hotel.id.to_string());

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_register_issues_working_session() {
    let Some(ctx) = common::try_context().await else {
        return;
    };

    let email = format!("register-{}@example.com", Uuid::new_v4());
    let response = post_json(
        &ctx,
        "/v1/auth/register",
        serde_json::json!({
            "email": email,
            "password": "passw0rd-ok",
            "name": "New User"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let token = json["access_token"].as_str().expect("token in response");

    // The fresh token authenticates; the gate then 404s on missing enrollment
    let response = get(&ctx, "/v1/hotels", Some(token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(&email)
        .execute(&ctx.db)
        .await
        .unwrap();
    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let Some(ctx) = common::try_context().await else {
        return;
    };

    let body = serde_json::json!({
        "email": ctx.user.email,
        "password": "passw0rd-ok"
    });

    let response = post_json(&ctx, "/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_register_rejects_weak_password() {
    let Some(ctx) = common::try_context().await else {
        return;
    };

    // Long enough, but no digit
    let response = post_json(
        &ctx,
        "/v1/auth/register",
        serde_json::json!({
            "email": format!("weak-{}@example.com", Uuid::new_v4()),
            "password": "lettersonly"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_login_flow() {
    let Some(ctx) = common::try_context().await else {
        return;
    };

    let email = format!("login-{}@example.com", Uuid::new_v4());
    let response = post_json(
        &ctx,
        "/v1/auth/register",
        serde_json::json!({
            "email": email,
            "password": "passw0rd-ok"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Correct credentials
    let response = post_json(
        &ctx,
        "/v1/auth/login",
        serde_json::json!({
            "email": email,
            "password": "passw0rd-ok"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let token = json["access_token"].as_str().expect("token in response");

    let response = get(&ctx, "/v1/hotels", Some(token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Wrong password
    let response = post_json(
        &ctx,
        "/v1/auth/login",
        serde_json::json!({
            "email": email,
            "password": "wrong-passw0rd"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(&email)
        .execute(&ctx.db)
        .await
        .unwrap();
    ctx.cleanup().await.unwrap();
}
