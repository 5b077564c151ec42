/// Registration and login
///
/// Both endpoints end the same way: an HS256 access token is issued and
/// persisted as a session row, and the gated routes accept that token only
/// while the row exists.
///
/// - `POST /v1/auth/register`: 409 on a duplicate email, 422 when validation
///   or the password strength rules fail.
/// - `POST /v1/auth/login`: 401 on unknown email or wrong password, with the
///   same message for both so the endpoint does not leak which emails exist.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use summit_shared::{
    auth::{jwt, password},
    models::{
        session::{CreateSession, Session},
        user::{CreateUser, User},
    },
};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Checked against the strength rules, then hashed with Argon2id
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Returned by both endpoints
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user_id: String,

    /// Bearer token, valid while its session row exists
    pub access_token: String,
}

/// Reshapes `validator` output into the 422 envelope
fn map_validation_errors(errors: validator::ValidationErrors) -> ApiError {
    let details: Vec<ValidationErrorDetail> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |e| ValidationErrorDetail {
                field: field.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Validation failed".to_string()),
            })
        })
        .collect();

    ApiError::ValidationError(details)
}

/// Issues a token for the user and backs it with a session row
async fn open_session(state: &AppState, user_id: Uuid) -> ApiResult<AuthResponse> {
    let claims = jwt::Claims::new(user_id);
    let access_token = jwt::create_token(&claims, state.jwt_secret())?;

    Session::create(
        &state.db,
        CreateSession {
            user_id,
            token: access_token.clone(),
        },
    )
    .await?;

    Ok(AuthResponse {
        user_id: user_id.to_string(),
        access_token,
    })
}

/// `POST /v1/auth/register`
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate().map_err(map_validation_errors)?;

    password::validate_password_strength(&req.password).map_err(|message| {
        ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "password".to_string(),
            message,
        }])
    })?;

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            password_hash,
            name: req.name,
        },
    )
    .await?;

    let response = open_session(&state, user.id).await?;
    Ok(Json(response))
}

/// `POST /v1/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate().map_err(map_validation_errors)?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    if !password::verify_password(&req.password, &user.password_hash)? {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let response = open_session(&state, user.id).await?;
    Ok(Json(response))
}
