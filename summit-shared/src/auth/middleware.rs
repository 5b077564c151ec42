/// Session authentication for Axum routers
///
/// A request is authenticated in two steps. The bearer token's signature and
/// expiry are checked first, then the raw token is looked up in the
/// `sessions` table. Both must pass: a perfectly valid JWT whose session row
/// has been deleted is rejected, which is how logout and server-side
/// revocation work.
///
/// Handlers behind the middleware read the result through Axum's `Extension`
/// extractor:
///
/// ```no_run
/// use axum::Extension;
/// use summit_shared::auth::middleware::AuthContext;
///
/// async fn gated(Extension(auth): Extension<AuthContext>) -> String {
///     auth.user_id.to_string()
/// }
/// ```

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::jwt::{validate_token, JwtError};
use crate::models::session::Session;

/// The authenticated identity injected into request extensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// The user the session belongs to
    pub user_id: Uuid,

    /// The session row backing the presented token
    pub session_id: Uuid,
}

impl AuthContext {
    /// Derives the context from a session row
    pub fn from_session(session: &Session) -> Self {
        Self {
            user_id: session.user_id,
            session_id: session.id,
        }
    }
}

/// Rejection reasons, each mapping to its own status code
#[derive(Debug)]
pub enum AuthError {
    /// No Authorization header on the request (401)
    MissingCredentials,

    /// The header is present but not a Bearer token (400)
    InvalidFormat(String),

    /// The JWT failed signature, expiry or issuer checks (401)
    InvalidToken(String),

    /// The token verifies but no session row backs it (401)
    SessionNotFound,

    /// The session lookup itself failed (500)
    DatabaseError(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingCredentials => {
                (StatusCode::UNAUTHORIZED, "Missing credentials").into_response()
            }
            AuthError::InvalidFormat(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AuthError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, msg).into_response(),
            AuthError::SessionNotFound => {
                (StatusCode::UNAUTHORIZED, "Session not found").into_response()
            }
            AuthError::DatabaseError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

/// Validates the bearer token, requires its session row, and injects
/// [`AuthContext`] before calling the inner service
pub async fn session_auth_middleware(
    pool: PgPool,
    secret: String,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = validate_token(token, &secret).map_err(|e| match e {
        JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
        JwtError::InvalidIssuer { .. } => AuthError::InvalidToken("Invalid issuer".to_string()),
        other => AuthError::InvalidToken(other.to_string()),
    })?;

    let session = Session::find_by_token(&pool, token)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?
        .ok_or(AuthError::SessionNotFound)?;

    // A session row issued to a different user than the token subject is as
    // invalid as no row at all
    if session.user_id != claims.sub {
        return Err(AuthError::InvalidToken(
            "Token subject does not match session".to_string(),
        ));
    }

    req.extensions_mut().insert(AuthContext::from_session(&session));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_context_mirrors_session_row() {
        let session = Session {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            token: "opaque".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let ctx = AuthContext::from_session(&session);

        assert_eq!(ctx.user_id, session.user_id);
        assert_eq!(ctx.session_id, session.id);
    }

    #[test]
    fn test_status_codes_per_rejection() {
        let cases = [
            (AuthError::MissingCredentials, StatusCode::UNAUTHORIZED),
            (
                AuthError::InvalidFormat("basic auth".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AuthError::InvalidToken("expired".to_string()),
                StatusCode::UNAUTHORIZED,
            ),
            (AuthError::SessionNotFound, StatusCode::UNAUTHORIZED),
            (
                AuthError::DatabaseError("pool gone".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
