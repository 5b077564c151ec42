/// Access token creation and validation
///
/// Tokens are HS256-signed JWTs carrying the user id as subject. A token on
/// its own is not enough to authenticate: the API also requires a matching row
/// in the `sessions` table (see `auth::middleware`), which is why the default
/// lifetime can be generous.
///
/// # Example
///
/// ```
/// use summit_shared::auth::jwt::{create_token, validate_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
/// let token = create_token(&Claims::new(user_id), "a-32-byte-minimum-signing-secret!")?;
///
/// let claims = validate_token(&token, "a-32-byte-minimum-signing-secret!")?;
/// assert_eq!(claims.sub, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer claim pinned into every token
const ISSUER: &str = "summit";

/// Default token lifetime; revocation happens via the sessions table, not
/// through short expirations
pub const TOKEN_LIFETIME_DAYS: i64 = 7;

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Signing the token failed
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// The token is malformed or its signature does not verify
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// The token is past its expiration
    #[error("Token has expired")]
    Expired,

    /// The token was issued by someone else
    #[error("Invalid issuer: expected {expected}")]
    InvalidIssuer { expected: String },
}

/// Registered claims carried by every access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the authenticated user's id
    pub sub: Uuid,

    /// Issuer, pinned to "summit"
    pub iss: String,

    /// Issued-at, seconds since the epoch
    pub iat: i64,

    /// Expiration, seconds since the epoch
    pub exp: i64,

    /// Not-before, seconds since the epoch
    pub nbf: i64,
}

impl Claims {
    /// Builds claims for a user with the default lifetime
    pub fn new(user_id: Uuid) -> Self {
        Self::with_expiration(user_id, Duration::days(TOKEN_LIFETIME_DAYS))
    }

    /// Builds claims for a user expiring after `expires_in`
    pub fn with_expiration(user_id: Uuid, expires_in: Duration) -> Self {
        let issued_at = Utc::now();
        let expires_at = issued_at + expires_in;

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            nbf: issued_at.timestamp(),
        }
    }

    /// Whether the expiration claim lies in the past
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Signs claims into a token string
///
/// The secret must be kept out of the repository and should be at least
/// 32 bytes; `Config::from_env` enforces the length at startup.
///
/// # Errors
///
/// Returns `JwtError::CreateError` when encoding fails.
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| JwtError::CreateError(e.to_string()))
}

/// Checks a token's signature, expiry, not-before and issuer, returning its
/// claims
///
/// # Errors
///
/// Expired tokens map to `JwtError::Expired` and a foreign issuer to
/// `JwtError::InvalidIssuer`; every other rejection (bad signature, garbage
/// input) is a `JwtError::ValidationError`.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => JwtError::InvalidIssuer {
            expected: ISSUER.to_string(),
        },
        _ => JwtError::ValidationError(e.to_string()),
    })?;

    Ok(data.claims)
}
