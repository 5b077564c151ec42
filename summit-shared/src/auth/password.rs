/// Password hashing with Argon2id
///
/// Hashes are stored in PHC string format, so the parameters and salt travel
/// with the hash and verification keeps working across parameter bumps. The
/// cost settings follow the current OWASP baseline: 19 MiB of memory, two
/// iterations, one lane.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};

/// Error type for hashing and verification
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Hashing the password failed
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Verification failed for a reason other than a wrong password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// The stored hash is not a parseable PHC string
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = ParamsBuilder::new()
        .m_cost(19456)
        .t_cost(2)
        .p_cost(1)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(e.to_string()))?;

    Ok(Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a plaintext password with a fresh random salt
///
/// # Errors
///
/// Returns `PasswordError::HashError` when hashing fails.
///
/// # Example
///
/// ```
/// use summit_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("hunter2hunter2")?;
/// assert!(verify_password("hunter2hunter2", &hash)?);
/// assert!(!verify_password("hunter3hunter3", &hash)?);
/// # Ok(())
/// # }
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verifies a plaintext password against a stored PHC hash
///
/// A wrong password is `Ok(false)`, not an error; the comparison is
/// constant-time.
///
/// # Errors
///
/// Returns `PasswordError::InvalidHash` when the stored hash cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(e.to_string())),
    }
}

/// Checks the minimum strength rules applied at registration: eight
/// characters, at least one letter and one digit
pub fn validate_password_strength(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    if !password.chars().any(|c| c.is_alphabetic()) {
        return Err("Password must contain at least one letter".to_string());
    }

    if !password.chars().any(|c| c.is_numeric()) {
        return Err("Password must contain at least one digit".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_argon2id_phc() {
        let hash = hash_password("correct horse battery").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("m=19456,t=2,p=1"));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let a = hash_password("repeatable input").unwrap();
        let b = hash_password("repeatable input").unwrap();

        // Fresh salt per hash
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_accepts_matching_password() {
        let hash = hash_password("open sesame 1").unwrap();
        assert!(verify_password("open sesame 1", &hash).unwrap());
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hash = hash_password("open sesame 1").unwrap();
        assert!(!verify_password("open sesame 2", &hash).unwrap());
    }

    #[test]
    fn test_verify_rejects_unparseable_hash() {
        assert!(matches!(
            verify_password("anything", "plainly-not-phc"),
            Err(PasswordError::InvalidHash(_))
        ));
    }

    #[test]
    fn test_strength_rules() {
        assert!(validate_password_strength("passw0rd").is_ok());
        assert!(validate_password_strength("l0ng and spaced out").is_ok());

        assert!(validate_password_strength("ab1").is_err());
        assert!(validate_password_strength("123456789").is_err());
        assert!(validate_password_strength("nodigitshere").is_err());
    }
}
