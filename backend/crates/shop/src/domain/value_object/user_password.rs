//! User Password Value Object
//!
//! Domain wrapper over `platform::password`. Policy violations become
//! user-facing 400s; hashing failures become internal errors.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input, zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate a password chosen at registration
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { min, .. } => AppError::bad_request(format!(
                "Password must be at least {} characters",
                min
            ))
            .with_action("Please choose a longer password"),

            PasswordPolicyError::TooLong { max, .. } => AppError::bad_request(format!(
                "Password must be at most {} characters",
                max
            )),

            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("All fields are required")
            }

            PasswordPolicyError::InvalidCharacter => {
                AppError::bad_request("Password contains invalid characters")
            }
        })?;

        Ok(Self(clear_text))
    }

    /// Wrap a login attempt; only the stored hash decides
    pub fn candidate(raw: String) -> Self {
        Self(ClearTextPassword::candidate(raw))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Argon2id hash of a user's password, never the clear text
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = raw.0.hash(pepper).map_err(|e| match e {
            PasswordHashError::HashingFailed(msg) => {
                AppError::internal(format!("Password hashing failed: {}", msg))
            }
            PasswordHashError::InvalidHashFormat => {
                AppError::internal("Unexpected error during password hashing")
            }
        })?;

        Ok(Self(hashed))
    }

    /// Load a PHC string read back from the database
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string)
            .map_err(|_| AppError::internal("Invalid password hash in database"))?;

        Ok(Self(hashed))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_password_is_bad_request() {
        let err = RawPassword::new("abc".to_string()).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Password must be at least 6 characters");
    }

    #[test]
    fn test_blank_password_reads_as_missing_field() {
        let err = RawPassword::new("   ".to_string()).unwrap_err();
        assert_eq!(err.message(), "All fields are required");
    }

    #[test]
    fn test_hash_is_never_plaintext() {
        let raw = RawPassword::new("secret1".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        assert_ne!(hashed.as_phc_string(), "secret1");
        assert!(hashed.verify(&RawPassword::candidate("secret1".to_string()), None));
        assert!(!hashed.verify(&RawPassword::candidate("secret2".to_string()), None));
    }

    #[test]
    fn test_from_phc_string() {
        let raw = RawPassword::new("secret1".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        let restored = UserPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert_eq!(restored, hashed);
        assert!(UserPassword::from_phc_string("plain").is_err());
    }
}
