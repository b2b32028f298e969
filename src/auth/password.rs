use bcrypt::{hash, verify};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Failed to hash password")]
    HashingFailed,
    #[error("Failed to verify password")]
    VerificationFailed,
}

/// Hash a password with bcrypt at the given cost
pub fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    hash(password, cost).map_err(|_| PasswordError::HashingFailed)
}

/// Check a password against a stored bcrypt hash
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PasswordError> {
    verify(password, password_hash).map_err(|_| PasswordError::VerificationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcrypt::DEFAULT_COST;

    /// Lowest cost bcrypt accepts
    const TEST_COST: u32 = 4;

    #[test]
    fn test_password_hashing() {
        let password = "trail-shoes-42";
        let hashed = hash_password(password, TEST_COST).unwrap();

        assert_ne!(password, hashed);
        assert!(verify_password(password, &hashed).unwrap());
        assert!(!verify_password("wrong-password", &hashed).unwrap());
    }

    #[test]
    fn test_malformed_hash_fails_verification() {
        assert!(verify_password("anything", "not-a-bcrypt-hash").is_err());
    }

    #[test]
    fn test_invalid_cost_is_rejected() {
        assert!(hash_password("password", TEST_COST - 1).is_err());
        assert!(hash_password("password", TEST_COST).is_ok());
        assert!(DEFAULT_COST >= TEST_COST);
    }
}
