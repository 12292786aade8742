//! Password hashing using bcrypt
//!
//! Provides salted one-way hashing and constant-time verification.
//!
//! # Performance Considerations
//!
//! bcrypt is intentionally CPU-intensive. Use the `_async` variants from
//! request handlers so the work lands on the blocking thread pool instead
//! of stalling the async runtime.

use anyhow::Result;

/// Work factor for bcrypt. Fixed at build time, never request-controlled.
const HASH_COST: u32 = 12;

/// Password hashing service
pub struct PasswordService;

impl PasswordService {
    /// Hash a password with a per-call random salt (blocking operation)
    ///
    /// Two calls with the same input produce different hashes; both verify
    /// against the same password. A hashing failure propagates rather than
    /// letting a credential pass through unhashed.
    pub fn hash(password: &str) -> Result<String> {
        let hashed = bcrypt::hash(password, HASH_COST)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
        Ok(hashed)
    }

    /// Hash a password asynchronously (non-blocking)
    ///
    /// Spawns the CPU-intensive work on the blocking thread pool.
    pub async fn hash_async(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a stored hash (blocking operation)
    ///
    /// Returns a plain bool and never explains a failure: a wrong password,
    /// an empty stored value, and an unparseable hash all come back `false`.
    pub fn verify(password: &str, stored_hash: &str) -> bool {
        bcrypt::verify(password, stored_hash).unwrap_or(false)
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: String, stored_hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &stored_hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "WeWork441$";
        let hash = PasswordService::hash(password).unwrap();

        // bcrypt output is a fixed-width modular crypt string
        assert_eq!(hash.len(), 60);
        assert!(PasswordService::verify(password, &hash));
        assert!(!PasswordService::verify("DifferentPass$", &hash));
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let password = "WeWork441$";
        let hash1 = PasswordService::hash(password).unwrap();
        let hash2 = PasswordService::hash(password).unwrap();

        // Hashes should be different due to random salt
        assert_ne!(hash1, hash2);

        // But both should verify correctly
        assert!(PasswordService::verify(password, &hash1));
        assert!(PasswordService::verify(password, &hash2));
    }

    #[test]
    fn test_verify_against_unparseable_hash_is_false() {
        assert!(!PasswordService::verify("WeWork441$", ""));
        assert!(!PasswordService::verify("WeWork441$", "not-a-bcrypt-hash"));
    }

    #[tokio::test]
    async fn test_async_hash_and_verify() {
        let password = "AsyncPass441$".to_string();
        let hash = PasswordService::hash_async(password.clone()).await.unwrap();

        assert!(PasswordService::verify_async(password, hash.clone())
            .await
            .unwrap());
        assert!(!PasswordService::verify_async("wrong".to_string(), hash)
            .await
            .unwrap());
    }
}
