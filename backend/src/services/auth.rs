//! Authentication service
//!
//! Orchestrates the validator, hasher, and user store to implement the
//! register and login use cases. Stateless: collaborators arrive as
//! explicit parameters, never as globals.
//!
//! # Performance
//!
//! Password hashing and verification are offloaded to the blocking thread
//! pool; everything else on these paths is either pure or a pooled
//! database call.

use auth_service_shared::types::PublicUser;
use auth_service_shared::validation;

use crate::auth::PasswordService;
use crate::error::AppError;
use crate::repositories::{normalize_email, UserStore};

/// User-facing message for a rejected password.
///
/// The prose promises more than the rule enforces (see
/// `validation::is_strong_password`): the actual check is length, case,
/// and digit only. The wording is kept as-is because clients already
/// display it.
const WEAK_PASSWORD_MESSAGE: &str = "Password is not valid, must be at least 8 characters long, \
     must contain alpha numeric characters and at least one uppercase and lowercase character";

/// Authentication use cases
pub struct AuthService;

impl AuthService {
    /// Register a new user
    ///
    /// Checks run cheapest-first, and everything runs before the write:
    /// email format, then password strength, then the duplicate pre-check,
    /// then hash + insert. A concurrent duplicate that slips past the
    /// pre-check still comes back as a conflict from the store itself.
    pub async fn register(
        store: &dyn UserStore,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<PublicUser, AppError> {
        let email = normalize_email(email);

        if !validation::is_valid_email(&email) {
            return Err(AppError::validation("Invalid email format"));
        }

        if !validation::is_strong_password(password) {
            return Err(AppError::validation(WEAK_PASSWORD_MESSAGE));
        }

        if store.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict(
                "User with this email already exists".to_string(),
            ));
        }

        let password_hash = PasswordService::hash_async(password.to_string()).await?;

        let user = store.create(name, &email, &password_hash).await?;

        Ok(user.into_public())
    }

    /// Login with email and password
    ///
    /// An unknown email and a wrong password produce the same error, byte
    /// for byte; the response never reveals whether the account exists.
    pub async fn login(
        store: &dyn UserStore,
        email: &str,
        password: &str,
    ) -> Result<PublicUser, AppError> {
        let email = normalize_email(email);

        let Some(user) = store.find_by_email(&email).await? else {
            return Err(AppError::Authentication(
                "Invalid email or password".to_string(),
            ));
        };

        let valid =
            PasswordService::verify_async(password.to_string(), user.password_hash.clone())
                .await?;
        if !valid {
            return Err(AppError::Authentication(
                "Invalid email or password".to_string(),
            ));
        }

        Ok(user.into_public())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory::InMemoryUserStore;
    use crate::repositories::StoreError;

    #[tokio::test]
    async fn test_register_returns_public_user() {
        let store = InMemoryUserStore::new();

        let user = AuthService::register(&store, "Toby", "Toby@Mail.com", "WeWork441$")
            .await
            .unwrap();

        assert_eq!(user.name, "Toby");
        // Email is stored and returned normalized
        assert_eq!(user.email, "toby@mail.com");

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn test_register_hashes_before_storing() {
        let store = InMemoryUserStore::new();

        AuthService::register(&store, "Toby", "toby@mail.com", "WeWork441$")
            .await
            .unwrap();

        let stored = store
            .find_by_email("toby@mail.com")
            .await
            .unwrap()
            .unwrap();
        assert_ne!(stored.password_hash, "WeWork441$");
        assert!(PasswordService::verify("WeWork441$", &stored.password_hash));
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_email() {
        let store = InMemoryUserStore::new();

        let err = AuthService::register(&store, "Toby", "this.com", "WeWork441$")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "Invalid email format");
    }

    #[tokio::test]
    async fn test_register_rejects_weak_password() {
        let store = InMemoryUserStore::new();

        let err = AuthService::register(&store, "Toby", "toby@mail.com", "123")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(
            err.to_string(),
            "Password is not valid, must be at least 8 characters long, must contain \
             alpha numeric characters and at least one uppercase and lowercase character"
        );
    }

    #[tokio::test]
    async fn test_email_format_is_checked_before_password_strength() {
        let store = InMemoryUserStore::new();

        let err = AuthService::register(&store, "Toby", "not-an-email", "weak")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid email format");
    }

    #[tokio::test]
    async fn test_register_conflict_is_case_insensitive() {
        let store = InMemoryUserStore::new();

        AuthService::register(&store, "First", "a@b.com", "WeWork441$")
            .await
            .unwrap();

        let err = AuthService::register(&store, "Second", "A@B.com", "WeWork441$")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.to_string(), "User with this email already exists");
    }

    #[tokio::test]
    async fn test_storage_level_duplicate_maps_to_conflict() {
        // A race that slips past the pre-check surfaces from the store as
        // DuplicateEmail and must convert to the same conflict error.
        let store = InMemoryUserStore::new();
        store.create("First", "a@b.com", "hash").await.unwrap();

        let err: AppError = store
            .create("Second", "a@b.com", "hash")
            .await
            .map(|_| ())
            .map_err(AppError::from)
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.to_string(), "User with this email already exists");

        // And the underlying store error is the tagged duplicate case
        let store_err = store.create("Third", "a@b.com", "hash").await.unwrap_err();
        assert!(matches!(store_err, StoreError::DuplicateEmail));
    }

    #[tokio::test]
    async fn test_login_succeeds_with_correct_credentials() {
        let store = InMemoryUserStore::new();
        AuthService::register(&store, "Toby", "toby@mail.com", "ValidPass123!")
            .await
            .unwrap();

        let user = AuthService::login(&store, "Toby@Mail.com", "ValidPass123!")
            .await
            .unwrap();

        assert_eq!(user.email, "toby@mail.com");
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let store = InMemoryUserStore::new();
        AuthService::register(&store, "Toby", "toby@mail.com", "CorrectPass123!")
            .await
            .unwrap();

        let unknown_user = AuthService::login(&store, "nobody@mail.com", "anyPassword123!")
            .await
            .unwrap_err();
        let wrong_password = AuthService::login(&store, "toby@mail.com", "WrongPassword123!")
            .await
            .unwrap_err();

        assert!(matches!(unknown_user, AppError::Authentication(_)));
        assert!(matches!(wrong_password, AppError::Authentication(_)));
        // Literal equality, not just "both fail"
        assert_eq!(unknown_user.to_string(), wrong_password.to_string());
        assert_eq!(unknown_user.to_string(), "Invalid email or password");
    }
}
