//! User repository for database operations

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use auth_service_shared::types::PublicUser;

/// User record from the database
///
/// `password_hash` never leaves the repository/hasher boundary: every
/// outward crossing goes through [`UserRecord::into_public`]. The
/// two-factor columns are reserved schema with no behavior behind them.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub two_factor_enabled: bool,
    pub two_factor_secret: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Strip the password and project to the boundary shape
    pub fn into_public(self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name,
            email: self.email,
            created_at: self.created_at,
        }
    }
}

/// Store failure, with the duplicate-key case split out so callers can
/// treat a storage-level uniqueness rejection as a conflict rather than a
/// crash.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate email")]
    DuplicateEmail,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Lowercase and trim an email before any comparison or storage
///
/// Applied on every lookup and create so uniqueness is case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Port over the persistence collaborator
///
/// The service layer and the authentication extractor depend on this trait
/// rather than on a concrete pool, so tests can substitute an in-memory
/// implementation.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError>;

    /// Create a user; a duplicate unique key surfaces as
    /// [`StoreError::DuplicateEmail`].
    async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<UserRecord, StoreError>;
}

/// PostgreSQL-backed user store
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, name, email, password_hash, two_factor_enabled,
                   two_factor_secret, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, name, email, password_hash, two_factor_enabled,
                   two_factor_secret, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<UserRecord, StoreError> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, two_factor_enabled,
                      two_factor_secret, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateEmail,
            other => StoreError::Database(other),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  A@B.com "), "a@b.com");
        assert_eq!(normalize_email("MiXeD@Mail.COM"), "mixed@mail.com");
        assert_eq!(normalize_email("already@lower.com"), "already@lower.com");
    }

    #[test]
    fn test_into_public_strips_password() {
        let record = UserRecord {
            id: Uuid::new_v4(),
            name: "Toby".to_string(),
            email: "toby@mail.com".to_string(),
            password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
            two_factor_enabled: false,
            two_factor_secret: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let public = record.clone().into_public();
        assert_eq!(public.id, record.id);
        assert_eq!(public.email, record.email);

        let json = serde_json::to_value(&public).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("twoFactorSecret").is_none());
    }
}
