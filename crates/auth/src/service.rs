use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    error::{AuthError, Result},
    jwt::{generate_token, validate_token},
    model::{Role, User},
    password::{hash_password, verify_password},
};

/// Account registry plus login/session handling.
///
/// The JWT signing secret is injected once at construction and never mutated;
/// rotating it requires a restart and invalidates every outstanding token.
#[derive(Clone)]
pub struct AuthService {
    pool: SqlitePool,
    jwt_secret: String,
    token_ttl_seconds: i64,
}

impl AuthService {
    pub fn new(pool: SqlitePool, jwt_secret: String, token_ttl_seconds: i64) -> Self {
        Self {
            pool,
            jwt_secret,
            token_ttl_seconds,
        }
    }

    /// Register a new account with the default role.
    pub async fn register(&self, email: &str, password: &str) -> Result<User> {
        self.register_with_role(email, password, Role::User).await
    }

    /// Register a new account with the given role.
    ///
    /// Duplicate emails fail with `EmailTaken`. The pre-check gives the
    /// common case a clean answer; the unique index on `users.email` closes
    /// the race between two concurrent registrations.
    pub async fn register_with_role(&self, email: &str, password: &str, role: Role) -> Result<User> {
        if self.find_by_email(email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hash_password(password)?;
        let now = Utc::now();

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, role, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?4) \
             RETURNING id, email, password_hash, role, created_at, updated_at",
        )
        .bind(email)
        .bind(&password_hash)
        .bind(role)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::EmailTaken,
            _ => AuthError::Database(e),
        })?;

        tracing::info!(email, role = ?role, "registered account");
        Ok(user)
    }

    /// Authenticate credentials and mint a session token.
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials` so a
    /// caller cannot distinguish them and enumerate accounts.
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let user = self
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        generate_token(&user.email, user.role, &self.jwt_secret, self.token_ttl_seconds)
    }

    /// Validate a session token and load the account it identifies.
    ///
    /// An account deleted after token issuance fails as `InvalidToken`.
    pub async fn authenticate(&self, token: &str) -> Result<User> {
        let claims = validate_token(token, &self.jwt_secret)?;

        self.find_by_email(&claims.sub)
            .await?
            .ok_or(AuthError::InvalidToken)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, role, created_at, updated_at \
             FROM users WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

/// Create the `users` table if it does not exist.
pub async fn ensure_schema(pool: &SqlitePool) -> std::result::Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'USER',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}
