use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role. `User` can read, search and purchase; `Admin` can
/// additionally create, update, delete and restock catalog entries.
///
/// Variant order defines the capability ordering (`User < Admin`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Whether this role satisfies the given required floor.
    pub fn grants(self, required: Role) -> bool {
        self >= required
    }
}

/// Registered account.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
