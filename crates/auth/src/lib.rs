// Crypto primitives
mod error;
mod jwt;
mod password;

// Account registry
pub mod model;
pub mod service;

pub use error::{AuthError, Result};

pub use jwt::{generate_token, validate_token, Claims};
pub use password::{hash_password, verify_password};

pub use model::{Role, User};
pub use service::{ensure_schema, AuthService};
