use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Sweet not found")]
    NotFound,

    #[error("Invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },

    #[error("Quantity must be positive")]
    InvalidQuantity,

    #[error("Sweet is out of stock")]
    OutOfStock,

    #[error("Insufficient stock. Available: {available}, Requested: {requested}")]
    InsufficientStock { available: i64, requested: i64 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
