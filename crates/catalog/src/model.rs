use serde::{Deserialize, Serialize};

/// Catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Sweet {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i64,
}

/// Fields for creating a catalog entry. Quantity defaults to zero.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSweet {
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub quantity: i64,
}

/// Partial update: only supplied fields are changed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SweetPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
}
