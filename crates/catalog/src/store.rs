use sqlx::SqlitePool;

use crate::error::{CatalogError, Result};
use crate::model::{NewSweet, Sweet, SweetPatch};

const SWEET_COLUMNS: &str = "id, name, category, price, quantity";

/// Catalog persistence: CRUD and search over the `sweets` table.
#[derive(Clone)]
pub struct CatalogStore {
    pool: SqlitePool,
}

impl CatalogStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new catalog entry. Names and categories need not be unique.
    pub async fn create(&self, new: NewSweet) -> Result<Sweet> {
        validate_name(&new.name)?;
        validate_category(&new.category)?;
        validate_price(new.price)?;
        if new.quantity < 0 {
            return Err(CatalogError::Invalid {
                field: "quantity",
                reason: "must not be negative",
            });
        }

        let sweet = sqlx::query_as::<_, Sweet>(
            "INSERT INTO sweets (name, category, price, quantity) \
             VALUES (?1, ?2, ?3, ?4) \
             RETURNING id, name, category, price, quantity",
        )
        .bind(&new.name)
        .bind(&new.category)
        .bind(new.price)
        .bind(new.quantity)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(id = sweet.id, name = %sweet.name, "created sweet");
        Ok(sweet)
    }

    pub async fn get(&self, id: i64) -> Result<Sweet> {
        sqlx::query_as::<_, Sweet>(&format!(
            "SELECT {SWEET_COLUMNS} FROM sweets WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CatalogError::NotFound)
    }

    /// All entries in insertion order.
    pub async fn list_all(&self) -> Result<Vec<Sweet>> {
        let sweets = sqlx::query_as::<_, Sweet>(&format!(
            "SELECT {SWEET_COLUMNS} FROM sweets ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(sweets)
    }

    /// Case-insensitive substring match on name or category.
    pub async fn search(&self, term: &str) -> Result<Vec<Sweet>> {
        let sweets = sqlx::query_as::<_, Sweet>(&format!(
            "SELECT {SWEET_COLUMNS} FROM sweets \
             WHERE LOWER(name) LIKE '%' || LOWER(?1) || '%' \
                OR LOWER(category) LIKE '%' || LOWER(?1) || '%' \
             ORDER BY id"
        ))
        .bind(term)
        .fetch_all(&self.pool)
        .await?;

        Ok(sweets)
    }

    /// Apply a partial update; unsupplied fields keep their prior value.
    pub async fn update(&self, id: i64, patch: SweetPatch) -> Result<Sweet> {
        if let Some(name) = &patch.name {
            validate_name(name)?;
        }
        if let Some(category) = &patch.category {
            validate_category(category)?;
        }
        if let Some(price) = patch.price {
            validate_price(price)?;
        }
        if let Some(quantity) = patch.quantity {
            if quantity < 0 {
                return Err(CatalogError::Invalid {
                    field: "quantity",
                    reason: "must not be negative",
                });
            }
        }

        sqlx::query_as::<_, Sweet>(
            "UPDATE sweets SET \
                name = COALESCE(?1, name), \
                category = COALESCE(?2, category), \
                price = COALESCE(?3, price), \
                quantity = COALESCE(?4, quantity) \
             WHERE id = ?5 \
             RETURNING id, name, category, price, quantity",
        )
        .bind(patch.name)
        .bind(patch.category)
        .bind(patch.price)
        .bind(patch.quantity)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CatalogError::NotFound)
    }

    /// Permanently remove an entry.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM sweets WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound);
        }

        tracing::info!(id, "deleted sweet");
        Ok(())
    }

    /// Atomic conditional decrement: succeeds only when the row exists and
    /// holds at least `amount` units, so concurrent purchases can never push
    /// quantity below zero.
    pub(crate) async fn decrement_quantity(&self, id: i64, amount: i64) -> Result<Option<Sweet>> {
        let sweet = sqlx::query_as::<_, Sweet>(
            "UPDATE sweets SET quantity = quantity - ?1 \
             WHERE id = ?2 AND quantity >= ?1 \
             RETURNING id, name, category, price, quantity",
        )
        .bind(amount)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sweet)
    }

    /// Atomic increment; `None` when the id is absent.
    pub(crate) async fn increment_quantity(&self, id: i64, amount: i64) -> Result<Option<Sweet>> {
        let sweet = sqlx::query_as::<_, Sweet>(
            "UPDATE sweets SET quantity = quantity + ?1 \
             WHERE id = ?2 \
             RETURNING id, name, category, price, quantity",
        )
        .bind(amount)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sweet)
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CatalogError::Invalid {
            field: "name",
            reason: "must not be empty",
        });
    }
    Ok(())
}

fn validate_category(category: &str) -> Result<()> {
    if category.trim().is_empty() {
        return Err(CatalogError::Invalid {
            field: "category",
            reason: "must not be empty",
        });
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(CatalogError::Invalid {
            field: "price",
            reason: "must be a non-negative number",
        });
    }
    Ok(())
}

/// Create the `sweets` table if it does not exist. The CHECK constraint is a
/// backstop; every mutation path already guards quantity.
pub async fn ensure_schema(pool: &SqlitePool) -> std::result::Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS sweets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            price REAL NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 0 CHECK (quantity >= 0)
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}
