use sqlx::SqlitePool;

/// Bring the schema up to date. Each crate owns its table DDL; this just
/// runs them in order.
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    auth::ensure_schema(pool).await?;
    catalog::ensure_schema(pool).await?;
    Ok(())
}
