use sqlx::{postgres::PgPoolOptions, PgPool};

/// Creates a PostgreSQL connection pool for the product catalog
///
/// Pending migrations under `migrations/` are applied before the pool is
/// handed out, so the catalog tables always exist.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Catalog database migrations applied");

    Ok(pool)
}
