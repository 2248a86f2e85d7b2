use std::collections::HashMap;

use sqlx::PgPool;

use super::ProductCatalog;
use crate::{
    db::{Cache, CacheKey},
    error::AppResult,
    models::{Outfit, Product, Season},
};

const PRODUCT_COLUMNS: &str =
    "p.id, p.name, p.brand, p.style_tags, p.color, p.material, p.silhouette, p.seasons, p.category, p.price";

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    brand: Option<String>,
    style_tags: Vec<String>,
    color: Option<String>,
    material: Option<String>,
    silhouette: Option<String>,
    seasons: Vec<String>,
    category: Option<String>,
    price: f64,
}

#[derive(Debug, sqlx::FromRow)]
struct OutfitRow {
    id: String,
    archetype: String,
    tags: Vec<String>,
    season: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct OutfitItemRow {
    outfit_id: String,
    #[sqlx(flatten)]
    product: ProductRow,
}

fn parse_season(raw: &str, owner: &str) -> Option<Season> {
    match raw.parse() {
        Ok(season) => Some(season),
        Err(e) => {
            tracing::warn!(id = owner, error = %e, "Skipping unknown season in catalog");
            None
        }
    }
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        let seasons = row
            .seasons
            .iter()
            .filter_map(|s| parse_season(s, &row.id))
            .collect();

        Product {
            id: row.id,
            name: row.name,
            brand: row.brand,
            style_tags: row.style_tags,
            color: row.color,
            material: row.material,
            silhouette: row.silhouette,
            seasons,
            category: row.category,
            price: row.price,
        }
    }
}

/// Catalog backed by the `products` / `outfits` tables
///
/// When a [`Cache`] is attached, list reads go through Redis first and
/// misses are written back in the background with `cache_ttl` seconds to live.
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
    cache: Option<Cache>,
    cache_ttl: u64,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            cache: None,
            cache_ttl: 0,
        }
    }

    pub fn with_cache(mut self, cache: Cache, ttl: u64) -> Self {
        self.cache = Some(cache);
        self.cache_ttl = ttl;
        self
    }

    async fn fetch_products(&self) -> AppResult<Vec<Product>> {
        let sql = format!(
            "SELECT {} FROM products p WHERE p.active ORDER BY p.id",
            PRODUCT_COLUMNS
        );
        let rows: Vec<ProductRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        tracing::debug!(count = rows.len(), "Loaded products from database");
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn fetch_outfits(&self) -> AppResult<Vec<Outfit>> {
        let outfit_rows: Vec<OutfitRow> =
            sqlx::query_as("SELECT id, archetype, tags, season FROM outfits ORDER BY created_at, id")
                .fetch_all(&self.pool)
                .await?;

        let sql = format!(
            "SELECT op.outfit_id, {} FROM outfit_products op \
             JOIN products p ON p.id = op.product_id \
             WHERE p.active \
             ORDER BY op.outfit_id, op.position",
            PRODUCT_COLUMNS
        );
        let item_rows: Vec<OutfitItemRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        let mut items: HashMap<String, Vec<Product>> = HashMap::new();
        for row in item_rows {
            items
                .entry(row.outfit_id)
                .or_default()
                .push(Product::from(row.product));
        }

        let outfits: Vec<Outfit> = outfit_rows
            .into_iter()
            .map(|row| {
                let season = row.season.as_deref().and_then(|s| parse_season(s, &row.id));
                Outfit {
                    products: items.remove(&row.id).unwrap_or_default(),
                    id: row.id,
                    archetype: row.archetype,
                    tags: row.tags,
                    season,
                }
            })
            .collect();

        tracing::debug!(count = outfits.len(), "Loaded outfits from database");
        Ok(outfits)
    }
}

#[async_trait::async_trait]
impl ProductCatalog for PgCatalog {
    async fn list_products(&self) -> AppResult<Vec<Product>> {
        match &self.cache {
            Some(cache) => crate::cached!(cache, CacheKey::Products, self.cache_ttl, self.fetch_products()),
            None => self.fetch_products().await,
        }
    }

    async fn list_outfits(&self) -> AppResult<Vec<Outfit>> {
        match &self.cache {
            Some(cache) => crate::cached!(cache, CacheKey::Outfits, self.cache_ttl, self.fetch_outfits()),
            None => self.fetch_outfits().await,
        }
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
