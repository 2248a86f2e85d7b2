use super::ProductCatalog;
use crate::{
    error::AppResult,
    models::{Outfit, Product, Season},
};

/// Catalog held in process memory
///
/// Used when no `DATABASE_URL` is configured and by the integration tests.
/// Contents are fixed at construction.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
    outfits: Vec<Outfit>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>, outfits: Vec<Outfit>) -> Self {
        Self { products, outfits }
    }

    /// A small demo catalog covering several archetypes and seasons
    pub fn seeded() -> Self {
        let coat = Product::new("p-coat", "Wool Overcoat")
            .with_tags(["minimal", "tailored", "classic"])
            .with_color("navy")
            .with_category("outerwear")
            .with_seasons(vec![Season::Autumn, Season::Winter])
            .with_price(240.0);
        let tee = Product::new("p-tee", "Organic Cotton Tee")
            .with_tags(["minimal", "casual", "basic"])
            .with_color("white")
            .with_category("top")
            .with_price(30.0);
        let blazer = Product::new("p-blazer", "Unstructured Blazer")
            .with_tags(["smart-casual", "tailored"])
            .with_color("grey")
            .with_category("outerwear")
            .with_price(180.0);
        let chinos = Product::new("p-chinos", "Slim Chinos")
            .with_tags(["classic", "smart-casual"])
            .with_color("beige")
            .with_category("trousers")
            .with_price(70.0);
        let hoodie = Product::new("p-hoodie", "Oversized Graphic Hoodie")
            .with_tags(["streetwear", "oversized", "casual"])
            .with_color("black")
            .with_category("top")
            .with_seasons(vec![Season::Autumn, Season::Winter, Season::Spring])
            .with_price(85.0);
        let sneakers = Product::new("p-sneakers", "Chunky Sneakers")
            .with_tags(["streetwear", "sport"])
            .with_color("white")
            .with_category("shoes")
            .with_price(120.0);
        let leggings = Product::new("p-leggings", "Performance Leggings")
            .with_tags(["athletic", "sport", "stretch"])
            .with_color("black")
            .with_category("bottoms")
            .with_price(60.0);
        let dress = Product::new("p-dress", "Floral Midi Dress")
            .with_tags(["romantic", "floral", "feminine"])
            .with_color("blush")
            .with_category("dress")
            .with_seasons(vec![Season::Spring, Season::Summer])
            .with_price(110.0);

        let outfits = vec![
            Outfit::new("o-minimal-winter", "minimalist")
                .with_products(vec![coat.clone(), tee.clone()])
                .with_season(Season::Winter),
            Outfit::new("o-minimal-daily", "minimalist")
                .with_products(vec![tee.clone(), chinos.clone()])
                .with_tags(["all-season"]),
            Outfit::new("o-smart-office", "smart-casual")
                .with_products(vec![blazer.clone(), chinos.clone()])
                .with_season(Season::Autumn),
            Outfit::new("o-street-weekend", "streetwear")
                .with_products(vec![hoodie.clone(), sneakers.clone()])
                .with_season(Season::Autumn),
            Outfit::new("o-athletic-run", "athletic")
                .with_products(vec![leggings.clone(), sneakers.clone()])
                .with_tags(["all-season"]),
            Outfit::new("o-romantic-garden", "romantic")
                .with_products(vec![dress.clone()])
                .with_season(Season::Summer),
        ];

        let products = vec![coat, tee, blazer, chinos, hoodie, sneakers, leggings, dress];
        Self::new(products, outfits)
    }
}

#[async_trait::async_trait]
impl ProductCatalog for InMemoryCatalog {
    async fn list_products(&self) -> AppResult<Vec<Product>> {
        Ok(self.products.clone())
    }

    async fn list_outfits(&self) -> AppResult<Vec<Outfit>> {
        Ok(self.outfits.clone())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
