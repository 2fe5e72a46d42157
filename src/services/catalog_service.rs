// src/services/catalog_service.rs
//
// Catalog query facade
//
// The service owns no query logic of its own: every catalog operation is a
// passthrough to the repository port. Applications embed this type instead
// of talking to a repository directly.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::Product;
use crate::error::AppResult;
use crate::repositories::ProductRepository;

/// Aggregate snapshot of the catalog, composed from the query port.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogOverview {
    pub total_products: u64,
    pub missing_color: u64,
    pub highest_price_cents: Option<i64>,
}

pub struct CatalogService {
    products: Arc<dyn ProductRepository>,
}

impl CatalogService {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub fn list_all(&self) -> AppResult<Vec<Product>> {
        self.products.list_all()
    }

    pub fn last_record(&self) -> AppResult<Option<Product>> {
        self.products.last_record()
    }

    pub fn find_by_model(&self, model: &str) -> AppResult<Product> {
        self.products.find_by_model(model)
    }

    pub fn by_rating(&self, rating: f64) -> AppResult<Vec<Product>> {
        self.products.by_rating(rating)
    }

    pub fn by_rating_range(&self, lower: f64, upper: f64) -> AppResult<Vec<Product>> {
        self.products.by_rating_range(lower, upper)
    }

    pub fn by_rating_and_color(&self, rating: f64, color: &str) -> AppResult<Vec<Product>> {
        self.products.by_rating_and_color(rating, color)
    }

    pub fn by_rating_or_color(&self, rating: f64, color: &str) -> AppResult<Vec<Product>> {
        self.products.by_rating_or_color(rating, color)
    }

    pub fn no_color_count(&self) -> AppResult<u64> {
        self.products.no_color_count()
    }

    pub fn below_price_or_above_rating(
        &self,
        price_cents: i64,
        rating: f64,
    ) -> AppResult<Vec<Product>> {
        self.products.below_price_or_above_rating(price_cents, rating)
    }

    pub fn by_manufacturer_like(&self, fragment: &str) -> AppResult<Vec<Product>> {
        self.products.by_manufacturer_like(fragment)
    }

    pub fn manufacturer_names_like(&self, fragment: &str) -> AppResult<Vec<String>> {
        self.products.manufacturer_names_like(fragment)
    }

    pub fn not_in_category(&self, category: &str) -> AppResult<Vec<Product>> {
        self.products.not_in_category(category)
    }

    pub fn limited_not_in_category(
        &self,
        category: &str,
        limit: u32,
    ) -> AppResult<Vec<Product>> {
        self.products.limited_not_in_category(category, limit)
    }

    pub fn category_manufacturers(&self, category: &str) -> AppResult<Vec<String>> {
        self.products.category_manufacturers(category)
    }

    pub fn average_category_rating(&self, category: &str) -> AppResult<Option<f64>> {
        self.products.average_category_rating(category)
    }

    pub fn greatest_price(&self) -> AppResult<Option<i64>> {
        self.products.greatest_price()
    }

    pub fn longest_model_name(&self) -> AppResult<Option<Uuid>> {
        self.products.longest_model_name()
    }

    pub fn ordered_by_model_length(&self) -> AppResult<Vec<Product>> {
        self.products.ordered_by_model_length()
    }

    pub fn ordered_by_category_then_price_descending(&self) -> AppResult<Vec<Product>> {
        self.products.ordered_by_category_then_price_descending()
    }

    /// Snapshot of catalog-wide aggregates.
    pub fn overview(&self) -> AppResult<CatalogOverview> {
        let total_products = self.products.list_all()?.len() as u64;
        let missing_color = self.products.no_color_count()?;
        let highest_price_cents = self.products.greatest_price()?;

        log::debug!(
            "catalog overview: {} products, {} without color",
            total_products,
            missing_color
        );

        Ok(CatalogOverview {
            total_products,
            missing_color,
            highest_price_cents,
        })
    }
}
