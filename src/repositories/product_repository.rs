// src/repositories/product_repository.rs
//
// Product catalog queries
//
// Read-only: catalog rows are written by whatever pipeline owns the
// database file, never by this crate.

use std::sync::Arc;

use rusqlite::{params, Params, Row};
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::Product;
use crate::error::{AppError, AppResult};

/// Highest rating the catalog assigns.
const MAX_RATING: f64 = 100.0;

const PRODUCT_COLUMNS: &str =
    "id, model, manufacturer, category, color, rating, price_cents, created_at, updated_at";

/// Storage-layer port for catalog queries.
///
/// Every operation issues a single read against the store and returns the
/// result unmodified. Listings without an explicit ORDER BY come back in the
/// store's default order (insertion order).
#[cfg_attr(test, mockall::automock)]
pub trait ProductRepository: Send + Sync {
    fn list_all(&self) -> AppResult<Vec<Product>>;

    /// The most-recently-created record, `None` on an empty catalog.
    fn last_record(&self) -> AppResult<Option<Product>>;

    /// Exactly one record whose model name equals `model`.
    ///
    /// Fails with `AppError::NotFound` on zero matches and
    /// `AppError::MultipleMatches` when more than one record matches.
    fn find_by_model(&self, model: &str) -> AppResult<Product>;

    fn by_rating(&self, rating: f64) -> AppResult<Vec<Product>>;

    /// Rating within the inclusive range `[lower, upper]`.
    fn by_rating_range(&self, lower: f64, upper: f64) -> AppResult<Vec<Product>>;

    fn by_rating_and_color(&self, rating: f64, color: &str) -> AppResult<Vec<Product>>;

    /// Union of rating matches and color matches; a row matching both
    /// appears once.
    fn by_rating_or_color(&self, rating: f64, color: &str) -> AppResult<Vec<Product>>;

    /// Count of records with no color recorded.
    fn no_color_count(&self) -> AppResult<u64>;

    /// Records priced at or below `price_cents`, or rated at or above
    /// `rating` (two independent inclusive range filters, OR-ed).
    fn below_price_or_above_rating(&self, price_cents: i64, rating: f64)
        -> AppResult<Vec<Product>>;

    /// Records whose manufacturer name contains `fragment`.
    fn by_manufacturer_like(&self, fragment: &str) -> AppResult<Vec<Product>>;

    /// Manufacturer names for records matching a manufacturer substring.
    /// Duplicates preserved.
    fn manufacturer_names_like(&self, fragment: &str) -> AppResult<Vec<String>>;

    fn not_in_category(&self, category: &str) -> AppResult<Vec<Product>>;

    /// Exclusion capped to the first `limit` rows in store default order;
    /// always a prefix of `not_in_category`'s result.
    fn limited_not_in_category(&self, category: &str, limit: u32) -> AppResult<Vec<Product>>;

    /// Manufacturer names for records in `category`. Duplicates preserved.
    fn category_manufacturers(&self, category: &str) -> AppResult<Vec<String>>;

    /// Arithmetic mean rating over a category, `None` when the category has
    /// no records.
    fn average_category_rating(&self, category: &str) -> AppResult<Option<f64>>;

    /// Maximum price over the whole catalog, `None` on an empty catalog.
    fn greatest_price(&self) -> AppResult<Option<i64>>;

    /// Identifier of the record with the longest model name, ties broken by
    /// insertion order. `None` on an empty catalog.
    fn longest_model_name(&self) -> AppResult<Option<Uuid>>;

    /// All records sorted by model-name length ascending, ties in insertion
    /// order.
    fn ordered_by_model_length(&self) -> AppResult<Vec<Product>>;

    /// All records ordered by category ascending, then price descending.
    fn ordered_by_category_then_price_descending(&self) -> AppResult<Vec<Product>>;
}

pub struct SqliteProductRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteProductRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to Product - returns rusqlite::Error for query_map compatibility
    fn row_to_product(row: &Row) -> Result<Product, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?;

        let created_at_str: String = row.get("created_at")?;
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    7,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;

        let updated_at_str: String = row.get("updated_at")?;
        let updated_at = chrono::DateTime::parse_from_rfc3339(&updated_at_str)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    8,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;

        Ok(Product {
            id,
            model: row.get("model")?,
            manufacturer: row.get("manufacturer")?,
            category: row.get("category")?,
            color: row.get("color")?,
            rating: row.get("rating")?,
            price_cents: row.get("price_cents")?,
            created_at,
            updated_at,
        })
    }

    fn select_products<P: Params>(&self, sql: &str, params: P) -> AppResult<Vec<Product>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(sql)?;
        let products: Vec<Product> = stmt
            .query_map(params, Self::row_to_product)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }

    fn select_manufacturers<P: Params>(&self, sql: &str, params: P) -> AppResult<Vec<String>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(sql)?;
        let names: Vec<String> = stmt
            .query_map(params, |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// Escape LIKE wildcards so `fragment` matches literally.
    fn escape_like(fragment: &str) -> String {
        fragment
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_")
    }
}

impl ProductRepository for SqliteProductRepository {
    fn list_all(&self) -> AppResult<Vec<Product>> {
        self.select_products(
            &format!("SELECT {} FROM products", PRODUCT_COLUMNS),
            params![],
        )
    }

    fn last_record(&self) -> AppResult<Option<Product>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM products ORDER BY rowid DESC LIMIT 1",
            PRODUCT_COLUMNS
        ))?;

        match stmt.query_row([], Self::row_to_product) {
            Ok(product) => Ok(Some(product)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn find_by_model(&self, model: &str) -> AppResult<Product> {
        let conn = self.pool.get()?;

        // LIMIT 2 is enough to distinguish "one" from "more than one"
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM products WHERE model = ?1 LIMIT 2",
            PRODUCT_COLUMNS
        ))?;

        let mut matches: Vec<Product> = stmt
            .query_map(params![model], Self::row_to_product)?
            .collect::<Result<Vec<_>, _>>()?;

        match matches.len() {
            0 => Err(AppError::NotFound),
            1 => Ok(matches.remove(0)),
            _ => Err(AppError::MultipleMatches(model.to_string())),
        }
    }

    fn by_rating(&self, rating: f64) -> AppResult<Vec<Product>> {
        self.select_products(
            &format!("SELECT {} FROM products WHERE rating = ?1", PRODUCT_COLUMNS),
            params![rating],
        )
    }

    fn by_rating_range(&self, lower: f64, upper: f64) -> AppResult<Vec<Product>> {
        self.select_products(
            &format!(
                "SELECT {} FROM products WHERE rating BETWEEN ?1 AND ?2",
                PRODUCT_COLUMNS
            ),
            params![lower, upper],
        )
    }

    fn by_rating_and_color(&self, rating: f64, color: &str) -> AppResult<Vec<Product>> {
        self.select_products(
            &format!(
                "SELECT {} FROM products WHERE rating = ?1 AND color = ?2",
                PRODUCT_COLUMNS
            ),
            params![rating, color],
        )
    }

    fn by_rating_or_color(&self, rating: f64, color: &str) -> AppResult<Vec<Product>> {
        self.select_products(
            &format!(
                "SELECT {} FROM products WHERE rating = ?1 OR color = ?2",
                PRODUCT_COLUMNS
            ),
            params![rating, color],
        )
    }

    fn no_color_count(&self) -> AppResult<u64> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM products WHERE color IS NULL",
            [],
            |row| row.get(0),
        )?;

        Ok(count as u64)
    }

    fn below_price_or_above_rating(
        &self,
        price_cents: i64,
        rating: f64,
    ) -> AppResult<Vec<Product>> {
        self.select_products(
            &format!(
                "SELECT {} FROM products
                 WHERE price_cents BETWEEN 0 AND ?1 OR rating BETWEEN ?2 AND ?3",
                PRODUCT_COLUMNS
            ),
            params![price_cents, rating, MAX_RATING],
        )
    }

    fn by_manufacturer_like(&self, fragment: &str) -> AppResult<Vec<Product>> {
        let pattern = format!("%{}%", Self::escape_like(fragment));
        self.select_products(
            &format!(
                "SELECT {} FROM products WHERE manufacturer LIKE ?1 ESCAPE '\\'",
                PRODUCT_COLUMNS
            ),
            params![pattern],
        )
    }

    fn manufacturer_names_like(&self, fragment: &str) -> AppResult<Vec<String>> {
        let pattern = format!("%{}%", Self::escape_like(fragment));
        self.select_manufacturers(
            "SELECT manufacturer FROM products WHERE manufacturer LIKE ?1 ESCAPE '\\'",
            params![pattern],
        )
    }

    fn not_in_category(&self, category: &str) -> AppResult<Vec<Product>> {
        self.select_products(
            &format!(
                "SELECT {} FROM products WHERE category <> ?1",
                PRODUCT_COLUMNS
            ),
            params![category],
        )
    }

    fn limited_not_in_category(&self, category: &str, limit: u32) -> AppResult<Vec<Product>> {
        self.select_products(
            &format!(
                "SELECT {} FROM products WHERE category <> ?1 LIMIT ?2",
                PRODUCT_COLUMNS
            ),
            params![category, limit],
        )
    }

    fn category_manufacturers(&self, category: &str) -> AppResult<Vec<String>> {
        self.select_manufacturers(
            "SELECT manufacturer FROM products WHERE category = ?1",
            params![category],
        )
    }

    fn average_category_rating(&self, category: &str) -> AppResult<Option<f64>> {
        let conn = self.pool.get()?;

        // AVG over zero rows is NULL
        let average: Option<f64> = conn.query_row(
            "SELECT AVG(rating) FROM products WHERE category = ?1",
            params![category],
            |row| row.get(0),
        )?;

        Ok(average)
    }

    fn greatest_price(&self) -> AppResult<Option<i64>> {
        let conn = self.pool.get()?;

        let max: Option<i64> = conn.query_row("SELECT MAX(price_cents) FROM products", [], |row| {
            row.get(0)
        })?;

        Ok(max)
    }

    fn longest_model_name(&self) -> AppResult<Option<Uuid>> {
        let conn = self.pool.get()?;

        let id_str = conn.query_row(
            "SELECT id FROM products ORDER BY LENGTH(model) DESC, rowid ASC LIMIT 1",
            [],
            |row| row.get::<_, String>(0),
        );

        match id_str {
            Ok(id_str) => Ok(Some(Uuid::parse_str(&id_str)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn ordered_by_model_length(&self) -> AppResult<Vec<Product>> {
        self.select_products(
            &format!(
                "SELECT {} FROM products ORDER BY LENGTH(model) ASC, rowid ASC",
                PRODUCT_COLUMNS
            ),
            params![],
        )
    }

    fn ordered_by_category_then_price_descending(&self) -> AppResult<Vec<Product>> {
        self.select_products(
            &format!(
                "SELECT {} FROM products ORDER BY category ASC, price_cents DESC",
                PRODUCT_COLUMNS
            ),
            params![],
        )
    }
}
