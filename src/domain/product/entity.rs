use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of the product catalog.
///
/// Catalog rows are created and maintained by the ingestion pipeline that
/// owns the database; this crate only reads whatever state currently exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Model name shown in listings
    pub model: String,

    /// Manufacturer name
    pub manufacturer: String,

    /// Catalog category
    pub category: String,

    /// Color variant, absent when the product has no color option
    pub color: Option<String>,

    /// Review rating, 0.0 to 100.0
    pub rating: f64,

    /// Price in the smallest currency unit
    pub price_cents: i64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Create a new Product entity
    pub fn new(
        model: String,
        manufacturer: String,
        category: String,
        color: Option<String>,
        rating: f64,
        price_cents: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            model,
            manufacturer,
            category,
            color,
            rating,
            price_cents,
            created_at: now,
            updated_at: now,
        }
    }
}
