// src/lib.rs
// Prodcat - read-only product catalog query layer over SQLite
//
// Architecture:
// - Domain-centric: catalog entities are plain data
// - Explicit: repositories speak explicit SQL, no implicit behavior
// - Read-only: record lifecycle belongs to the pipeline that owns the database

pub mod db;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::Product;

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, get_database_path, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{ProductRepository, SqliteProductRepository};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{CatalogOverview, CatalogService};
