// src/domain/mod.rs
//
// Domain Root - declares domain modules and re-exports their public API.
// All other modules import from `crate::domain::*`

pub mod product;

pub use product::Product;
