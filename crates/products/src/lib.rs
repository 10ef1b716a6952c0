//! Products domain module.
//!
//! This crate contains the catalog record, its input validation and the list
//! filter, implemented purely as deterministic domain logic (no IO, no HTTP,
//! no storage).

pub mod filter;
pub mod product;

pub use filter::ProductFilter;
pub use product::{MAX_QUANTITY, NewProduct, Product, ProductChanges, ProductInput};
