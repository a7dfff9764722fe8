//! Domain models for the storefront.
//!
//! These are plain owned values. Parsing and coercion rules live in
//! [`sheetshop_core`]; the feed parser and the order form are the only
//! places that construct them from raw text.

pub mod customer;
pub mod product;

pub use customer::{CustomerDetails, CustomerError};
pub use product::ProductRecord;
