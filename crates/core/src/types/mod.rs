//! Core types for Sheetshop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod status;

pub use email::{Email, EmailError};
pub use id::ProductId;
pub use price::{CoercionError, Price};
pub use status::Visibility;
