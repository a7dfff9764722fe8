//! Sheetshop Core - Shared value types.
//!
//! This crate provides the small, I/O-free types used by the storefront
//! library:
//! - product identifiers read from the feed
//! - decimal prices and the single coercion policy for currency strings
//! - the feed's visibility flag
//! - customer email addresses
//!
//! # Architecture
//!
//! The core crate contains only types and parsing rules - no I/O, no HTTP
//! clients, no global state. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, and visibility

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
