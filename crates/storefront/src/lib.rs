//! sheetshop storefront library.
//!
//! Turns a published spreadsheet feed into a filterable catalog, keeps a
//! shopper's cart, and renders the cart into an order message for a
//! messaging deep link. Rendering and the actual send belong to the
//! embedding application; it drives a [`session::ShopSession`] and listens
//! through [`observer::StorefrontObserver`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod observer;
pub mod order;
pub mod session;
pub mod state;
pub mod telemetry;
