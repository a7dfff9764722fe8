//! The in-memory catalog and the views derived from it.
//!
//! - [`store`] - the current set of published records
//! - [`filter`] - composable text, category, and price predicates
//! - [`grouping`] - records grouped by category in first-seen order
//! - [`accordion`] - which category section is expanded

pub mod accordion;
pub mod filter;
pub mod grouping;
pub mod store;

pub use accordion::{AccordionState, SectionState};
pub use filter::{CategoryFilter, FilterCriteria, filter_records};
pub use grouping::{CategoryGroup, group_by_category};
pub use store::CatalogStore;
