//! One shopper's session.
//!
//! [`ShopSession`] owns the per-shopper state (cart, filter criteria,
//! accordion) and reads the shared catalog from [`AppState`]. Every command
//! goes through it and the observer is told about each resulting change.

use tracing::instrument;

use crate::cart::{Cart, CartError, CartLine};
use crate::catalog::{
    AccordionState, CategoryGroup, FilterCriteria, SectionState, group_by_category,
};
use crate::error::{AppError, add_breadcrumb};
use crate::models::{CustomerDetails, ProductRecord};
use crate::observer::StorefrontObserver;
use crate::order::{OrderError, OrderLink, OrderSink, prepare_order};
use crate::state::{AppState, ReloadOutcome};

/// A shopping session bound to a view.
#[derive(Debug)]
pub struct ShopSession<O> {
    state: AppState,
    observer: O,
    cart: Cart,
    criteria: FilterCriteria,
    accordion: AccordionState,
    visible: Vec<ProductRecord>,
    groups: Vec<CategoryGroup>,
}

impl<O: StorefrontObserver> ShopSession<O> {
    /// Start a session showing the current catalog unfiltered.
    pub fn new(state: AppState, observer: O) -> Self {
        let mut session = Self {
            state,
            observer,
            cart: Cart::new(),
            criteria: FilterCriteria::all(),
            accordion: AccordionState::default(),
            visible: Vec::new(),
            groups: Vec::new(),
        };
        session.redraw();
        session
    }

    /// Reload the feed and redraw.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Feed`] if the reload failed. The previous catalog
    /// stays on screen and the observer gets `on_reload_failed`.
    #[instrument(skip(self))]
    pub async fn refresh_catalog(&mut self) -> Result<ReloadOutcome, AppError> {
        match self.state.reload().await {
            Ok(outcome) => {
                if matches!(outcome, ReloadOutcome::Replaced(_)) {
                    self.redraw();
                }
                Ok(outcome)
            }
            Err(err) => {
                self.observer.on_reload_failed(&err);
                Err(report(err))
            }
        }
    }

    /// Apply new filter criteria and redraw.
    pub fn apply_filter(&mut self, criteria: FilterCriteria) -> &[ProductRecord] {
        self.criteria = criteria;
        self.redraw();
        &self.visible
    }

    /// Toggle a category section.
    ///
    /// Returns the section's new state, or `None` if the category is not
    /// on screen.
    pub fn activate_category(&mut self, category: &str) -> Option<SectionState> {
        self.accordion.activate(category)
    }

    /// Add one unit of a record to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Cart`] if the record has no usable price.
    pub fn add_to_cart(&mut self, record: &ProductRecord) -> Result<(), AppError> {
        self.cart.add_record(record).map_err(report)?;

        add_breadcrumb("cart", "Added product", Some(&[("product", record.name.as_str())]));
        self.notify_cart();
        Ok(())
    }

    /// Add one unit of the catalog record with this name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Cart`] if no published record has that name or
    /// it has no usable price.
    pub fn add_to_cart_by_name(&mut self, name: &str) -> Result<(), AppError> {
        let record = self.state.catalog().find_by_name(name).cloned();
        match record {
            Some(record) => self.add_to_cart(&record),
            None => Err(report(CartError::UnknownProduct {
                name: name.to_owned(),
            })),
        }
    }

    /// Remove a whole cart line.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Cart`] if there is no line at `index`.
    pub fn remove_line(&mut self, index: usize) -> Result<CartLine, AppError> {
        let removed = self.cart.remove_line(index).map_err(report)?;

        add_breadcrumb(
            "cart",
            "Removed line",
            Some(&[("product", removed.product_name.as_str())]),
        );
        self.notify_cart();
        Ok(removed)
    }

    /// Send the cart as an order.
    ///
    /// The cart is cleared only after the sink accepted the link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Order`] if the cart is empty, the customer
    /// details are incomplete, or the sink fails.
    #[instrument(skip_all)]
    pub fn submit_order<S: OrderSink>(
        &mut self,
        customer: &CustomerDetails,
        sink: &S,
    ) -> Result<OrderLink, AppError> {
        let link = prepare_order(&self.state.config().order, customer, self.cart.lines())
            .map_err(report)?;

        sink.submit_order(&link)
            .map_err(|e| report(OrderError::Sink(e)))?;

        let total = self.cart.total();
        tracing::info!(
            item_count = self.cart.item_count(),
            total = %total,
            "Order submitted"
        );
        let total = total.to_string();
        add_breadcrumb("order", "Submitted order", Some(&[("total", total.as_str())]));

        self.cart.clear();
        self.notify_cart();
        Ok(link)
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    #[must_use]
    pub const fn accordion(&self) -> &AccordionState {
        &self.accordion
    }

    /// Records matching the current criteria.
    #[must_use]
    pub fn visible_records(&self) -> &[ProductRecord] {
        &self.visible
    }

    /// The current records grouped by category.
    #[must_use]
    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    #[must_use]
    pub const fn observer(&self) -> &O {
        &self.observer
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Recompute the filtered view and reset the accordion.
    fn redraw(&mut self) {
        self.visible = self.state.catalog().filter(&self.criteria);
        self.groups = group_by_category(&self.visible);
        self.accordion.reset(&self.groups);

        tracing::debug!(
            visible = self.visible.len(),
            groups = self.groups.len(),
            "Catalog redrawn"
        );

        self.observer.on_filter_result(&self.visible);
        self.observer.on_catalog_updated(&self.groups);
    }

    fn notify_cart(&mut self) {
        self.observer
            .on_cart_updated(self.cart.lines(), self.cart.total(), self.cart.item_count());
    }
}

/// Convert into an [`AppError`] and report it.
fn report(err: impl Into<AppError>) -> AppError {
    let err = err.into();
    err.report();
    err
}
