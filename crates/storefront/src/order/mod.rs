//! Order submission.
//!
//! The cart and the customer form are rendered into a message
//! ([`format_order`]), wrapped in a deep link ([`OrderLink`]), and handed to
//! an [`OrderSink`]. This crate never sends anything itself: the sink is
//! whatever the presentation layer uses to open the link.

pub mod formatter;
pub mod link;

pub use formatter::format_order;
pub use link::OrderLink;

use thiserror::Error;

use crate::cart::CartLine;
use crate::config::OrderConfig;
use crate::models::{CustomerDetails, CustomerError};

/// Boxed error returned by an [`OrderSink`].
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that stop an order from going out. The cart is left untouched.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("incomplete customer details: {0}")]
    Customer(#[from] CustomerError),

    #[error("cart is empty")]
    EmptyCart,

    #[error("order channel rejected the order: {0}")]
    Sink(#[source] SinkError),
}

/// Receives a finished order link.
pub trait OrderSink {
    /// Hand the link to the outbound channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel could not take the order. The
    /// session keeps the cart in that case so the shopper can retry.
    fn submit_order(&self, link: &OrderLink) -> Result<(), SinkError>;
}

impl<F> OrderSink for F
where
    F: Fn(&OrderLink) -> Result<(), SinkError>,
{
    fn submit_order(&self, link: &OrderLink) -> Result<(), SinkError> {
        self(link)
    }
}

/// Validate the customer and build the link for an order.
///
/// # Errors
///
/// - [`OrderError::EmptyCart`] if there are no lines
/// - [`OrderError::Customer`] if the customer details are incomplete
pub fn prepare_order(
    config: &OrderConfig,
    customer: &CustomerDetails,
    lines: &[CartLine],
) -> Result<OrderLink, OrderError> {
    if lines.is_empty() {
        return Err(OrderError::EmptyCart);
    }
    customer.validate()?;

    let message = format_order(customer, lines);
    Ok(OrderLink::build(config, &message))
}
