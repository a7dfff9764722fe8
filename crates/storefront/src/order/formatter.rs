//! Order message rendering.
//!
//! The message is plain text with the lightweight `*bold*` markup messaging
//! apps understand. Layout:
//!
//! ```text
//! *🚨 NEW ONLINE ORDER 🚨*
//!
//! *CUSTOMER:*
//! 👤 Name: <name>
//! 📞 Phone: <phone>
//! 📧 Email: <email>
//! 📍 Delivery address: <address>
//! ------------------------------------
//! *PRODUCTS:*
//! ✅ <product> x<qty> ($<subtotal>)
//!
//! *ORDER TOTAL: $<total>*
//! ------------------------------------
//! ```

use std::fmt::Write as _;

use sheetshop_core::Price;

use crate::cart::CartLine;
use crate::models::CustomerDetails;

const SEPARATOR: &str = "------------------------------------";

/// Render an order message.
///
/// Never fails: an empty cart renders an empty product section and a total
/// of `$0.00`. Control characters in any field (including newlines typed
/// into the address box) are replaced with spaces so the message layout
/// stays intact.
#[must_use]
pub fn format_order(customer: &CustomerDetails, lines: &[CartLine]) -> String {
    let mut message = String::new();

    message.push_str("*🚨 NEW ONLINE ORDER 🚨*\n\n");

    message.push_str("*CUSTOMER:*\n");
    let _ = writeln!(message, "👤 Name: {}", sanitize(&customer.name));
    let _ = writeln!(message, "📞 Phone: {}", sanitize(&customer.phone));
    let _ = writeln!(message, "📧 Email: {}", sanitize(&customer.email));
    let _ = writeln!(message, "📍 Delivery address: {}", sanitize(&customer.address));
    message.push_str(SEPARATOR);
    message.push('\n');

    message.push_str("*PRODUCTS:*\n");
    for line in lines {
        let _ = writeln!(
            message,
            "✅ {} x{} ({})",
            sanitize(&line.product_name),
            line.quantity,
            line.subtotal()
        );
    }

    let total: Price = lines.iter().map(CartLine::subtotal).sum();
    let _ = write!(message, "\n*ORDER TOTAL: {total}*\n{SEPARATOR}");

    message
}

/// Replace control characters with spaces and trim the ends.
fn sanitize(field: &str) -> String {
    field
        .trim()
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
