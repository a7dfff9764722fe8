//! Integration tests for cart arithmetic and order payloads.

#![allow(clippy::unwrap_used)]

use sheetshop_core::Price;
use sheetshop_integration_tests::{ORDER_PHONE, customer};
use sheetshop_storefront::cart::{Cart, CartError};
use sheetshop_storefront::config::OrderConfig;
use sheetshop_storefront::models::CustomerDetails;
use sheetshop_storefront::order::{OrderError, OrderLink, format_order, prepare_order};

fn order_config() -> OrderConfig {
    OrderConfig {
        phone: ORDER_PHONE.to_string(),
        link_base: "https://wa.me".to_string(),
    }
}

// =============================================================================
// Cart
// =============================================================================

#[test]
fn adding_the_same_product_twice_consolidates() {
    let mut cart = Cart::new();
    cart.add_item("Widget", "9.99".parse().unwrap());
    cart.add_item("Widget", "9.99".parse().unwrap());

    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].product_name, "Widget");
    assert_eq!(cart.lines()[0].quantity, 2);
    assert_eq!(cart.total(), "19.98".parse().unwrap());
    assert_eq!(cart.total().to_fixed(), "19.98");
}

#[test]
fn removing_from_an_empty_cart_fails_cleanly() {
    let mut cart = Cart::new();

    let err = cart.remove_line(0).unwrap_err();

    assert_eq!(err, CartError::IndexOutOfRange { index: 0, len: 0 });
    assert_eq!(cart.item_count(), 0);
}

#[test]
fn item_count_sums_quantities_across_lines() {
    let mut cart = Cart::new();
    for name in ["Apple", "Bread", "Apple", "Jam", "Apple"] {
        cart.add_item(name, Price::from_cents(100));
    }

    assert_eq!(cart.lines().len(), 3);
    assert_eq!(cart.item_count(), 5);
    assert_eq!(cart.total(), Price::from_cents(500));
}

#[test]
fn summary_serializes_for_the_view() {
    let mut cart = Cart::new();
    cart.add_item("Apple", Price::from_cents(150));
    cart.add_item("Apple", Price::from_cents(150));

    let json = serde_json::to_value(cart.summary()).unwrap();

    assert_eq!(json["item_count"], 2);
    assert_eq!(json["total"], "$3.00");
    assert_eq!(json["lines"][0]["product_name"], "Apple");
    assert_eq!(json["lines"][0]["subtotal"], "$3.00");
}

// =============================================================================
// Order formatting
// =============================================================================

#[test]
fn empty_cart_formats_with_zero_total() {
    let message = format_order(&customer(), &[]);

    assert!(message.contains("*PRODUCTS:*"));
    assert!(message.contains("*ORDER TOTAL: $0.00*"));
}

#[test]
fn customer_fields_appear_in_form_order() {
    let message = format_order(&customer(), &[]);

    let positions: Vec<usize> = ["Ana Ruiz", "+593 99 123 4567", "ana@example.com", "Av. Amazonas 100"]
        .iter()
        .map(|field| message.find(field).unwrap())
        .collect();

    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
}

#[test]
fn total_equals_sum_of_rounded_lines_for_cent_prices() {
    let mut cart = Cart::new();
    cart.add_item("Apple", Price::from_cents(150));
    cart.add_item("Bread", Price::from_cents(425));
    cart.add_item("Bread", Price::from_cents(425));

    let message = format_order(&customer(), cart.lines());

    assert!(message.contains("✅ Apple x1 ($1.50)\n"));
    assert!(message.contains("✅ Bread x2 ($8.50)\n"));
    assert!(message.contains("*ORDER TOTAL: $10.00*"));
}

#[test]
fn multiline_address_stays_on_one_line() {
    let mut details = customer();
    details.address = "Av. Amazonas 100\nPiso 3".to_string();

    let message = format_order(&details, &[]);

    assert!(message.contains("📍 Delivery address: Av. Amazonas 100 Piso 3\n"));
}

// =============================================================================
// Deep link
// =============================================================================

#[test]
fn link_percent_encodes_the_message() {
    let mut cart = Cart::new();
    cart.add_item("Piña & Coco", Price::from_cents(275));

    let link = prepare_order(&order_config(), &customer(), cart.lines()).unwrap();

    let prefix = format!("https://wa.me/{ORDER_PHONE}?text=");
    let encoded = link.url().strip_prefix(&prefix).unwrap();
    assert!(!encoded.contains(' '));
    assert!(!encoded.contains('\n'));
    assert!(!encoded.contains('&'));
    assert!(link.message().contains("✅ Piña & Coco x1 ($2.75)"));
}

#[test]
fn custom_link_base() {
    let config = OrderConfig {
        phone: ORDER_PHONE.to_string(),
        link_base: "https://api.whatsapp.com/send".to_string(),
    };

    let link = OrderLink::build(&config, "hola");

    assert_eq!(
        link.url(),
        format!("https://api.whatsapp.com/send/{ORDER_PHONE}?text=hola")
    );
}

#[test]
fn incomplete_customer_blocks_the_order() {
    let mut cart = Cart::new();
    cart.add_item("Apple", Price::from_cents(150));

    let blank = CustomerDetails::default();
    let err = prepare_order(&order_config(), &blank, cart.lines()).unwrap_err();

    assert!(matches!(err, OrderError::Customer(_)));
    assert_eq!(err.to_string(), "incomplete customer details: name is required");
}
