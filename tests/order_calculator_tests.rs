use order_calculator::{AddItemRequest, ErrorKind, OrderCalculator, OrderError, PricingConfig};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

fn default_calculator() -> OrderCalculator {
    OrderCalculator::new(0.23, 100.0, 10.0).expect("default pricing is valid")
}

#[test]
fn test_total_below_free_shipping_threshold() {
    let mut calc = default_calculator();
    calc.add_item("Widget", 100.0, 1).unwrap();

    let summary = calc.summary(0.1).unwrap();
    assert_close(summary.discounted_subtotal, 90.0);
    assert_close(summary.shipping, 10.0);
    assert_close(summary.tax, 23.0);
    assert_close(summary.total, 123.0);
    assert_close(calc.calculate_total(0.1).unwrap(), 123.0);
}

#[test]
fn test_total_above_free_shipping_threshold() {
    let mut calc = default_calculator();
    calc.add_item("Item", 200.0, 1).unwrap();

    let summary = calc.summary(0.1).unwrap();
    assert_close(summary.discounted_subtotal, 180.0);
    assert_eq!(summary.shipping, 0.0);
    assert_close(summary.tax, 41.4);
    assert_close(summary.total, 221.4);
}

#[test]
fn test_total_without_discount() {
    let mut calc = default_calculator();
    calc.add_item("Pen", 2.5, 4).unwrap();

    // 10.00 + 10.00 shipping, taxed at 23%
    assert_close(calc.calculate_total(0.0).unwrap(), 24.6);
}

#[test]
fn test_total_of_empty_order_is_value_error() {
    let err = default_calculator().calculate_total(0.0).unwrap_err();
    assert_eq!(err, OrderError::EmptyOrder);
    assert_eq!(err.kind(), ErrorKind::Value);
}

#[test]
fn test_total_with_invalid_discount() {
    let mut calc = default_calculator();
    calc.add_item("Pen", 2.5, 4).unwrap();

    assert_eq!(calc.calculate_total(1.5).unwrap_err().kind(), ErrorKind::Value);
    assert_eq!(calc.calculate_total(-0.5).unwrap_err().kind(), ErrorKind::Value);
    assert_eq!(
        calc.calculate_total(f64::NAN).unwrap_err().kind(),
        ErrorKind::Type
    );
}

#[test]
fn test_negative_tax_rate_rejected_at_construction() {
    let err = OrderCalculator::new(-0.1, 100.0, 10.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Value);
}

#[test]
fn test_with_config_uses_given_pricing() {
    let config = PricingConfig::default()
        .with_tax_rate(0.0)
        .with_shipping_cost(5.0)
        .with_free_shipping_threshold(50.0);
    let mut calc = OrderCalculator::with_config(config).unwrap();
    calc.add_item("Book", 20.0, 2).unwrap();

    assert_eq!(calc.config(), &config);
    assert_close(calc.calculate_total(0.0).unwrap(), 45.0);
}

#[test]
fn test_adding_increases_total_items_by_quantity() {
    let mut calc = default_calculator();
    let mut expected = 0;

    for (name, price, quantity) in [("A", 1.0, 1), ("B", 0.5, 7), ("A", 1.0, 3), ("C", 99.0, 12)] {
        calc.add_item(name, price, quantity).unwrap();
        expected += u64::from(quantity);
        assert_eq!(calc.total_items(), expected);
    }
    assert_eq!(calc.list_items(), vec!["A", "B", "C"]);
}

#[test]
fn test_conflicting_price_leaves_order_unchanged() {
    let mut calc = default_calculator();
    calc.add_item("Lamp", 30.0, 2).unwrap();
    let before = calc.line_items().to_vec();

    let err = calc
        .add(AddItemRequest::new("Lamp", 31.0, 1))
        .unwrap_err();
    assert_eq!(
        err,
        OrderError::PriceConflict {
            name: "Lamp".to_string(),
            existing: 30.0,
            requested: 31.0,
        }
    );
    assert_eq!(calc.line_items(), before.as_slice());
}

#[test]
fn test_add_then_remove_only_item_empties_order() {
    let mut calc = default_calculator();
    calc.add_item("Lamp", 30.0, 2).unwrap();
    calc.remove_item("Lamp").unwrap();

    assert!(calc.is_empty());
    assert_eq!(calc.total_items(), 0);
    assert_eq!(calc.get_subtotal(), Err(OrderError::EmptyOrder));
}

#[test]
fn test_shipping_boundary() {
    let calc = default_calculator();
    for amount in [100.0, 100.01, 1_000_000.0] {
        assert_eq!(calc.calculate_shipping(amount).unwrap(), 0.0);
    }
    for amount in [0.0, 1.0, 99.999] {
        assert_eq!(calc.calculate_shipping(amount).unwrap(), 10.0);
    }
}

#[test]
fn test_tax_is_amount_times_rate() {
    let calc = default_calculator();
    for amount in [0.0, 1.0, 57.31, 1234.5] {
        assert_eq!(calc.calculate_tax(amount).unwrap(), amount * 0.23);
    }
    assert_eq!(calc.calculate_tax(-0.01).unwrap_err().kind(), ErrorKind::Value);
}

#[test]
fn test_discount_edges() {
    let calc = default_calculator();
    for subtotal in [0.0, 12.34, 500.0] {
        assert_eq!(calc.apply_discount(subtotal, 0.0).unwrap(), subtotal);
        assert_eq!(calc.apply_discount(subtotal, 1.0).unwrap(), 0.0);
    }
}

#[test]
fn test_clear_order_then_reuse() {
    let mut calc = default_calculator();
    calc.add_item("Lamp", 30.0, 2).unwrap();
    calc.clear_order();
    assert!(calc.is_empty());

    calc.add_item("Lamp", 25.0, 1).unwrap();
    assert_eq!(calc.get_item("Lamp").unwrap().price, 25.0);
}
