use regex::Regex;

use crate::models::AddItemRequest;
use crate::services::OrderError;

lazy_static::lazy_static! {
    // NAME=PRICE or NAME=PRICExQTY, e.g. "Widget=19.99x3"
    static ref ITEM_SPEC_REGEX: Regex =
        Regex::new(r"^(?P<name>[^=]+)=(?P<price>[^x]+?)(?:x(?P<quantity>.+))?$").unwrap();
}

fn parse_number(field: &str, input: &str) -> Result<f64, OrderError> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| OrderError::invalid_type(field, "a finite number"))
}

pub fn parse_price(input: &str) -> Result<f64, OrderError> {
    let price = parse_number("price", input)?;
    if price <= 0.0 {
        return Err(OrderError::invalid_value("Price must be greater than zero"));
    }
    Ok(price)
}

/// Negative integers are a value error, anything that isn't an integer is a type error.
pub fn parse_quantity(input: &str) -> Result<u32, OrderError> {
    let quantity = input
        .trim()
        .parse::<i64>()
        .map_err(|_| OrderError::invalid_type("quantity", "an integer"))?;
    if quantity <= 0 {
        return Err(OrderError::invalid_value(
            "Quantity must be a positive integer",
        ));
    }
    u32::try_from(quantity).map_err(|_| OrderError::invalid_value("Quantity is too large"))
}

pub fn parse_discount(input: &str) -> Result<f64, OrderError> {
    let discount = parse_number("discount", input)?;
    if !(0.0..=1.0).contains(&discount) {
        return Err(OrderError::invalid_value(
            "Discount must be between 0.0 and 1.0",
        ));
    }
    Ok(discount)
}

pub fn parse_item_spec(input: &str) -> Result<AddItemRequest, OrderError> {
    let captures = ITEM_SPEC_REGEX.captures(input.trim()).ok_or_else(|| {
        OrderError::invalid_value(format!(
            "Invalid item '{}', expected NAME=PRICE or NAME=PRICExQTY",
            input
        ))
    })?;

    let name = captures["name"].trim().to_string();
    let price = parse_price(&captures["price"])?;
    let quantity = match captures.name("quantity") {
        Some(quantity) => parse_quantity(quantity.as_str())?,
        None => 1,
    };

    Ok(AddItemRequest::new(name, price, quantity))
}
