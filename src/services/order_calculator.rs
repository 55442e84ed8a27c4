use thiserror::Error;
use tracing::{debug, info, warn};
use validator::{Validate, ValidationErrors};

use crate::models::{AddItemRequest, LineItem, OrderSummary, PricingConfig};

/// The two families every order error falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An argument was not of the expected type (not a number, not an integer).
    Type,
    /// An argument had the right type but a value outside its domain.
    Value,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrderError {
    #[error("Type error: {field} must be {expected}")]
    InvalidType {
        field: String,
        expected: &'static str,
    },

    #[error("Validation error: {message}")]
    InvalidValue { message: String },

    #[error("Item '{name}' is already in the order at {existing:.2}, cannot add it at {requested:.2}")]
    PriceConflict {
        name: String,
        existing: f64,
        requested: f64,
    },

    #[error("Item '{name}' not found in order")]
    ItemNotFound { name: String },

    #[error("Order is empty")]
    EmptyOrder,
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::InvalidType { .. } => ErrorKind::Type,
            OrderError::InvalidValue { .. }
            | OrderError::PriceConflict { .. }
            | OrderError::ItemNotFound { .. }
            | OrderError::EmptyOrder => ErrorKind::Value,
        }
    }

    pub fn invalid_value(message: impl Into<String>) -> Self {
        OrderError::InvalidValue {
            message: message.into(),
        }
    }

    pub fn invalid_type(field: impl Into<String>, expected: &'static str) -> Self {
        OrderError::InvalidType {
            field: field.into(),
            expected,
        }
    }
}

impl From<ValidationErrors> for OrderError {
    fn from(errors: ValidationErrors) -> Self {
        OrderError::invalid_value(errors.to_string())
    }
}

/// NaN and infinities are not numbers as far as prices and rates go.
fn ensure_number(field: &str, value: f64) -> Result<f64, OrderError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(OrderError::invalid_type(field, "a finite number"))
    }
}

/// Shopping cart plus the subtotal → discount → shipping → tax → total pipeline.
///
/// Line items are kept in insertion order and are unique by name. Every
/// mutation validates first, so a failed call leaves the cart untouched.
#[derive(Debug, Clone)]
pub struct OrderCalculator {
    config: PricingConfig,
    items: Vec<LineItem>,
}

impl Default for OrderCalculator {
    fn default() -> Self {
        Self {
            config: PricingConfig::default(),
            items: Vec::new(),
        }
    }
}

impl OrderCalculator {
    pub fn new(
        tax_rate: f64,
        free_shipping_threshold: f64,
        shipping_cost: f64,
    ) -> Result<Self, OrderError> {
        Self::with_config(PricingConfig::new(
            tax_rate,
            free_shipping_threshold,
            shipping_cost,
        ))
    }

    pub fn with_config(config: PricingConfig) -> Result<Self, OrderError> {
        ensure_number("tax_rate", config.tax_rate)?;
        ensure_number("free_shipping_threshold", config.free_shipping_threshold)?;
        ensure_number("shipping_cost", config.shipping_cost)?;
        config.validate()?;

        debug!(
            "Order calculator created: tax_rate={}, free_shipping_threshold={}, shipping_cost={}",
            config.tax_rate, config.free_shipping_threshold, config.shipping_cost
        );

        Ok(Self {
            config,
            items: Vec::new(),
        })
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub fn add_item(&mut self, name: &str, price: f64, quantity: u32) -> Result<(), OrderError> {
        self.add(AddItemRequest::new(name, price, quantity))
    }

    /// Add a line item, or grow the quantity of an existing one with the same price.
    pub fn add(&mut self, request: AddItemRequest) -> Result<(), OrderError> {
        request.validate().map_err(|e| {
            warn!("Rejected item '{}': {}", request.name, e);
            OrderError::from(e)
        })?;
        ensure_number("price", request.price)?;
        if request.price <= 0.0 {
            warn!("Rejected item '{}': non-positive price {}", request.name, request.price);
            return Err(OrderError::invalid_value("Price must be greater than zero"));
        }

        if let Some(existing) = self.items.iter_mut().find(|item| item.name == request.name) {
            if existing.price != request.price {
                warn!(
                    "Price conflict for '{}': stored {}, requested {}",
                    existing.name, existing.price, request.price
                );
                return Err(OrderError::PriceConflict {
                    name: request.name,
                    existing: existing.price,
                    requested: request.price,
                });
            }

            existing.quantity = existing
                .quantity
                .checked_add(request.quantity)
                .ok_or_else(|| OrderError::invalid_value("Quantity is too large"))?;
            debug!("Increased '{}' to quantity {}", existing.name, existing.quantity);
            return Ok(());
        }

        debug!(
            "Added '{}' x{} at {}",
            request.name, request.quantity, request.price
        );
        self.items.push(LineItem::from(request));
        Ok(())
    }

    /// Remove a line item entirely, returning what was removed.
    pub fn remove_item(&mut self, name: &str) -> Result<LineItem, OrderError> {
        let position = self
            .items
            .iter()
            .position(|item| item.name == name)
            .ok_or_else(|| {
                warn!("Cannot remove '{}': not in order", name);
                OrderError::ItemNotFound {
                    name: name.to_string(),
                }
            })?;

        let removed = self.items.remove(position);
        debug!("Removed '{}' from order", removed.name);
        Ok(removed)
    }

    pub fn get_subtotal(&self) -> Result<f64, OrderError> {
        if self.items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        Ok(self.items.iter().map(LineItem::line_total).sum())
    }

    /// `discount` is a fraction in `[0.0, 1.0]`.
    pub fn apply_discount(&self, subtotal: f64, discount: f64) -> Result<f64, OrderError> {
        ensure_number("subtotal", subtotal)?;
        ensure_number("discount", discount)?;
        if subtotal < 0.0 {
            return Err(OrderError::invalid_value("Subtotal must not be negative"));
        }
        if !(0.0..=1.0).contains(&discount) {
            return Err(OrderError::invalid_value(
                "Discount must be between 0.0 and 1.0",
            ));
        }
        Ok(subtotal * (1.0 - discount))
    }

    pub fn calculate_shipping(&self, discounted_subtotal: f64) -> Result<f64, OrderError> {
        ensure_number("discounted_subtotal", discounted_subtotal)?;
        if discounted_subtotal >= self.config.free_shipping_threshold {
            Ok(0.0)
        } else {
            Ok(self.config.shipping_cost)
        }
    }

    pub fn calculate_tax(&self, amount: f64) -> Result<f64, OrderError> {
        ensure_number("amount", amount)?;
        if amount < 0.0 {
            return Err(OrderError::invalid_value("Taxable amount must not be negative"));
        }
        Ok(amount * self.config.tax_rate)
    }

    pub fn calculate_total(&self, discount: f64) -> Result<f64, OrderError> {
        self.summary(discount).map(|summary| summary.total)
    }

    /// Run the full pricing pipeline and keep every intermediate figure.
    pub fn summary(&self, discount: f64) -> Result<OrderSummary, OrderError> {
        let subtotal = self.get_subtotal()?;
        let discounted_subtotal = self.apply_discount(subtotal, discount)?;
        let shipping = self.calculate_shipping(discounted_subtotal)?;
        let tax = self.calculate_tax(discounted_subtotal + shipping)?;
        let total = discounted_subtotal + shipping + tax;

        info!(
            "Order total: subtotal={:.2}, discounted={:.2}, shipping={:.2}, tax={:.2}, total={:.2}",
            subtotal, discounted_subtotal, shipping, tax, total
        );

        Ok(OrderSummary {
            items: self.items.clone(),
            total_items: self.total_items(),
            subtotal,
            discount,
            discount_amount: subtotal - discounted_subtotal,
            discounted_subtotal,
            shipping,
            tax,
            total,
        })
    }

    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    pub fn clear_order(&mut self) {
        debug!("Clearing {} line items", self.items.len());
        self.items.clear();
    }

    pub fn list_items(&self) -> Vec<String> {
        self.items.iter().map(|item| item.name.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get_item(&self, name: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.name == name)
    }

    pub fn item_quantity(&self, name: &str) -> u32 {
        self.get_item(name).map(|item| item.quantity).unwrap_or(0)
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.items
    }
}
