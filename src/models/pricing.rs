use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::line_item::LineItem;

pub const DEFAULT_TAX_RATE: f64 = 0.23;
pub const DEFAULT_FREE_SHIPPING_THRESHOLD: f64 = 100.0;
pub const DEFAULT_SHIPPING_COST: f64 = 10.0;

/// Pricing parameters fixed at construction of an order calculator.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, Copy, PartialEq)]
pub struct PricingConfig {
    #[validate(range(min = 0.0, max = 1.0, message = "Tax rate must be between 0.0 and 1.0"))]
    pub tax_rate: f64,

    #[validate(range(min = 0.0, message = "Free shipping threshold must not be negative"))]
    pub free_shipping_threshold: f64,

    #[validate(range(min = 0.0, message = "Shipping cost must not be negative"))]
    pub shipping_cost: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
            free_shipping_threshold: DEFAULT_FREE_SHIPPING_THRESHOLD,
            shipping_cost: DEFAULT_SHIPPING_COST,
        }
    }
}

impl PricingConfig {
    pub fn new(tax_rate: f64, free_shipping_threshold: f64, shipping_cost: f64) -> Self {
        Self {
            tax_rate,
            free_shipping_threshold,
            shipping_cost,
        }
    }

    #[allow(dead_code)]
    pub fn with_tax_rate(mut self, tax_rate: f64) -> Self {
        self.tax_rate = tax_rate;
        self
    }

    #[allow(dead_code)]
    pub fn with_free_shipping_threshold(mut self, threshold: f64) -> Self {
        self.free_shipping_threshold = threshold;
        self
    }

    #[allow(dead_code)]
    pub fn with_shipping_cost(mut self, shipping_cost: f64) -> Self {
        self.shipping_cost = shipping_cost;
        self
    }
}

// Breakdown of one order total computation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OrderSummary {
    pub items: Vec<LineItem>,
    pub total_items: u64,
    pub subtotal: f64,
    pub discount: f64,
    pub discount_amount: f64,
    pub discounted_subtotal: f64,
    pub shipping: f64,
    pub tax: f64,
    pub total: f64,
}

impl OrderSummary {
    pub fn has_free_shipping(&self) -> bool {
        self.shipping == 0.0
    }
}
