use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A named entry in the cart with its unit price and quantity.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LineItem {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

impl LineItem {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

// request dto
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct AddItemRequest {
    #[validate(length(min = 1, message = "Item name must not be empty"))]
    #[validate(custom = "validate_name")]
    pub name: String,

    pub price: f64,

    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, message = "Quantity must be a positive integer"))]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("Item name must not be blank"));
    }
    Ok(())
}

impl AddItemRequest {
    pub fn new(name: impl Into<String>, price: f64, quantity: u32) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
        }
    }
}

impl From<AddItemRequest> for LineItem {
    fn from(request: AddItemRequest) -> Self {
        Self {
            name: request.name,
            price: request.price,
            quantity: request.quantity,
        }
    }
}
