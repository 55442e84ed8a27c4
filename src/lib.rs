pub mod cli;
pub mod models;
pub mod services;
pub mod utils;

pub use anyhow::{Error, Result};
pub use models::{AddItemRequest, LineItem, OrderSummary, PricingConfig};
pub use services::{ErrorKind, OrderCalculator, OrderError};
