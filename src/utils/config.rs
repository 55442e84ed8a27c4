use std::env;

use anyhow::Context;

use crate::models::PricingConfig;
use crate::services::OrderCalculator;

#[derive(Debug, Clone)]
pub struct Config {
    pub tax_rate: f64,
    pub free_shipping_threshold: f64,
    pub shipping_cost: f64,
    pub log_level: String,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        let pricing = PricingConfig::default();
        Self {
            tax_rate: pricing.tax_rate,
            free_shipping_threshold: pricing.free_shipping_threshold,
            shipping_cost: pricing.shipping_cost,
            log_level: "info".to_string(),
            environment: "development".to_string(),
        }
    }
}

fn env_number(key: &str, default: f64) -> anyhow::Result<f64> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .with_context(|| format!("{} must be a number, got '{}'", key, raw)),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_current_env()
    }

    /// Like `from_env`, minus the `.env` lookup.
    pub fn from_current_env() -> anyhow::Result<Self> {
        let defaults = Config::default();
        let config = Config {
            tax_rate: env_number("ORDER_TAX_RATE", defaults.tax_rate)?,
            free_shipping_threshold: env_number(
                "ORDER_FREE_SHIPPING_THRESHOLD",
                defaults.free_shipping_threshold,
            )?,
            shipping_cost: env_number("ORDER_SHIPPING_COST", defaults.shipping_cost)?,
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            environment: env::var("APP_ENV").unwrap_or(defaults.environment),
        };

        tracing::debug!("Config: loaded for {} environment", config.environment);
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        OrderCalculator::with_config(self.pricing())
            .map(|_| ())
            .context("Invalid pricing configuration")
    }

    pub fn pricing(&self) -> PricingConfig {
        PricingConfig::new(self.tax_rate, self.free_shipping_threshold, self.shipping_cost)
    }

    pub fn with_overrides(
        mut self,
        tax_rate: Option<f64>,
        free_shipping_threshold: Option<f64>,
        shipping_cost: Option<f64>,
    ) -> anyhow::Result<Self> {
        if let Some(tax_rate) = tax_rate {
            self.tax_rate = tax_rate;
        }
        if let Some(threshold) = free_shipping_threshold {
            self.free_shipping_threshold = threshold;
        }
        if let Some(shipping_cost) = shipping_cost {
            self.shipping_cost = shipping_cost;
        }
        self.validate()?;
        Ok(self)
    }
}
