use clap::{Parser, Subcommand, ValueEnum};
use std::fmt;

#[derive(Parser, Debug)]
#[command(name = "order-calc")]
#[command(about = "Price a shopping cart: subtotal, discount, shipping, tax and total")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub pricing: PricingArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for the pricing configuration loaded from the environment
#[derive(clap::Args, Debug, Default, Clone)]
pub struct PricingArgs {
    /// Tax rate as a fraction (0.0 - 1.0)
    #[arg(long, global = true)]
    pub tax_rate: Option<f64>,

    /// Discounted subtotal from which shipping is free
    #[arg(long, global = true)]
    pub free_shipping_threshold: Option<f64>,

    /// Shipping cost below the free shipping threshold
    #[arg(long, global = true)]
    pub shipping_cost: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Price a cart given on the command line or in a JSON file
    Quote {
        /// Item as NAME=PRICE or NAME=PRICExQTY (repeatable)
        #[arg(short, long = "item")]
        items: Vec<String>,
        /// JSON file holding an array of {"name", "price", "quantity"}
        #[arg(long)]
        cart: Option<String>,
        /// Discount as a fraction (0.0 - 1.0)
        #[arg(short, long, default_value = "0")]
        discount: String,
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
    /// Build a cart interactively
    Shell,
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the resolved pricing configuration
    Show,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
