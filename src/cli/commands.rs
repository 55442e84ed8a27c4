use std::path::Path;

use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use tracing::{debug, error, info};

use crate::{
    cli::args::*,
    models::{AddItemRequest, OrderSummary},
    services::{OrderCalculator, OrderError},
    utils::{
        config::Config,
        formatting::{format_items_table, format_pricing_config, format_summary, format_summary_json},
        parsing::{parse_discount, parse_item_spec, parse_price, parse_quantity},
    },
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
static CART: Emoji<'_, '_> = Emoji("🛒 ", "");

const SHELL_ACTIONS: [&str; 6] = [
    "Add item",
    "Remove item",
    "List items",
    "Show total",
    "Clear order",
    "Quit",
];

pub fn init_tracing(verbose: bool, log_level: &str) {
    let filter = if verbose { "debug" } else { log_level };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Read a JSON array of line items, e.g. `[{"name": "Widget", "price": 9.5, "quantity": 2}]`.
pub fn load_cart_file(path: &Path) -> Result<Vec<AddItemRequest>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read cart file {}", path.display()))?;
    let items: Vec<AddItemRequest> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid cart file {}", path.display()))?;
    debug!("Loaded {} items from {}", items.len(), path.display());
    Ok(items)
}

pub struct CliApp {
    config: Config,
}

impl CliApp {
    pub fn new(pricing: &PricingArgs) -> Result<Self> {
        let config = Config::from_env()
            .context("Failed to load configuration")?
            .with_overrides(
                pricing.tax_rate,
                pricing.free_shipping_threshold,
                pricing.shipping_cost,
            )
            .context("Invalid pricing options")?;
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn calculator(&self) -> Result<OrderCalculator> {
        OrderCalculator::with_config(self.config.pricing()).context("Invalid pricing configuration")
    }

    pub fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Quote {
                items,
                cart,
                discount,
                format,
            } => self.handle_quote(&items, cart.as_deref().map(Path::new), &discount, format),
            Commands::Shell => self.handle_shell(),
            Commands::Config { command } => self.handle_config_command(command),
        }
    }

    /// Price the given items; file items are added before command-line items.
    ///
    /// An empty cart is reported before a bad discount, as `calculate_total` does.
    pub fn build_quote(
        &self,
        items: &[String],
        cart: Option<&Path>,
        discount: &str,
    ) -> Result<OrderSummary> {
        let mut calculator = self.calculator()?;

        if let Some(path) = cart {
            for request in load_cart_file(path)? {
                let name = request.name.clone();
                calculator
                    .add(request)
                    .with_context(|| format!("Cannot add '{}' from cart file", name))?;
            }
        }

        for spec in items {
            let request = parse_item_spec(spec)?;
            calculator
                .add(request)
                .with_context(|| format!("Cannot add '{}'", spec))?;
        }

        if calculator.is_empty() {
            return Err(OrderError::EmptyOrder.into());
        }
        let discount = parse_discount(discount)?;
        let summary = calculator.summary(discount)?;
        Ok(summary)
    }

    fn handle_quote(
        &self,
        items: &[String],
        cart: Option<&Path>,
        discount: &str,
        format: OutputFormat,
    ) -> Result<()> {
        let summary = self.build_quote(items, cart, discount)?;
        info!("Quoted {} items, total {:.2}", summary.total_items, summary.total);

        match format {
            OutputFormat::Table => print!("{}", format_summary(&summary)),
            OutputFormat::Json => println!("{}", format_summary_json(&summary)?),
        }
        Ok(())
    }

    fn handle_config_command(&self, command: ConfigCommands) -> Result<()> {
        match command {
            ConfigCommands::Show => {
                println!("{} {}", INFO, style("Pricing configuration").bold().cyan());
                print!("{}", format_pricing_config(&self.config.pricing()));
                println!("{}: {}", style("Environment").bold(), self.config.environment);
                Ok(())
            }
        }
    }

    fn handle_shell(&self) -> Result<()> {
        let mut calculator = self.calculator()?;
        let theme = ColorfulTheme::default();

        println!("{} {}", CART, style("Order shell").bold().cyan());

        loop {
            let action = Select::with_theme(&theme)
                .with_prompt("What next?")
                .items(&SHELL_ACTIONS)
                .default(0)
                .interact()?;

            let outcome = match action {
                0 => self.shell_add(&theme, &mut calculator),
                1 => self.shell_remove(&theme, &mut calculator),
                2 => {
                    self.shell_list(&calculator);
                    Ok(())
                }
                3 => self.shell_total(&theme, &calculator),
                4 => self.shell_clear(&theme, &mut calculator),
                _ => break,
            };

            if let Err(e) = outcome {
                match e.downcast_ref::<OrderError>() {
                    Some(order_error) => {
                        println!("{} {}", CROSS, style(order_error).red());
                    }
                    None => {
                        error!("Shell action failed: {}", e);
                        return Err(e);
                    }
                }
            }
        }

        println!("{} Bye!", CHECKMARK);
        Ok(())
    }

    fn shell_add(&self, theme: &ColorfulTheme, calculator: &mut OrderCalculator) -> Result<()> {
        let name: String = Input::with_theme(theme)
            .with_prompt("Item name")
            .interact_text()?;

        let price: String = Input::with_theme(theme)
            .with_prompt("Unit price")
            .validate_with(|input: &String| -> Result<(), String> {
                parse_price(input).map(|_| ()).map_err(|e| e.to_string())
            })
            .interact_text()?;

        let quantity: String = Input::with_theme(theme)
            .with_prompt("Quantity")
            .default("1".to_string())
            .validate_with(|input: &String| -> Result<(), String> {
                parse_quantity(input).map(|_| ()).map_err(|e| e.to_string())
            })
            .interact_text()?;

        calculator.add_item(&name, parse_price(&price)?, parse_quantity(&quantity)?)?;
        println!(
            "{} '{}' now x{}",
            CHECKMARK,
            style(&name).green(),
            calculator.item_quantity(&name)
        );
        Ok(())
    }

    fn shell_remove(&self, theme: &ColorfulTheme, calculator: &mut OrderCalculator) -> Result<()> {
        let names = calculator.list_items();
        if names.is_empty() {
            println!("{} The order is empty", INFO);
            return Ok(());
        }

        let index = Select::with_theme(theme)
            .with_prompt("Remove which item?")
            .items(&names)
            .interact()?;

        let removed = calculator.remove_item(&names[index])?;
        println!("{} Removed '{}'", CHECKMARK, style(&removed.name).green());
        Ok(())
    }

    fn shell_list(&self, calculator: &OrderCalculator) {
        if calculator.is_empty() {
            println!("{} The order is empty", INFO);
        } else {
            println!("{}", format_items_table(calculator.line_items()));
            println!("{}: {}", style("Items").bold(), calculator.total_items());
        }
    }

    fn shell_total(&self, theme: &ColorfulTheme, calculator: &OrderCalculator) -> Result<()> {
        let discount: String = Input::with_theme(theme)
            .with_prompt("Discount (0.0 - 1.0)")
            .default("0".to_string())
            .validate_with(|input: &String| -> Result<(), String> {
                parse_discount(input).map(|_| ()).map_err(|e| e.to_string())
            })
            .interact_text()?;

        let summary = calculator.summary(parse_discount(&discount)?)?;
        print!("{}", format_summary(&summary));
        Ok(())
    }

    fn shell_clear(&self, theme: &ColorfulTheme, calculator: &mut OrderCalculator) -> Result<()> {
        let confirmed = Confirm::with_theme(theme)
            .with_prompt("Remove every item from the order?")
            .default(false)
            .interact()?;

        if confirmed {
            calculator.clear_order();
            println!("{} Order cleared", CHECKMARK);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ErrorKind;
    use std::io::Write;

    fn app() -> CliApp {
        CliApp::with_config(Config::default())
    }

    #[test]
    fn test_build_quote_from_item_specs() {
        let summary = app()
            .build_quote(&["Widget=100".to_string()], None, "0.1")
            .unwrap();
        assert!((summary.total - 123.0).abs() < 1e-9);
        assert_eq!(summary.shipping, 10.0);
    }

    #[test]
    fn test_build_quote_merges_cart_file_and_specs() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "Widget", "price": 20.0, "quantity": 2}}, {{"name": "Gadget", "price": 5.0}}]"#
        )
        .unwrap();

        let summary = app()
            .build_quote(&["Widget=20x3".to_string()], Some(file.path()), "0")
            .unwrap();
        assert_eq!(summary.total_items, 6);
        assert_eq!(summary.subtotal, 105.0);
        assert_eq!(summary.shipping, 0.0);
    }

    #[test]
    fn test_build_quote_rejects_price_conflict() {
        let err = app()
            .build_quote(
                &["Widget=20".to_string(), "Widget=25".to_string()],
                None,
                "0",
            )
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OrderError>(),
            Some(OrderError::PriceConflict { .. })
        ));
    }

    #[test]
    fn test_build_quote_of_empty_cart_fails() {
        let err = app().build_quote(&[], None, "0").unwrap_err();
        assert_eq!(err.downcast_ref::<OrderError>(), Some(&OrderError::EmptyOrder));
    }

    #[test]
    fn test_empty_cart_is_reported_before_bad_discount() {
        let err = app().build_quote(&[], None, "5").unwrap_err();
        assert_eq!(err.downcast_ref::<OrderError>(), Some(&OrderError::EmptyOrder));
    }

    #[test]
    fn test_build_quote_rejects_bad_discount() {
        let err = app()
            .build_quote(&["Widget=10".to_string()], None, "5")
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<OrderError>().map(OrderError::kind),
            Some(ErrorKind::Value)
        );
    }

    #[test]
    fn test_load_cart_file_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name": "Widget", "price": "cheap"}}]"#).unwrap();
        assert!(load_cart_file(file.path()).is_err());
    }
}
