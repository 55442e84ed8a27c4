use console::style;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use crate::models::{LineItem, OrderSummary, PricingConfig};

#[derive(Tabled)]
struct LineItemTableRow {
    #[tabled(rename = "Item")]
    name: String,
    #[tabled(rename = "Unit Price")]
    price: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Line Total")]
    line_total: String,
}

pub fn format_money(amount: f64) -> String {
    format!("{:.2}", amount)
}

pub fn format_items_table(items: &[LineItem]) -> String {
    if items.is_empty() {
        return String::new();
    }

    let rows: Vec<LineItemTableRow> = items
        .iter()
        .map(|item| LineItemTableRow {
            name: if item.name.chars().count() > 30 {
                format!("{}...", item.name.chars().take(27).collect::<String>())
            } else {
                item.name.clone()
            },
            price: format_money(item.price),
            quantity: item.quantity,
            line_total: format_money(item.line_total()),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left())
        .modify(Columns::new(1..), Alignment::right());

    table.to_string()
}

pub fn format_summary(summary: &OrderSummary) -> String {
    let mut output = String::new();

    output.push_str(&format_items_table(&summary.items));
    output.push('\n');
    output.push_str(&format!(
        "{}: {}\n",
        style("Items").bold(),
        summary.total_items
    ));
    output.push_str(&format!(
        "{}: {}\n",
        style("Subtotal").bold(),
        format_money(summary.subtotal)
    ));

    if summary.discount > 0.0 {
        output.push_str(&format!(
            "{}: -{} ({:.1}%)\n",
            style("Discount").bold(),
            style(format_money(summary.discount_amount)).green(),
            summary.discount * 100.0
        ));
    }

    let shipping = if summary.has_free_shipping() {
        style("free".to_string()).green()
    } else {
        style(format_money(summary.shipping)).yellow()
    };
    output.push_str(&format!("{}: {}\n", style("Shipping").bold(), shipping));
    output.push_str(&format!(
        "{}: {}\n",
        style("Tax").bold(),
        format_money(summary.tax)
    ));
    output.push_str(&format!(
        "{}: {}\n",
        style("Total").bold(),
        style(format_money(summary.total)).cyan().bold()
    ));

    output
}

pub fn format_pricing_config(config: &PricingConfig) -> String {
    format!(
        "{}: {:.2}%\n{}: {}\n{}: {}\n",
        style("Tax rate").bold(),
        config.tax_rate * 100.0,
        style("Free shipping from").bold(),
        format_money(config.free_shipping_threshold),
        style("Shipping cost").bold(),
        format_money(config.shipping_cost),
    )
}

pub fn format_summary_json(summary: &OrderSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}
