//! Text formatting for invoice values

use crate::settings::AmountFormat;
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Round a money value for display (2 places, half away from zero)
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `$1234.50` style: symbol followed by exactly two decimals
pub fn format_currency(symbol: &str, value: Decimal) -> String {
    format!("{symbol}{:.2}", round_money(value))
}

/// Line amount, as configured by [`AmountFormat`]
pub fn format_amount(symbol: &str, value: Decimal, format: AmountFormat) -> String {
    match format {
        AmountFormat::Raw => format!("{symbol}{}", value.normalize()),
        AmountFormat::TwoDecimals => format_currency(symbol, value),
    }
}

/// Quantity without trailing zeros ("40", "1.5")
pub fn format_quantity(quantity: Decimal) -> String {
    quantity.normalize().to_string()
}

/// Summary row label for the tax, e.g. `GST (12%)`
pub fn format_tax_label(label: &str, rate: Decimal) -> String {
    format!("{label} ({}%)", rate.normalize())
}

/// `DD-MM-YYYY`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}
