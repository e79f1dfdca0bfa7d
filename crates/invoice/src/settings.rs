//! Per-invoice settings

use crate::{InvoiceError, Result};
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Data rows in the line-items table
pub const MAX_DISPLAYED_ITEMS: usize = 10;

/// Days between the invoice date and the due date
pub const DEFAULT_GRACE_DAYS: u64 = 7;

/// Default sales tax, in percent
pub const DEFAULT_TAX_RATE_PERCENT: i64 = 5;

/// What to do with items that don't fit in the items table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemOverflow {
    /// Drop them (they count towards nothing) and log a warning
    #[default]
    Truncate,
    /// Refuse to build the table
    Reject,
}

/// How the AMOUNT column is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountFormat {
    /// Exact value without forced decimals ("$2400", "$30.5")
    #[default]
    Raw,
    /// Always two decimals ("$2400.00"), like the unit price column
    TwoDecimals,
}

/// Settings of a single invoice run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceSettings {
    pub number: u32,
    /// Issue date. Always supplied by the caller.
    pub date: NaiveDate,
    pub grace_days: u64,
    /// Tax rate in percent (5 means 5%)
    pub tax_rate: Decimal,
    /// Name of the tax in the summary row, e.g. "GST"
    pub tax_label: String,
    pub currency: String,
    pub max_displayed_items: usize,
    pub overflow: ItemOverflow,
    pub amount_format: AmountFormat,
}

impl InvoiceSettings {
    /// Default settings for an invoice issued on `date`
    pub fn new(date: NaiveDate) -> Self {
        Self {
            number: 1,
            date,
            grace_days: DEFAULT_GRACE_DAYS,
            tax_rate: Decimal::from(DEFAULT_TAX_RATE_PERCENT),
            tax_label: "GST".to_string(),
            currency: "$".to_string(),
            max_displayed_items: MAX_DISPLAYED_ITEMS,
            overflow: ItemOverflow::default(),
            amount_format: AmountFormat::default(),
        }
    }

    /// Invoice date plus the grace period
    ///
    /// Saturates at the latest representable date.
    pub fn due_date(&self) -> NaiveDate {
        self.date
            .checked_add_days(Days::new(self.grace_days))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Reject settings the composer cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.number == 0 {
            return Err(InvoiceError::InvalidSettings(
                "invoice number must be positive".to_string(),
            ));
        }
        if self.tax_rate.is_sign_negative() {
            return Err(InvoiceError::InvalidSettings(format!(
                "tax rate must not be negative (got {})",
                self.tax_rate
            )));
        }
        if self.max_displayed_items == 0 {
            return Err(InvoiceError::InvalidSettings(
                "items table needs at least one row".to_string(),
            ));
        }
        Ok(())
    }
}
