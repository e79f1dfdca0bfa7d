//! Invoice data files
//!
//! ```json
//! {
//!   "company":  { "name": "XYZ Inc.", "tax_id": "123456789RT0001", ... },
//!   "client":   { "billing_info": { ... }, "shipping_info": { ... } },
//!   "items":    [ { "description": "Engineering Hours", "quantity": 40, "unit_price": "60" } ],
//!   "settings": { "number": 7, "tax_rate": 12, "overflow": "reject" }
//! }
//! ```
//!
//! Every section and every settings field is optional.

use crate::model::{BillableItem, Client, ClientInfo, Company};
use crate::settings::{AmountFormat, InvoiceSettings, ItemOverflow};
use crate::Result;
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings as read from a data file, before defaults are filled in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsOverrides {
    pub number: Option<u32>,
    pub date: Option<NaiveDate>,
    pub grace_days: Option<u64>,
    pub tax_rate: Option<Decimal>,
    pub tax_label: Option<String>,
    pub currency: Option<String>,
    pub max_displayed_items: Option<usize>,
    pub overflow: Option<ItemOverflow>,
    pub amount_format: Option<AmountFormat>,
    /// Logo path or URI
    pub logo: Option<String>,
}

impl SettingsOverrides {
    /// Fill unset fields with defaults, using `today` when no date is set
    pub fn resolve(&self, today: NaiveDate) -> InvoiceSettings {
        let mut settings = InvoiceSettings::new(self.date.unwrap_or(today));
        if let Some(number) = self.number {
            settings.number = number;
        }
        if let Some(grace_days) = self.grace_days {
            settings.grace_days = grace_days;
        }
        if let Some(tax_rate) = self.tax_rate {
            settings.tax_rate = tax_rate;
        }
        if let Some(label) = &self.tax_label {
            settings.tax_label = label.clone();
        }
        if let Some(currency) = &self.currency {
            settings.currency = currency.clone();
        }
        if let Some(max) = self.max_displayed_items {
            settings.max_displayed_items = max;
        }
        if let Some(overflow) = self.overflow {
            settings.overflow = overflow;
        }
        if let Some(format) = self.amount_format {
            settings.amount_format = format;
        }
        settings
    }
}

/// Everything needed to compose one invoice
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceData {
    pub company: Company,
    pub client: Client,
    pub items: Vec<BillableItem>,
    pub settings: SettingsOverrides,
}

impl InvoiceData {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("loading invoice data from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Demo invoice from XYZ Inc. to ABC Inc. dated `date`
    pub fn sample(date: NaiveDate) -> Self {
        let company = Company::new(
            "XYZ Inc.",
            "123 Main St, Victoria, BC, Canada",
            "1-234-567-8910",
            "billing@xyz.ca",
            "www.xyz.ca",
        );
        let client = Client::same(ClientInfo::new(
            "Accounts Payable",
            "ABC Inc.",
            "321 Secondary St",
            "Victoria, BC, Canada",
            "1-234-567-8911",
        ));
        let items = vec![
            BillableItem::new("Engineering Hours", Decimal::from(40), Decimal::from(60)),
            BillableItem::new("Consulting fees", Decimal::from(12), Decimal::from(120)),
        ];

        Self {
            company,
            client,
            items,
            settings: SettingsOverrides {
                date: Some(date),
                ..SettingsOverrides::default()
            },
        }
    }
}
