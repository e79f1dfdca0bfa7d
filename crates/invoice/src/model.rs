//! Billing data model
//!
//! Plain records. Nothing here is validated: a missing field deserializes
//! to an empty string and renders as empty text.

use crate::{InvoiceError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The company issuing the invoice
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    /// Sales tax registration number (e.g. a GST number)
    #[serde(alias = "gst_num")]
    pub tax_id: String,
}

impl Company {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        website: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            phone: phone.into(),
            email: email.into(),
            website: website.into(),
            tax_id: String::new(),
        }
    }

    pub fn with_tax_id(mut self, tax_id: impl Into<String>) -> Self {
        self.tax_id = tax_id.into();
        self
    }
}

/// One address block of a client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientInfo {
    pub recipient: String,
    pub company_name: String,
    pub street_address: String,
    /// City, region and postal code on one line
    #[serde(alias = "city_province_areacode")]
    pub city_region_postal: String,
    pub phone: String,
}

impl ClientInfo {
    pub fn new(
        recipient: impl Into<String>,
        company_name: impl Into<String>,
        street_address: impl Into<String>,
        city_region_postal: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            company_name: company_name.into(),
            street_address: street_address.into(),
            city_region_postal: city_region_postal.into(),
            phone: phone.into(),
        }
    }

    /// Fields in display order
    pub fn lines(&self) -> [&str; 5] {
        [
            &self.recipient,
            &self.company_name,
            &self.street_address,
            &self.city_region_postal,
            &self.phone,
        ]
    }
}

/// The invoiced client with separate billing and shipping addresses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Client {
    pub billing_info: ClientInfo,
    pub shipping_info: ClientInfo,
}

impl Client {
    pub fn new(billing_info: ClientInfo, shipping_info: ClientInfo) -> Self {
        Self {
            billing_info,
            shipping_info,
        }
    }

    /// Client that ships to its billing address
    pub fn same(info: ClientInfo) -> Self {
        Self {
            billing_info: info.clone(),
            shipping_info: info,
        }
    }
}

/// A line on the invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillableItem {
    #[serde(default, alias = "item_description")]
    pub description: String,
    #[serde(alias = "item_quantity")]
    pub quantity: Decimal,
    #[serde(alias = "item_unit_price")]
    pub unit_price: Decimal,
}

impl BillableItem {
    pub fn new(description: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
        }
    }

    /// quantity x unit price
    pub fn amount(&self) -> Result<Decimal> {
        self.quantity.checked_mul(self.unit_price).ok_or_else(|| {
            InvoiceError::AmountOverflow(format!(
                "{} x {} for {:?}",
                self.quantity, self.unit_price, self.description
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn test_amount_is_quantity_times_price() {
        let item = BillableItem::new("Engineering Hours", Decimal::from(40), Decimal::from(60));
        assert_eq!(item.amount().unwrap(), Decimal::from(2400));
    }

    #[test]
    fn test_amount_is_exact_for_cents() {
        let item = BillableItem::new(
            "Widgets",
            Decimal::from(3),
            Decimal::from_str("0.10").unwrap(),
        );
        assert_eq!(item.amount().unwrap(), Decimal::from_str("0.3").unwrap());
    }

    #[test]
    fn test_amount_overflow_is_an_error() {
        let item = BillableItem::new(
            "Too much",
            Decimal::from_str("100000000000000000000").unwrap(),
            Decimal::from_str("10000000000").unwrap(),
        );
        let err = item.amount().unwrap_err();
        assert!(matches!(err, InvoiceError::AmountOverflow(_)));
        assert!(err.to_string().contains("Too much"));
    }

    #[test]
    fn test_company_missing_fields_default_empty() {
        let company: Company = serde_json::from_str(r#"{ "name": "XYZ Inc." }"#).unwrap();
        assert_eq!(company.name, "XYZ Inc.");
        assert_eq!(company.address, "");
        assert_eq!(company.tax_id, "");
    }

    #[test]
    fn test_company_accepts_gst_num_alias() {
        let company: Company = serde_json::from_str(r#"{ "gst_num": "123" }"#).unwrap();
        assert_eq!(company.tax_id, "123");
    }

    #[test]
    fn test_client_same_uses_one_record() {
        let info = ClientInfo::new("Jane", "ABC Inc.", "1 Road", "Victoria, BC", "555");
        let client = Client::same(info.clone());
        assert_eq!(client.billing_info, info);
        assert_eq!(client.shipping_info, info);
    }

    #[test]
    fn test_client_info_lines_order() {
        let info = ClientInfo::new("r", "c", "s", "p", "t");
        assert_eq!(info.lines(), ["r", "c", "s", "p", "t"]);
    }

    #[test]
    fn test_item_accepts_numbers_and_strings() {
        let item: BillableItem = serde_json::from_str(
            r#"{ "description": "Consulting", "quantity": 12, "unit_price": "120.50" }"#,
        )
        .unwrap();
        assert_eq!(item.quantity, Decimal::from(12));
        assert_eq!(item.unit_price, Decimal::from_str("120.50").unwrap());
    }

    #[test]
    fn test_legacy_field_names() {
        let item: BillableItem = serde_json::from_str(
            r#"{ "item_description": "Hours", "item_quantity": 2, "item_unit_price": 5 }"#,
        )
        .unwrap();
        assert_eq!(item.description, "Hours");
        assert_eq!(item.amount().unwrap(), Decimal::from(10));

        let info: ClientInfo =
            serde_json::from_str(r#"{ "city_province_areacode": "Victoria, BC V8W" }"#).unwrap();
        assert_eq!(info.city_region_postal, "Victoria, BC V8W");
    }
}
