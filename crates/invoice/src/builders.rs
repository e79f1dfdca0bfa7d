//! Table builders for the three invoice sections
//!
//! Each builder returns a fresh [`Table`] and never touches a document.

use crate::blocks::{Cell, Padding, Table};
use crate::format::{format_amount, format_currency, format_date, format_quantity, format_tax_label};
use crate::model::{BillableItem, Client, Company};
use crate::settings::{InvoiceSettings, ItemOverflow};
use crate::{InvoiceError, Result};
use log::{debug, warn};
use pdf_core::{Align, Color};
use rust_decimal::Decimal;

/// Background of title rows (`#263238`)
pub const HEADER_ROW_COLOR: Color = Color {
    r: 0x26 as f32 / 255.0,
    g: 0x32 as f32 / 255.0,
    b: 0x38 as f32 / 255.0,
};

/// Background of data rows 1, 3, 5... counting from one (`#BBBBBB`)
pub const ODD_ROW_COLOR: Color = Color {
    r: 0xBB as f32 / 255.0,
    g: 0xBB as f32 / 255.0,
    b: 0xBB as f32 / 255.0,
};

/// Background of data rows 2, 4, 6... counting from one (`#FFFFFF`)
pub const EVEN_ROW_COLOR: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
};

const ITEM_HEADINGS: [&str; 4] = ["DESCRIPTION", "QTY", "UNIT PRICE", "AMOUNT"];

/// Background of the `index`-th data row (0-based)
pub fn row_background(index: usize) -> Color {
    if index % 2 == 0 {
        ODD_ROW_COLOR
    } else {
        EVEN_ROW_COLOR
    }
}

/// Subtotal, tax and total of the displayed items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItemTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl LineItemTotals {
    /// Sum `items` in order and apply `tax_rate` (percent)
    ///
    /// Fails with [`InvoiceError::AmountOverflow`] when any step leaves the
    /// range of `Decimal`.
    pub fn compute(items: &[BillableItem], tax_rate: Decimal) -> Result<Self> {
        let mut subtotal = Decimal::ZERO;
        for item in items {
            subtotal = subtotal
                .checked_add(item.amount()?)
                .ok_or_else(|| overflow("subtotal"))?;
        }
        let tax = tax_rate
            .checked_div(Decimal::ONE_HUNDRED)
            .and_then(|rate| subtotal.checked_mul(rate))
            .ok_or_else(|| overflow("tax"))?;
        let total = subtotal.checked_add(tax).ok_or_else(|| overflow("total"))?;
        Ok(Self {
            subtotal,
            tax,
            total,
        })
    }
}

fn overflow(what: &str) -> InvoiceError {
    InvoiceError::AmountOverflow(what.to_string())
}

/// Company details next to the date, number and due date
///
/// 5 rows x 3 columns, borderless, 2pt padding.
pub fn build_header(company: &Company, settings: &InvoiceSettings) -> Result<Table> {
    let labels = [
        ("Date:", format_date(settings.date)),
        ("Invoice #:", settings.number.to_string()),
        ("Due Date:", format_date(settings.due_date())),
    ];
    let company_lines = [
        &company.name,
        &company.address,
        &company.phone,
        &company.email,
        &company.website,
    ];

    let mut table = Table::new(5, 3);
    for (row, line) in company_lines.into_iter().enumerate() {
        table.add(Cell::new(line.as_str()))?;
        match labels.get(row) {
            Some((label, value)) => {
                table.add(Cell::new(*label).bold().align(Align::Right))?;
                table.add(Cell::new(value.as_str()))?;
            }
            None => {
                table.add(Cell::blank())?;
                table.add(Cell::blank())?;
            }
        }
    }

    table.set_padding_on_all_cells(2.0, 2.0, 2.0, 2.0).no_borders();
    Ok(table)
}

/// Billing and shipping addresses side by side
///
/// 6 rows x 2 columns, borderless, 2pt padding.
pub fn build_billing_shipping(client: &Client) -> Result<Table> {
    let mut table = Table::new(6, 2);
    for title in ["BILL TO", "SHIP TO"] {
        table.add(title_cell(title).padding(Padding::bottom(4.0)))?;
    }

    let billing = client.billing_info.lines();
    let shipping = client.shipping_info.lines();
    for (bill, ship) in billing.into_iter().zip(shipping) {
        table.add(Cell::new(bill))?;
        table.add(Cell::new(ship))?;
    }

    table.set_padding_on_all_cells(2.0, 2.0, 2.0, 2.0).no_borders();
    Ok(table)
}

/// Line items with the subtotal, tax and total rows
///
/// Always `max_displayed_items + 4` rows x 4 columns. Items beyond the cap
/// are handled per [`ItemOverflow`].
pub fn build_items(items: &[BillableItem], settings: &InvoiceSettings) -> Result<Table> {
    let max = settings.max_displayed_items;
    if items.len() > max {
        match settings.overflow {
            ItemOverflow::Reject => {
                return Err(InvoiceError::TooManyItems {
                    count: items.len(),
                    max,
                });
            }
            ItemOverflow::Truncate => {
                warn!(
                    "{} items given but only {max} fit, dropping {}",
                    items.len(),
                    items.len() - max
                );
            }
        }
    }
    let shown = &items[..items.len().min(max)];
    let currency = settings.currency.as_str();

    let mut table = Table::new(max + 4, 4);
    for heading in ITEM_HEADINGS {
        table.add(title_cell(heading))?;
    }

    for index in 0..max {
        let background = row_background(index);
        match shown.get(index) {
            Some(item) => {
                let cells = [
                    item.description.clone(),
                    format_quantity(item.quantity),
                    format_currency(currency, item.unit_price),
                    format_amount(currency, item.amount()?, settings.amount_format),
                ];
                for text in cells {
                    table.add(Cell::new(text).background(background))?;
                }
            }
            None => {
                for _ in 0..4 {
                    table.add(Cell::blank().background(background))?;
                }
            }
        }
    }

    let totals = LineItemTotals::compute(shown, settings.tax_rate)?;
    debug!(
        "items table: {} items, subtotal {}, tax {}, total {}",
        shown.len(),
        totals.subtotal,
        totals.tax,
        totals.total
    );
    let summary = [
        ("Sub-Total".to_string(), totals.subtotal),
        (format_tax_label(&settings.tax_label, settings.tax_rate), totals.tax),
        ("Total".to_string(), totals.total),
    ];
    for (label, value) in summary {
        table.add(Cell::new(label).align(Align::Right).col_span(3))?;
        table.add(Cell::new(format_currency(currency, value)).align(Align::Right))?;
    }

    table.set_padding_on_all_cells(2.0, 2.0, 4.0, 2.0).no_borders();
    Ok(table)
}

fn title_cell(text: &str) -> Cell {
    Cell::new(text)
        .text_color(Color::white())
        .background(HEADER_ROW_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::FontWeight;
    use crate::model::ClientInfo;
    use crate::settings::AmountFormat;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn settings() -> InvoiceSettings {
        InvoiceSettings::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    }

    fn items(n: usize) -> Vec<BillableItem> {
        (0..n)
            .map(|i| BillableItem::new(format!("item {i}"), Decimal::from(1), Decimal::from(i as i64 + 1)))
            .collect()
    }

    #[test]
    fn test_header_colors_match_hex() {
        assert_eq!(HEADER_ROW_COLOR, Color::from_hex(0x263238));
        assert_eq!(ODD_ROW_COLOR, Color::from_hex(0xBBBBBB));
        assert_eq!(EVEN_ROW_COLOR, Color::from_hex(0xFFFFFF));
    }

    #[test]
    fn test_row_background_alternates() {
        assert_eq!(row_background(0), ODD_ROW_COLOR);
        assert_eq!(row_background(1), EVEN_ROW_COLOR);
        assert_eq!(row_background(8), ODD_ROW_COLOR);
        assert_eq!(row_background(9), EVEN_ROW_COLOR);
    }

    #[test]
    fn test_totals_apply_rate() {
        let items = vec![BillableItem::new("x", Decimal::from(1), d("3120.00"))];
        let totals = LineItemTotals::compute(&items, Decimal::from(12)).unwrap();
        assert_eq!(totals.subtotal, d("3120"));
        assert_eq!(totals.tax, d("374.4"));
        assert_eq!(totals.total, d("3494.4"));
    }

    #[test]
    fn test_totals_of_nothing_are_zero() {
        let totals = LineItemTotals::compute(&[], Decimal::from(5)).unwrap();
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn test_totals_report_line_overflow() {
        let items = vec![BillableItem::new(
            "huge",
            d("100000000000000000000"),
            d("10000000000"),
        )];
        let err = LineItemTotals::compute(&items, Decimal::from(5)).unwrap_err();
        assert!(matches!(err, InvoiceError::AmountOverflow(_)));
    }

    #[test]
    fn test_totals_report_subtotal_overflow() {
        let half = d("50000000000000000000000000000");
        let items = vec![
            BillableItem::new("a", Decimal::from(1), half),
            BillableItem::new("b", Decimal::from(1), half),
        ];
        let err = LineItemTotals::compute(&items, Decimal::ZERO).unwrap_err();
        assert_eq!(err.to_string(), "Amount out of range: subtotal");
    }

    #[test]
    fn test_totals_report_total_overflow() {
        let items = vec![BillableItem::new(
            "a",
            Decimal::from(1),
            d("70000000000000000000000000000"),
        )];
        let err = LineItemTotals::compute(&items, Decimal::ONE_HUNDRED).unwrap_err();
        assert_eq!(err.to_string(), "Amount out of range: total");
    }

    #[test]
    fn test_items_table_reports_overflow() {
        let items = vec![BillableItem::new(
            "huge",
            d("100000000000000000000"),
            d("10000000000"),
        )];
        let err = build_items(&items, &settings()).unwrap_err();
        assert!(matches!(err, InvoiceError::AmountOverflow(_)));
    }

    #[test]
    fn test_header_layout() {
        let company = Company::new("XYZ Inc.", "123 Main St", "555-1234", "billing@xyz.ca", "www.xyz.ca");
        let table = build_header(&company, &settings()).unwrap();

        assert_eq!((table.rows(), table.columns()), (5, 3));
        assert!(table.is_complete());
        assert!(!table.has_borders());
        assert_eq!(table.cell_padding(), Padding::all(2.0));

        let column0: Vec<&str> = (0..5).map(|r| table.text_at(r, 0)).collect();
        assert_eq!(column0, ["XYZ Inc.", "123 Main St", "555-1234", "billing@xyz.ca", "www.xyz.ca"]);

        assert_eq!(table.text_at(0, 1), "Date:");
        assert_eq!(table.text_at(1, 1), "Invoice #:");
        assert_eq!(table.text_at(2, 1), "Due Date:");
        assert_eq!(table.text_at(0, 2), "01-01-2024");
        assert_eq!(table.text_at(1, 2), "1");
        assert_eq!(table.text_at(2, 2), "08-01-2024");
        for row in 3..5 {
            assert_eq!(table.text_at(row, 1), "");
            assert_eq!(table.text_at(row, 2), "");
        }

        let label = table.cell_at(1, 1).unwrap();
        assert_eq!(label.weight, FontWeight::Bold);
        assert_eq!(label.align, Align::Right);
    }

    #[test]
    fn test_header_with_empty_company() {
        let table = build_header(&Company::default(), &settings()).unwrap();
        assert!(table.is_complete());
        assert_eq!(table.text_at(0, 0), "");
    }

    #[test]
    fn test_billing_shipping_columns() {
        let client = Client::new(
            ClientInfo::new("Jane", "ABC Inc.", "1 Road", "Victoria, BC", "555-1"),
            ClientInfo::new("Joe", "ABC Depot", "2 Dock", "Sidney, BC", "555-2"),
        );
        let table = build_billing_shipping(&client).unwrap();

        assert_eq!((table.rows(), table.columns()), (6, 2));
        assert!(table.is_complete());
        assert_eq!(table.text_at(0, 0), "BILL TO");
        assert_eq!(table.text_at(0, 1), "SHIP TO");

        let title = table.cell_at(0, 0).unwrap();
        assert_eq!(title.background, Some(HEADER_ROW_COLOR));
        assert_eq!(title.text_color, Color::white());
        assert_eq!(title.padding, Padding::bottom(4.0));

        let billing: Vec<&str> = (1..6).map(|r| table.text_at(r, 0)).collect();
        let shipping: Vec<&str> = (1..6).map(|r| table.text_at(r, 1)).collect();
        assert_eq!(billing, ["Jane", "ABC Inc.", "1 Road", "Victoria, BC", "555-1"]);
        assert_eq!(shipping, ["Joe", "ABC Depot", "2 Dock", "Sidney, BC", "555-2"]);
    }

    #[test]
    fn test_items_row_content() {
        let items = vec![
            BillableItem::new("Engineering Hours", Decimal::from(40), Decimal::from(60)),
            BillableItem::new("Consulting fees", Decimal::from(12), Decimal::from(120)),
        ];
        let table = build_items(&items, &settings()).unwrap();

        assert_eq!((table.rows(), table.columns()), (14, 4));
        assert!(table.is_complete());
        let headings: Vec<&str> = (0..4).map(|c| table.text_at(0, c)).collect();
        assert_eq!(headings, ITEM_HEADINGS);

        let first: Vec<&str> = (0..4).map(|c| table.text_at(1, c)).collect();
        assert_eq!(first, ["Engineering Hours", "40", "$60.00", "$2400"]);

        assert_eq!(table.text_at(11, 0), "Sub-Total");
        assert_eq!(table.text_at(11, 3), "$3840.00");
        assert_eq!(table.text_at(12, 0), "GST (5%)");
        assert_eq!(table.text_at(12, 3), "$192.00");
        assert_eq!(table.text_at(13, 0), "Total");
        assert_eq!(table.text_at(13, 3), "$4032.00");
        assert_eq!(table.cell_at(13, 0).unwrap().col_span, 3);
        assert_eq!(table.cell_padding(), Padding::new(2.0, 2.0, 4.0, 2.0));
    }

    #[test]
    fn test_items_two_decimal_amounts() {
        let mut settings = settings();
        settings.amount_format = AmountFormat::TwoDecimals;
        let items = vec![BillableItem::new("Hours", Decimal::from(40), Decimal::from(60))];
        let table = build_items(&items, &settings).unwrap();
        assert_eq!(table.text_at(1, 3), "$2400.00");
    }

    #[test]
    fn test_blank_rows_keep_background() {
        let table = build_items(&items(3), &settings()).unwrap();
        for row in 1..=10 {
            for column in 0..4 {
                let cell = table.cell_at(row, column).unwrap();
                assert_eq!(cell.background, Some(row_background(row - 1)));
            }
        }
        assert_eq!(table.text_at(4, 0), "");
    }

    #[test]
    fn test_overflow_truncates() {
        let table = build_items(&items(12), &settings()).unwrap();
        assert_eq!(table.rows(), 14);
        assert_eq!(table.text_at(10, 0), "item 9");
        // 1 + 2 + ... + 10
        assert_eq!(table.text_at(11, 3), "$55.00");
    }

    #[test]
    fn test_overflow_reject() {
        let mut settings = settings();
        settings.overflow = ItemOverflow::Reject;
        let err = build_items(&items(11), &settings).unwrap_err();
        assert!(matches!(err, InvoiceError::TooManyItems { count: 11, max: 10 }));
        assert!(build_items(&items(10), &settings).is_ok());
    }

    #[test]
    fn test_custom_capacity() {
        let mut settings = settings();
        settings.max_displayed_items = 3;
        let table = build_items(&items(1), &settings).unwrap();
        assert_eq!(table.rows(), 7);
        assert_eq!(table.text_at(4, 0), "Sub-Total");
    }
}
