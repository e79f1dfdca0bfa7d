//! Invoice composer - billing data to PDF blocks
//!
//! This crate provides:
//! - The billing data model (company, client, billable items)
//! - Builders for the header, billing/shipping and line-items tables
//! - An ordered block composer with single-column layout onto `pdf-core`
//! - JSON invoice data loading
//!
//! # Example
//!
//! ```ignore
//! use invoice::{InvoiceComposer, InvoiceData, ImageSource};
//!
//! let data = InvoiceData::from_file("invoice.json")?;
//! let settings = data.settings.resolve(today);
//! let mut composer = InvoiceComposer::new(data.company, data.client, settings)?;
//!
//! composer.add_logo(&ImageSource::parse("logo.png"))?;
//! composer.add_table(composer.build_header());
//! composer.add_blank_line();
//! composer.add_table(composer.build_billing_shipping());
//! composer.add_blank_line();
//! let items = composer.build_items(&data.items)?;
//! composer.add_table(items);
//! composer.render("output.pdf")?;
//! ```

pub mod blocks;
pub mod builders;
mod composer;
mod data;
pub mod format;
mod layout;
mod model;
mod settings;

pub use blocks::{Block, Cell, FontWeight, ImageBlock, ImageSource, Padding, Paragraph, Table};
pub use builders::LineItemTotals;
pub use composer::{InvoiceComposer, DEFAULT_IMAGE_SIZE};
pub use data::{InvoiceData, SettingsOverrides};
pub use layout::LayoutConfig;
pub use model::{BillableItem, Client, ClientInfo, Company};
pub use settings::{AmountFormat, InvoiceSettings, ItemOverflow, MAX_DISPLAYED_ITEMS};

pub use pdf_core::{Align, Color};

use thiserror::Error;

/// Errors that can occur while composing or rendering an invoice
#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_core::PdfError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image source error: {0}")]
    ImageSource(String),

    #[error("Table is full ({rows} rows x {columns} columns)")]
    TableFull { rows: usize, columns: usize },

    #[error("Cell spanning {span} columns does not fit in the {remaining} columns left in its row")]
    CellSpan { span: usize, remaining: usize },

    #[error("{count} items do not fit in the {max}-row items table")]
    TooManyItems { count: usize, max: usize },

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Amount out of range: {0}")]
    AmountOverflow(String),
}

/// Result type for invoice operations
pub type Result<T> = std::result::Result<T, InvoiceError>;
