//! PDF Core - Low-level PDF writing
//!
//! This crate provides functionality for:
//! - Creating blank documents with a fixed page size
//! - Drawing text with the built-in Helvetica faces
//! - Filling rectangles (cell backgrounds)
//! - Inserting images (JPEG, PNG)
//! - Saving atomically to disk
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{Align, BuiltinFont, PageSize, PdfDocument};
//!
//! let mut doc = PdfDocument::new(PageSize::A4);
//! doc.set_font(BuiltinFont::Helvetica, 12.0);
//! doc.insert_text("Hello, World!", 1, 100.0, 100.0, Align::Left)?;
//! doc.save("output.pdf")?;
//! ```

mod document;
mod font;
mod graphics;
mod image;
mod text;

pub use document::{Color, PageSize, PdfDocument};
pub use font::BuiltinFont;
pub use image::{calculate_scaled_dimensions, ImageScaleMode};
pub use text::{encode_win_ansi, generate_text_operators, win_ansi_byte, TextRenderContext};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("PDF parsing error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}
