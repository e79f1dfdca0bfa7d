//! Renderable blocks
//!
//! A document is an ordered list of blocks laid out top to bottom.

mod table;

pub use table::{Cell, FontWeight, Padding, Table};

use crate::{InvoiceError, Result};
use log::debug;
use pdf_core::Align;
use std::fmt;
use std::path::PathBuf;

/// One unit of the document flow
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Image(ImageBlock),
    Table(Table),
    Paragraph(Paragraph),
}

impl Block {
    /// Short name used in log messages
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Image(_) => "image",
            Block::Table(_) => "table",
            Block::Paragraph(_) => "paragraph",
        }
    }
}

/// A single line of text
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub weight: FontWeight,
    pub align: Align,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            weight: FontWeight::Regular,
            align: Align::Left,
        }
    }

    /// Vertical spacer one line high
    pub fn blank_line() -> Self {
        Self::new(" ")
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

impl From<&str> for Paragraph {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Paragraph {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// Image bytes with the size they are drawn at
#[derive(Clone, PartialEq)]
pub struct ImageBlock {
    pub data: Vec<u8>,
    pub width: f64,
    pub height: f64,
}

impl fmt::Debug for ImageBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageBlock")
            .field("data", &format_args!("<{} bytes>", self.data.len()))
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Where image bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Local file (plain path or `file://` URI)
    Path(PathBuf),
    /// `http://` or `https://` URL
    Url(String),
}

impl ImageSource {
    /// Classify a path or URI string
    pub fn parse(source: &str) -> Self {
        if let Some(path) = source.strip_prefix("file://") {
            ImageSource::Path(PathBuf::from(path))
        } else if source.starts_with("http://") || source.starts_with("https://") {
            ImageSource::Url(source.to_string())
        } else {
            ImageSource::Path(PathBuf::from(source))
        }
    }

    /// Read the image bytes
    pub fn load(&self) -> Result<Vec<u8>> {
        match self {
            ImageSource::Path(path) => {
                debug!("reading image {}", path.display());
                std::fs::read(path).map_err(|e| {
                    InvoiceError::ImageSource(format!("cannot read {}: {e}", path.display()))
                })
            }
            ImageSource::Url(url) => fetch(url),
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Path(path) => write!(f, "{}", path.display()),
            ImageSource::Url(url) => f.write_str(url),
        }
    }
}

#[cfg(feature = "remote-images")]
fn fetch(url: &str) -> Result<Vec<u8>> {
    debug!("fetching image {url}");
    let response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| InvoiceError::ImageSource(format!("cannot fetch {url}: {e}")))?;
    let bytes = response
        .bytes()
        .map_err(|e| InvoiceError::ImageSource(format!("cannot fetch {url}: {e}")))?;
    Ok(bytes.to_vec())
}

#[cfg(not(feature = "remote-images"))]
fn fetch(url: &str) -> Result<Vec<u8>> {
    Err(InvoiceError::ImageSource(format!(
        "cannot fetch {url}: built without the remote-images feature"
    )))
}
