//! Invoice composer

use crate::blocks::{Block, ImageBlock, ImageSource, Paragraph, Table};
use crate::builders;
use crate::layout::{LayoutConfig, LayoutEngine};
use crate::model::{BillableItem, Client, Company};
use crate::settings::InvoiceSettings;
use crate::Result;
use log::{debug, info};
use pdf_core::PdfDocument;
use std::path::Path;

/// Width and height of a logo, in points
pub const DEFAULT_IMAGE_SIZE: f64 = 128.0;

/// Collects blocks for one invoice and renders them in append order
///
/// The `build_*` methods only produce tables. Nothing reaches the document
/// until it is passed to [`add_table`](Self::add_table).
#[derive(Debug, Clone)]
pub struct InvoiceComposer {
    company: Company,
    client: Client,
    settings: InvoiceSettings,
    layout: LayoutConfig,
    blocks: Vec<Block>,
}

impl InvoiceComposer {
    /// Create a composer with an empty block sequence on an A4 page
    pub fn new(company: Company, client: Client, settings: InvoiceSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            company,
            client,
            settings,
            layout: LayoutConfig::default(),
            blocks: Vec::new(),
        })
    }

    /// Use a different page geometry
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn company(&self) -> &Company {
        &self.company
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn settings(&self) -> &InvoiceSettings {
        &self.settings
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Blocks in the order they will be laid out
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Append an image drawn at `width` x `height` points
    ///
    /// The bytes are read now, so a missing file or failed download is
    /// reported here rather than at render time.
    pub fn add_image(&mut self, source: &ImageSource, width: f64, height: f64) -> Result<()> {
        let data = source.load()?;
        debug!("adding image {source} ({} bytes) at {width}x{height}", data.len());
        self.push(Block::Image(ImageBlock {
            data,
            width,
            height,
        }));
        Ok(())
    }

    /// Append a 128x128 logo
    pub fn add_logo(&mut self, source: &ImageSource) -> Result<()> {
        self.add_image(source, DEFAULT_IMAGE_SIZE, DEFAULT_IMAGE_SIZE)
    }

    pub fn add_table(&mut self, table: Table) {
        self.push(Block::Table(table));
    }

    /// Append an empty line of vertical space
    pub fn add_blank_line(&mut self) {
        self.push(Block::Paragraph(Paragraph::blank_line()));
    }

    /// Append a line of text
    ///
    /// Accepts plain text or a [`Paragraph`] built with a weight or alignment.
    pub fn add_paragraph(&mut self, paragraph: impl Into<Paragraph>) {
        self.push(Block::Paragraph(paragraph.into()));
    }

    pub fn build_header(&self) -> Result<Table> {
        builders::build_header(&self.company, &self.settings)
    }

    pub fn build_billing_shipping(&self) -> Result<Table> {
        builders::build_billing_shipping(&self.client)
    }

    pub fn build_items(&self, items: &[BillableItem]) -> Result<Table> {
        builders::build_items(items, &self.settings)
    }

    /// Lay out all blocks and return the PDF bytes
    pub fn render_to_bytes(&self) -> Result<Vec<u8>> {
        let mut doc = self.compose()?;
        Ok(doc.to_bytes()?)
    }

    /// Lay out all blocks and write the PDF to `path`
    ///
    /// The file is written next to `path` and renamed into place, so a
    /// failed render never leaves a partial file behind.
    pub fn render<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut doc = self.compose()?;
        doc.save(path)?;
        info!("invoice #{} saved to {}", self.settings.number, path.display());
        Ok(())
    }

    fn push(&mut self, block: Block) {
        debug!("appending {} block #{}", block.kind(), self.blocks.len());
        self.blocks.push(block);
    }

    fn compose(&self) -> Result<PdfDocument> {
        let mut doc = PdfDocument::new(self.layout.page_size);
        LayoutEngine::new(&mut doc, self.layout).layout(&self.blocks)?;
        debug!(
            "laid out {} blocks on {} pages",
            self.blocks.len(),
            doc.page_count()
        );
        Ok(doc)
    }
}
