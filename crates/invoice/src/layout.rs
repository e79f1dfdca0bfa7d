//! Single-column block layout onto a `pdf-core` document

use crate::blocks::{Block, FontWeight, ImageBlock, Padding, Paragraph, Table};
use crate::Result;
use log::debug;
use pdf_core::{Align, BuiltinFont, Color, PageSize, PdfDocument};

/// Page geometry and base font size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub page_size: PageSize,
    /// Top and bottom margin in points
    pub vertical_margin: f64,
    /// Left and right margin in points
    pub horizontal_margin: f64,
    pub font_size: f32,
    /// Line width of table borders
    pub border_width: f64,
}

impl LayoutConfig {
    /// Margins of 2% of the page height (top/bottom) and width (left/right)
    pub fn for_page(page_size: PageSize) -> Self {
        Self {
            page_size,
            vertical_margin: page_size.height * 0.02,
            horizontal_margin: page_size.width * 0.02,
            font_size: 12.0,
            border_width: 0.5,
        }
    }

    /// Width available to blocks
    pub fn content_width(&self) -> f64 {
        self.page_size.width - 2.0 * self.horizontal_margin
    }

    /// Lowest y (from top) content may reach
    fn bottom(&self) -> f64 {
        self.page_size.height - self.vertical_margin
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::for_page(PageSize::A4)
    }
}

/// Greedy word wrap by measured width
///
/// Always returns at least one line. A word wider than `max_width` gets a
/// line of its own.
pub(crate) fn wrap_text(font: BuiltinFont, size: f32, text: &str, max_width: f64) -> Vec<String> {
    let space = font.text_width_points(" ", size) as f64;
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0;

    for word in text.split_whitespace() {
        let word_width = font.text_width_points(word, size) as f64;
        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + space + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += space + word_width;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn font_for(weight: FontWeight) -> BuiltinFont {
    match weight {
        FontWeight::Regular => BuiltinFont::Helvetica,
        FontWeight::Bold => BuiltinFont::HelveticaBold,
    }
}

/// Places blocks top to bottom, adding pages as needed
pub(crate) struct LayoutEngine<'a> {
    doc: &'a mut PdfDocument,
    config: LayoutConfig,
    page: usize,
    /// Top of the free area, from the top of the page
    cursor: f64,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(doc: &'a mut PdfDocument, config: LayoutConfig) -> Self {
        Self {
            doc,
            config,
            page: 1,
            cursor: config.vertical_margin,
        }
    }

    /// Lay out all blocks in order
    pub fn layout(&mut self, blocks: &[Block]) -> Result<()> {
        for (index, block) in blocks.iter().enumerate() {
            debug!(
                "laying out block {index} ({}) on page {} at y={:.1}",
                block.kind(),
                self.page,
                self.cursor
            );
            match block {
                Block::Image(image) => self.layout_image(image)?,
                Block::Table(table) => self.layout_table(table)?,
                Block::Paragraph(paragraph) => self.layout_paragraph(paragraph)?,
            }
        }
        Ok(())
    }

    /// Page the cursor is on
    pub fn page(&self) -> usize {
        self.page
    }

    /// Start a new page unless `height` fits below the cursor
    ///
    /// Content taller than a whole page is placed at the top and overflows.
    fn ensure_space(&mut self, height: f64) {
        let at_top = self.cursor <= self.config.vertical_margin;
        if !at_top && self.cursor + height > self.config.bottom() {
            self.page = self.doc.add_blank_page();
            self.cursor = self.config.vertical_margin;
            debug!("continuing on page {}", self.page);
        }
    }

    fn line_height(&self, font: BuiltinFont) -> f64 {
        font.line_height(self.config.font_size) as f64
    }

    fn ascent(&self, font: BuiltinFont) -> f64 {
        font.ascender() as f64 * self.config.font_size as f64 / 1000.0
    }

    fn layout_image(&mut self, image: &ImageBlock) -> Result<()> {
        self.ensure_space(image.height);
        self.doc.insert_image(
            &image.data,
            self.page,
            self.config.horizontal_margin,
            self.cursor,
            image.width,
            image.height,
        )?;
        self.cursor += image.height;
        Ok(())
    }

    fn layout_paragraph(&mut self, paragraph: &Paragraph) -> Result<()> {
        let font = font_for(paragraph.weight);
        let width = self.config.content_width();
        let line_height = self.line_height(font);

        self.doc.set_font(font, self.config.font_size);
        self.doc.set_text_color(Color::black());
        for line in wrap_text(font, self.config.font_size, &paragraph.text, width) {
            self.ensure_space(line_height);
            let baseline = self.cursor + self.ascent(font);
            self.draw_line(&line, self.config.horizontal_margin, width, baseline, paragraph.align)?;
            self.cursor += line_height;
        }
        Ok(())
    }

    fn layout_table(&mut self, table: &Table) -> Result<()> {
        if table.columns() == 0 {
            return Ok(());
        }
        let column_width = self.config.content_width() / table.columns() as f64;
        let base = table.cell_padding();

        for row in 0..table.rows() {
            let cells = table.row(row);

            // Wrap every cell first to find the row height
            let mut prepared = Vec::with_capacity(cells.len());
            let mut row_height = self.line_height(BuiltinFont::Helvetica) + base.top + base.bottom;
            for (column, cell) in cells {
                let font = font_for(cell.weight);
                let padding = base.plus(cell.padding);
                let width = column_width * cell.col_span as f64;
                let inner = (width - padding.left - padding.right).max(0.0);
                let lines = wrap_text(font, self.config.font_size, &cell.text, inner);
                let height =
                    lines.len() as f64 * self.line_height(font) + padding.top + padding.bottom;
                row_height = row_height.max(height);
                prepared.push((column, cell, font, padding, lines));
            }

            self.ensure_space(row_height);
            let top = self.cursor;

            for (column, cell, font, padding, lines) in prepared {
                let x = self.config.horizontal_margin + column as f64 * column_width;
                let width = column_width * cell.col_span as f64;

                if let Some(background) = cell.background {
                    self.doc.fill_rect(self.page, x, top, width, row_height, background)?;
                }

                self.doc.set_font(font, self.config.font_size);
                self.doc.set_text_color(cell.text_color);
                self.draw_cell_lines(&lines, x, top, width, padding, font, cell.align)?;
            }

            if table.has_borders() {
                for column in 0..table.columns() {
                    let x = self.config.horizontal_margin + column as f64 * column_width;
                    self.doc.stroke_rect(
                        self.page,
                        x,
                        top,
                        column_width,
                        row_height,
                        self.config.border_width,
                        Color::black(),
                    )?;
                }
            }

            self.cursor += row_height;
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_cell_lines(
        &mut self,
        lines: &[String],
        x: f64,
        top: f64,
        width: f64,
        padding: Padding,
        font: BuiltinFont,
        align: Align,
    ) -> Result<()> {
        let inner = (width - padding.left - padding.right).max(0.0);
        let line_height = self.line_height(font);
        let mut baseline = top + padding.top + self.ascent(font);
        for line in lines {
            self.draw_line(line, x + padding.left, inner, baseline, align)?;
            baseline += line_height;
        }
        Ok(())
    }

    /// Draw one line aligned inside `[x, x + width]`
    fn draw_line(&mut self, line: &str, x: f64, width: f64, baseline: f64, align: Align) -> Result<()> {
        if line.trim().is_empty() {
            return Ok(());
        }
        let anchor = match align {
            Align::Left => x,
            Align::Center => x + width / 2.0,
            Align::Right => x + width,
        };
        self.doc.insert_text(line, self.page, anchor, baseline, align)?;
        Ok(())
    }
}
