//! Fixed-size tables

use crate::{InvoiceError, Result};
use pdf_core::{Align, Color};

/// Font weight of a cell or paragraph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Padding in points
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn all(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn bottom(value: f64) -> Self {
        Self::new(0.0, 0.0, value, 0.0)
    }

    /// Component-wise sum
    pub fn plus(self, other: Padding) -> Padding {
        Padding::new(
            self.top + other.top,
            self.right + other.right,
            self.bottom + other.bottom,
            self.left + other.left,
        )
    }
}

/// A table cell holding one paragraph of text
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub weight: FontWeight,
    pub align: Align,
    pub text_color: Color,
    pub background: Option<Color>,
    pub col_span: usize,
    /// Added on top of the table's cell padding
    pub padding: Padding,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            weight: FontWeight::Regular,
            align: Align::Left,
            text_color: Color::black(),
            background: None,
            col_span: 1,
            padding: Padding::default(),
        }
    }

    /// Empty placeholder cell
    pub fn blank() -> Self {
        Self::new("")
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn col_span(mut self, span: usize) -> Self {
        self.col_span = span.max(1);
        self
    }

    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }
}

/// Table with a fixed number of rows and equal-width columns
///
/// Cells are added in row-major order. Slots never filled render as
/// empty space.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    rows: usize,
    columns: usize,
    /// Cells with their (row, first column)
    cells: Vec<(usize, usize, Cell)>,
    /// Slots consumed so far
    used: usize,
    cell_padding: Padding,
    borders: bool,
}

impl Table {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: Vec::new(),
            used: 0,
            cell_padding: Padding::default(),
            borders: true,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Append the next cell
    pub fn add(&mut self, cell: Cell) -> Result<&mut Self> {
        if self.used >= self.rows * self.columns {
            return Err(InvoiceError::TableFull {
                rows: self.rows,
                columns: self.columns,
            });
        }

        let row = self.used / self.columns;
        let column = self.used % self.columns;
        let remaining = self.columns - column;
        if cell.col_span > remaining {
            return Err(InvoiceError::CellSpan {
                span: cell.col_span,
                remaining,
            });
        }

        self.used += cell.col_span;
        self.cells.push((row, column, cell));
        Ok(self)
    }

    /// True once every slot has been filled
    pub fn is_complete(&self) -> bool {
        self.used == self.rows * self.columns
    }

    pub fn set_padding_on_all_cells(&mut self, top: f64, right: f64, bottom: f64, left: f64) -> &mut Self {
        self.cell_padding = Padding::new(top, right, bottom, left);
        self
    }

    pub fn cell_padding(&self) -> Padding {
        self.cell_padding
    }

    pub fn no_borders(&mut self) -> &mut Self {
        self.borders = false;
        self
    }

    pub fn has_borders(&self) -> bool {
        self.borders
    }

    /// Cells of one row as `(first column, cell)`, left to right
    pub fn row(&self, row: usize) -> Vec<(usize, &Cell)> {
        self.cells
            .iter()
            .filter(|(r, _, _)| *r == row)
            .map(|(_, c, cell)| (*c, cell))
            .collect()
    }

    /// The cell covering `(row, column)`, if any
    pub fn cell_at(&self, row: usize, column: usize) -> Option<&Cell> {
        self.cells
            .iter()
            .find(|(r, c, cell)| *r == row && (*c..*c + cell.col_span).contains(&column))
            .map(|(_, _, cell)| cell)
    }

    /// Text of the cell covering `(row, column)`, empty when unfilled
    pub fn text_at(&self, row: usize, column: usize) -> &str {
        self.cell_at(row, column)
            .map(|cell| cell.text.as_str())
            .unwrap_or("")
    }
}
