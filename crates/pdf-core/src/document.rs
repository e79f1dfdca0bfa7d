//! PDF Document wrapper

use crate::font::BuiltinFont;
use crate::graphics::{generate_fill_rect_operators, generate_stroke_rect_operators};
use crate::image::{
    calculate_scaled_dimensions, generate_image_operators, ImageScaleMode, ImageXObject,
};
use crate::text::{encode_win_ansi, generate_text_operators, win_ansi_byte, TextRenderContext};
use crate::{Align, PdfError, Result};
use log::{debug, info, warn};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::io::Write;
use std::path::Path;

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create color from a 0xRRGGBB value
    pub fn from_hex(hex: u32) -> Self {
        Self::from_rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// White color
    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Page dimensions in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width: 595.28,
        height: 841.89,
    };

    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// An image already added to the document
#[derive(Debug, Clone)]
struct EmbeddedImage {
    resource_name: String,
    object_id: ObjectId,
    width: u32,
    height: u32,
}

/// PDF document being written from scratch
///
/// Drawing calls buffer content operators per page. The buffers are turned
/// into content streams, and the page tree and shared resources are written,
/// when the document is serialized.
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// Object ID reserved for the page tree root
    pages_id: ObjectId,
    /// Page object IDs in page order
    page_ids: Vec<ObjectId>,
    /// Content stream object per page (same order as `page_ids`)
    content_ids: Vec<ObjectId>,
    /// Size used for every page
    page_size: PageSize,
    /// Current font face
    current_font: BuiltinFont,
    /// Current font size
    current_font_size: f32,
    /// Current text color
    current_text_color: Color,
    /// Fonts in use (font -> resource name, object ID)
    font_resources: HashMap<BuiltinFont, (String, ObjectId)>,
    /// Embedded images (data hash -> image)
    embedded_images: HashMap<u64, EmbeddedImage>,
    /// Buffered content operators per page (page number -> operators)
    page_content_buffer: HashMap<usize, Vec<u8>>,
}

impl PdfDocument {
    /// Create a document with a single blank page
    ///
    /// # Example
    /// ```ignore
    /// let doc = PdfDocument::new(PageSize::A4);
    /// assert_eq!(doc.page_count(), 1);
    /// ```
    pub fn new(page_size: PageSize) -> Self {
        let mut inner = Document::with_version("1.7");
        let pages_id = inner.new_object_id();

        let mut doc = Self {
            inner,
            pages_id,
            page_ids: Vec::new(),
            content_ids: Vec::new(),
            page_size,
            current_font: BuiltinFont::default(),
            current_font_size: 12.0,
            current_text_color: Color::default(),
            font_resources: HashMap::new(),
            embedded_images: HashMap::new(),
            page_content_buffer: HashMap::new(),
        };
        doc.add_blank_page();
        doc
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Page dimensions shared by all pages
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Add a blank page to the end of the document
    ///
    /// # Returns
    /// New page number (1-indexed)
    pub fn add_blank_page(&mut self) -> usize {
        let contents_id = self
            .inner
            .add_object(Object::Stream(Stream::new(Dictionary::new(), vec![])));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_id));
        page_dict.set("Contents", Object::Reference(contents_id));

        let page_id = self.inner.add_object(Object::Dictionary(page_dict));
        self.page_ids.push(page_id);
        self.content_ids.push(contents_id);

        debug!("added page {}", self.page_ids.len());
        self.page_ids.len()
    }

    /// Set the current font face and size
    pub fn set_font(&mut self, font: BuiltinFont, size: f32) {
        self.current_font = font;
        self.current_font_size = size;
    }

    /// Current font face and size
    pub fn font(&self) -> (BuiltinFont, f32) {
        (self.current_font, self.current_font_size)
    }

    /// Set the text color
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    /// Width of `text` in points with the current font and size
    pub fn get_text_width(&self, text: &str) -> f64 {
        self.current_font
            .text_width_points(text, self.current_font_size) as f64
    }

    /// Insert text at a specific position
    ///
    /// # Arguments
    /// * `text` - Text to insert
    /// * `page` - Page number (1-indexed)
    /// * `x` - Anchor X coordinate in points: the left edge, centre or right
    ///   edge of the text depending on `align`
    /// * `y` - Baseline Y coordinate in points (from top)
    /// * `align` - Alignment of the text relative to `x`
    pub fn insert_text(
        &mut self,
        text: &str,
        page: usize,
        x: f64,
        y: f64,
        align: Align,
    ) -> Result<()> {
        self.check_page(page)?;

        if text.is_empty() {
            return Ok(());
        }
        if text.chars().any(|c| win_ansi_byte(c).is_none()) {
            warn!("text {text:?} has characters outside WinAnsi, replacing with '?'");
        }

        let font_resource_name = self.get_or_create_font_ref(self.current_font);
        let ctx = TextRenderContext {
            font_name: font_resource_name,
            font_size: self.current_font_size,
            text_width: self.get_text_width(text),
            color: self.current_text_color,
        };

        let pdf_y = self.page_size.height - y;
        let operators = generate_text_operators(&encode_win_ansi(text), x, pdf_y, align, &ctx);
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Fill a rectangle with a solid color
    ///
    /// `(x, y)` is the top-left corner, with `y` measured from the top.
    pub fn fill_rect(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    ) -> Result<()> {
        self.check_page(page)?;

        let pdf_y = self.page_size.height - y - height;
        let operators = generate_fill_rect_operators(x, pdf_y, width, height, color);
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Outline a rectangle
    ///
    /// `(x, y)` is the top-left corner, with `y` measured from the top.
    #[allow(clippy::too_many_arguments)]
    pub fn stroke_rect(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        line_width: f64,
        color: Color,
    ) -> Result<()> {
        self.check_page(page)?;

        let pdf_y = self.page_size.height - y - height;
        let operators = generate_stroke_rect_operators(x, pdf_y, width, height, line_width, color);
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Insert an image stretched to the given size
    ///
    /// # Arguments
    /// * `data` - Image file bytes (JPEG or PNG)
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points
    /// * `y` - Y coordinate of the top edge in points (from top)
    /// * `width` - Image width in points
    /// * `height` - Image height in points
    pub fn insert_image(
        &mut self,
        data: &[u8],
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<()> {
        self.insert_image_scaled(data, page, x, y, width, height, ImageScaleMode::Stretch)
            .map(|_| ())
    }

    /// Insert an image with scaling mode
    ///
    /// Returns the size actually drawn, in points.
    #[allow(clippy::too_many_arguments)]
    pub fn insert_image_scaled(
        &mut self,
        data: &[u8],
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        mode: ImageScaleMode,
    ) -> Result<(f64, f64)> {
        self.check_page(page)?;

        let image = self.get_or_create_image_ref(data)?;
        let (actual_width, actual_height) =
            calculate_scaled_dimensions(image.width, image.height, width, height, mode);

        let pdf_y = self.page_size.height - y - actual_height;
        let operators = generate_image_operators(
            &image.resource_name,
            x,
            pdf_y,
            actual_width,
            actual_height,
        );
        self.buffer_content(page, &operators);

        Ok((actual_width, actual_height))
    }

    /// Save the document to a file
    ///
    /// The bytes go to a temporary file next to `path`, which is renamed over
    /// `path` only once everything has been written. On failure nothing
    /// appears at `path`.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        info!(
            "wrote {} ({} pages, {} bytes)",
            path.display(),
            self.page_count(),
            bytes.len()
        );
        Ok(())
    }

    /// Save the document to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.flush_content_buffers()?;
        self.write_page_tree();

        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        Ok(buffer)
    }

    /// Access the underlying lopdf document
    pub fn inner(&self) -> &Document {
        &self.inner
    }

    fn check_page(&self, page: usize) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }
        Ok(())
    }

    /// Get (or create) the resource name for a font
    fn get_or_create_font_ref(&mut self, font: BuiltinFont) -> String {
        if let Some((name, _)) = self.font_resources.get(&font) {
            return name.clone();
        }

        let name = format!("F{}", self.font_resources.len() + 1);
        let object_id = self
            .inner
            .add_object(Object::Dictionary(font.to_pdf_dictionary()));
        self.font_resources.insert(font, (name.clone(), object_id));
        name
    }

    /// Get or create an image reference
    ///
    /// Images are deduplicated by hash of their data.
    fn get_or_create_image_ref(&mut self, data: &[u8]) -> Result<EmbeddedImage> {
        let mut hasher = DefaultHasher::new();
        data.hash(&mut hasher);
        let data_hash = hasher.finish();

        if let Some(image) = self.embedded_images.get(&data_hash) {
            return Ok(image.clone());
        }

        let xobject = ImageXObject::from_bytes(data)
            .map_err(|e| PdfError::ImageError(format!("Failed to create image XObject: {e}")))?;
        let object_id = self.inner.add_object(xobject.to_pdf_stream());

        let image = EmbeddedImage {
            resource_name: format!("Im{}", self.embedded_images.len() + 1),
            object_id,
            width: xobject.width,
            height: xobject.height,
        };
        debug!(
            "embedded image {} ({}x{}, {})",
            image.resource_name, image.width, image.height, xobject.filter
        );
        self.embedded_images.insert(data_hash, image.clone());
        Ok(image)
    }

    /// Buffer content operators for a page (written at save time)
    fn buffer_content(&mut self, page: usize, content: &[u8]) {
        self.page_content_buffer
            .entry(page)
            .or_default()
            .extend_from_slice(content);
    }

    /// Append all buffered operators to the pages' content streams
    fn flush_content_buffers(&mut self) -> Result<()> {
        let buffers: Vec<(usize, Vec<u8>)> = self.page_content_buffer.drain().collect();

        for (page, content) in buffers {
            if content.is_empty() {
                continue;
            }
            let contents_id = self.content_ids[page - 1];
            let stream = self
                .inner
                .get_object_mut(contents_id)?
                .as_stream_mut()
                .map_err(|_| PdfError::ParseError("Page contents is not a stream".to_string()))?;
            let mut combined = stream.content.clone();
            combined.extend_from_slice(&content);
            stream.set_content(combined);
        }

        Ok(())
    }

    /// Write the page tree, shared resources and catalog
    fn write_page_tree(&mut self) {
        let mut fonts = Dictionary::new();
        for (name, id) in self.font_resources.values() {
            fonts.set(name.as_bytes(), Object::Reference(*id));
        }
        let mut xobjects = Dictionary::new();
        for image in self.embedded_images.values() {
            xobjects.set(image.resource_name.as_bytes(), Object::Reference(image.object_id));
        }
        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(fonts));
        resources.set("XObject", Object::Dictionary(xobjects));

        let mut pages = Dictionary::new();
        pages.set("Type", Object::Name(b"Pages".to_vec()));
        pages.set(
            "Kids",
            Object::Array(self.page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        );
        pages.set("Count", self.page_ids.len() as i64);
        pages.set(
            "MediaBox",
            Object::Array(vec![
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(self.page_size.width as f32),
                Object::Real(self.page_size.height as f32),
            ]),
        );
        pages.set("Resources", Object::Dictionary(resources));
        self.inner
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));

        if self.inner.trailer.get(b"Root").is_err() {
            let mut catalog = Dictionary::new();
            catalog.set("Type", Object::Name(b"Catalog".to_vec()));
            catalog.set("Pages", Object::Reference(self.pages_id));
            let catalog_id = self.inner.add_object(Object::Dictionary(catalog));
            self.inner.trailer.set("Root", Object::Reference(catalog_id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = PdfDocument::new(PageSize::A4);
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.page_size(), PageSize::A4);
    }

    #[test]
    fn test_color_from_hex() {
        let color = Color::from_hex(0x263238);
        assert_eq!(color, Color::from_rgb(0x26, 0x32, 0x38));
        assert_eq!(Color::from_hex(0xFFFFFF), Color::white());
    }

    #[test]
    fn test_add_blank_page_numbers() {
        let mut doc = PdfDocument::new(PageSize::LETTER);
        assert_eq!(doc.add_blank_page(), 2);
        assert_eq!(doc.add_blank_page(), 3);
        assert_eq!(doc.page_count(), 3);
    }

    #[test]
    fn test_insert_text_invalid_page() {
        let mut doc = PdfDocument::new(PageSize::A4);
        let result = doc.insert_text("x", 2, 0.0, 0.0, Align::Left);
        assert!(matches!(result, Err(PdfError::InvalidPage(2, 1))));

        let result = doc.insert_text("x", 0, 0.0, 0.0, Align::Left);
        assert!(matches!(result, Err(PdfError::InvalidPage(0, 1))));
    }

    #[test]
    fn test_font_refs_are_reused() {
        let mut doc = PdfDocument::new(PageSize::A4);
        let a = doc.get_or_create_font_ref(BuiltinFont::Helvetica);
        let b = doc.get_or_create_font_ref(BuiltinFont::HelveticaBold);
        let c = doc.get_or_create_font_ref(BuiltinFont::Helvetica);
        assert_eq!(a, "F1");
        assert_eq!(b, "F2");
        assert_eq!(a, c);
    }

    #[test]
    fn test_text_width_uses_current_font() {
        let mut doc = PdfDocument::new(PageSize::A4);
        doc.set_font(BuiltinFont::Helvetica, 10.0);
        let regular = doc.get_text_width("Total");
        doc.set_font(BuiltinFont::HelveticaBold, 10.0);
        let bold = doc.get_text_width("Total");
        assert!(bold > regular);
    }

    #[test]
    fn test_buffers_flush_into_page_stream() {
        let mut doc = PdfDocument::new(PageSize::A4);
        doc.fill_rect(1, 0.0, 0.0, 10.0, 10.0, Color::black()).unwrap();
        doc.flush_content_buffers().unwrap();

        let stream = doc
            .inner()
            .get_object(doc.content_ids[0])
            .unwrap()
            .as_stream()
            .unwrap();
        let content = String::from_utf8(stream.content.clone()).unwrap();
        assert!(content.contains("re\nf"));
        assert!(doc.page_content_buffer.is_empty());
    }
}
