//! Image handling for PDF documents

use crate::{PdfError, Result};
use image::{ColorType, DynamicImage, ImageDecoder, ImageFormat, ImageReader};
use lopdf::{Dictionary, Object, Stream};
use std::io::{Cursor, Write};

impl From<image::ImageError> for PdfError {
    fn from(err: image::ImageError) -> Self {
        PdfError::ImageError(err.to_string())
    }
}

/// Image scaling mode for insert_image_scaled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageScaleMode {
    /// Stretch to exact dimensions
    #[default]
    Stretch,
    /// Scale proportionally based on width, auto-calculate height
    FitWidth,
    /// Scale proportionally based on height, auto-calculate width
    FitHeight,
    /// Fit within bounding box, preserving aspect ratio
    FitBox,
}

/// Calculate display dimensions based on scaling mode
///
/// Returns `(width, height)` in points.
pub fn calculate_scaled_dimensions(
    original_width: u32,
    original_height: u32,
    target_width: f64,
    target_height: f64,
    mode: ImageScaleMode,
) -> (f64, f64) {
    if original_width == 0 || original_height == 0 {
        return (target_width, target_height);
    }
    let (ow, oh) = (original_width as f64, original_height as f64);
    match mode {
        ImageScaleMode::Stretch => (target_width, target_height),
        ImageScaleMode::FitWidth => (target_width, target_width * oh / ow),
        ImageScaleMode::FitHeight => (target_height * ow / oh, target_height),
        ImageScaleMode::FitBox => {
            let scale = (target_width / ow).min(target_height / oh);
            (ow * scale, oh * scale)
        }
    }
}

/// Image XObject ready for embedding
#[derive(Debug, Clone)]
pub struct ImageXObject {
    pub width: u32,
    pub height: u32,
    /// "DeviceRGB" or "DeviceGray"
    pub color_space: &'static str,
    /// "DCTDecode" for JPEG passthrough, "FlateDecode" otherwise
    pub filter: &'static str,
    /// Encoded sample data
    pub data: Vec<u8>,
}

impl ImageXObject {
    /// Build an XObject from encoded image bytes (JPEG or PNG)
    ///
    /// JPEG data is embedded as-is. Everything else is decoded, alpha is
    /// blended onto white and the samples are zlib-compressed.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let format = image::guess_format(data)?;
        let reader = ImageReader::with_format(Cursor::new(data), format);
        let decoder = reader.into_decoder()?;
        let (width, height) = decoder.dimensions();
        let color_type = decoder.color_type();

        if format == ImageFormat::Jpeg {
            let color_space = match color_type {
                ColorType::L8 | ColorType::L16 => "DeviceGray",
                ColorType::Rgb8 | ColorType::Rgb16 => "DeviceRGB",
                other => {
                    return Err(PdfError::ImageError(format!(
                        "Unsupported JPEG color type: {other:?}"
                    )))
                }
            };
            return Ok(Self {
                width,
                height,
                color_space,
                filter: "DCTDecode",
                data: data.to_vec(),
            });
        }

        let image = DynamicImage::from_decoder(decoder)?;
        let (samples, color_space) = flatten_on_white(&image, color_type);

        let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(&samples)?;
        let data = encoder.finish()?;

        Ok(Self {
            width,
            height,
            color_space,
            filter: "FlateDecode",
            data,
        })
    }

    /// Convert to lopdf Stream object
    pub fn to_pdf_stream(&self) -> Stream {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"XObject".to_vec()));
        dict.set("Subtype", Object::Name(b"Image".to_vec()));
        dict.set("Width", self.width as i64);
        dict.set("Height", self.height as i64);
        dict.set("ColorSpace", Object::Name(self.color_space.as_bytes().to_vec()));
        dict.set("BitsPerComponent", 8i64);
        dict.set("Filter", Object::Name(self.filter.as_bytes().to_vec()));

        // Data is already encoded; keep lopdf from compressing it again
        Stream::new(dict, self.data.clone()).with_compression(false)
    }
}

/// Drop alpha by compositing onto a white background
fn flatten_on_white(image: &DynamicImage, color_type: ColorType) -> (Vec<u8>, &'static str) {
    fn blend(value: u8, alpha: u8) -> u8 {
        let a = alpha as f32 / 255.0;
        (value as f32 * a + 255.0 * (1.0 - a)).round() as u8
    }

    match color_type {
        ColorType::L8 | ColorType::L16 => (image.to_luma8().into_raw(), "DeviceGray"),
        ColorType::La8 | ColorType::La16 => {
            let gray = image
                .to_luma_alpha8()
                .pixels()
                .map(|p| blend(p[0], p[1]))
                .collect();
            (gray, "DeviceGray")
        }
        c if c.has_alpha() => {
            let rgb = image
                .to_rgba8()
                .pixels()
                .flat_map(|p| [blend(p[0], p[3]), blend(p[1], p[3]), blend(p[2], p[3])])
                .collect();
            (rgb, "DeviceRGB")
        }
        _ => (image.to_rgb8().into_raw(), "DeviceRGB"),
    }
}

/// Generate operators to draw image at position
///
/// `(x, y)` is the lower-left corner in PDF coordinates.
pub fn generate_image_operators(image_name: &str, x: f64, y: f64, width: f64, height: f64) -> Vec<u8> {
    format!("q\n{width} 0 0 {height} {x} {y} cm\n/{image_name} Do\nQ\n").into_bytes()
}
