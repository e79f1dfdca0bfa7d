//! Text rendering utilities

use crate::document::Color;
use crate::Align;

/// Context for rendering text
pub struct TextRenderContext {
    /// PDF font resource name (e.g., "F1")
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Text width in points (for alignment)
    pub text_width: f64,
    /// Text color (RGB)
    pub color: Color,
}

/// Map a character to its WinAnsiEncoding (cp1252) byte
///
/// Latin-1 characters from U+00A0 up keep their code point. The 0x80..=0x9F
/// range holds typographic punctuation, the euro sign and a few letters.
/// Control characters and anything else outside the encoding give `None`.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    let byte = match c {
        ' '..='~' | '\u{00A0}'..='\u{00FF}' => c as u8,
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

/// Encode text as a PDF literal string for a WinAnsi-encoded simple font
///
/// `(`, `)` and `\` are escaped, bytes above 0x7E are written as octal
/// escapes and characters with no WinAnsi byte become `?`.
pub fn encode_win_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('(');
    for c in text.chars() {
        match win_ansi_byte(c).unwrap_or(b'?') {
            b @ (b'(' | b')' | b'\\') => {
                out.push('\\');
                out.push(b as char);
            }
            b @ 0x20..=0x7E => out.push(b as char),
            b => out.push_str(&format!("\\{b:03o}")),
        }
    }
    out.push(')');
    out
}

/// Generate PDF operators for text insertion
///
/// Creates the proper PDF text operators (BT, Tf, Td, Tj, ET) to render text
/// at a specific position with alignment support.
///
/// # Arguments
/// * `text_literal` - Encoded string operand (e.g., "(Total)")
/// * `x` - X coordinate in points (PDF coordinates, from left)
/// * `y` - Y coordinate in points (PDF coordinates, from bottom)
/// * `align` - Text alignment relative to `x`
/// * `ctx` - Text rendering context
pub fn generate_text_operators(
    text_literal: &str,
    x: f64,
    y: f64,
    align: Align,
    ctx: &TextRenderContext,
) -> Vec<u8> {
    let mut ops = String::new();

    let x_offset = match align {
        Align::Left => 0.0,
        Align::Center => -ctx.text_width / 2.0,
        Align::Right => -ctx.text_width,
    };

    let final_x = x + x_offset;

    ops.push_str("BT\n");
    ops.push_str(&format!(
        "{} {} {} rg\n",
        ctx.color.r, ctx.color.g, ctx.color.b
    ));
    ops.push_str(&format!("/{} {} Tf\n", ctx.font_name, ctx.font_size));
    ops.push_str(&format!("{final_x} {y} Td\n"));
    ops.push_str(&format!("{text_literal} Tj\n"));
    ops.push_str("ET\n");

    ops.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(font_name: &str, font_size: f32, text_width: f64) -> TextRenderContext {
        TextRenderContext {
            font_name: font_name.to_string(),
            font_size,
            text_width,
            color: Color::black(),
        }
    }

    #[test]
    fn test_encode_plain_ascii() {
        assert_eq!(encode_win_ansi("Sub-Total"), "(Sub-Total)");
    }

    #[test]
    fn test_encode_escapes_delimiters() {
        assert_eq!(encode_win_ansi("GST (5%)"), "(GST \\(5%\\))");
        assert_eq!(encode_win_ansi("a\\b"), "(a\\\\b)");
    }

    #[test]
    fn test_encode_latin1_as_octal() {
        assert_eq!(encode_win_ansi("café"), "(caf\\351)");
        assert_eq!(encode_win_ansi("£5"), "(\\2435)");
    }

    #[test]
    fn test_encode_cp1252_punctuation() {
        assert_eq!(encode_win_ansi("€10"), "(\\20010)");
        assert_eq!(encode_win_ansi("‘a’ – “b”"), "(\\221a\\222 \\226 \\223b\\224)");
        assert_eq!(encode_win_ansi("—"), "(\\227)");
    }

    #[test]
    fn test_encode_replaces_unmappable() {
        assert_eq!(encode_win_ansi("\u{0E01}x"), "(?x)");
        assert_eq!(encode_win_ansi("line\nbreak"), "(line?break)");
    }

    #[test]
    fn test_win_ansi_byte() {
        assert_eq!(win_ansi_byte('A'), Some(0x41));
        assert_eq!(win_ansi_byte('é'), Some(0xE9));
        assert_eq!(win_ansi_byte('\u{00A0}'), Some(0xA0));
        assert_eq!(win_ansi_byte('€'), Some(0x80));
        assert_eq!(win_ansi_byte('Ÿ'), Some(0x9F));
        assert_eq!(win_ansi_byte('\u{0081}'), None);
        assert_eq!(win_ansi_byte('\u{007F}'), None);
        assert_eq!(win_ansi_byte('\u{0E01}'), None);
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode_win_ansi(""), "()");
    }

    #[test]
    fn test_generate_text_operators_left() {
        let ops = generate_text_operators("(Hello)", 100.0, 700.0, Align::Left, &ctx("F1", 12.0, 100.0));
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.starts_with("BT\n"));
        assert!(ops_str.contains("/F1 12 Tf"));
        assert!(ops_str.contains("100 700 Td"));
        assert!(ops_str.contains("(Hello) Tj"));
        assert!(ops_str.ends_with("ET\n"));
    }

    #[test]
    fn test_generate_text_operators_center() {
        let ops = generate_text_operators("(Test)", 200.0, 600.0, Align::Center, &ctx("F2", 14.0, 100.0));
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.contains("/F2 14 Tf"));
        assert!(ops_str.contains("150 600 Td"));
    }

    #[test]
    fn test_generate_text_operators_right() {
        let ops = generate_text_operators("(Right)", 300.0, 500.0, Align::Right, &ctx("F3", 16.0, 80.0));
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.contains("/F3 16 Tf"));
        assert!(ops_str.contains("220 500 Td"));
    }

    #[test]
    fn test_generate_text_operators_with_color() {
        let context = TextRenderContext {
            font_name: "F1".to_string(),
            font_size: 12.0,
            text_width: 10.0,
            color: Color::white(),
        };

        let ops = generate_text_operators("(A)", 0.0, 0.0, Align::Left, &context);
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.contains("1 1 1 rg"));
    }
}
