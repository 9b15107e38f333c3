//! Export formatting: plain-text bytes and a paginated PDF layout.
//!
//! Both operations are pure functions of a text string; nothing here touches
//! the network or the filesystem.

use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::error::ExportError;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const FONT_SIZE_PT: f32 = 12.0;
const LINE_HEIGHT_MM: f32 = 10.0;
/// Average glyph advance for 12pt Helvetica, used for greedy wrapping.
const CHAR_WIDTH_MM: f32 = 2.2;

/// Encodes the text for a plain-text download.
pub fn text_bytes(content: &str) -> Vec<u8> {
    content.as_bytes().to_vec()
}

/// Lays the text out into a single-column, auto-paginating A4 document with
/// built-in Helvetica at 12pt and serializes it to bytes.
///
/// The built-in PDF fonts cover only the printable Latin-1 range; any
/// character outside it fails the export up front. No fallback transcoding is
/// attempted.
pub fn pdf_bytes(content: &str) -> Result<Vec<u8>, ExportError> {
    if let Some(c) = content.chars().find(|c| !is_encodable(*c)) {
        return Err(ExportError::UnsupportedCharacter(c));
    }

    let (doc, first_page, first_layer) = PdfDocument::new(
        "Capsulate export",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "text",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

    for line in wrap_lines(content, max_chars_per_line()) {
        y -= LINE_HEIGHT_MM;
        if y < MARGIN_MM {
            let (page, layer_index) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "text");
            layer = doc.get_page(page).get_layer(layer_index);
            y = PAGE_HEIGHT_MM - MARGIN_MM - LINE_HEIGHT_MM;
        }
        layer.use_text(line, FONT_SIZE_PT, Mm(MARGIN_MM), Mm(y), &font);
    }

    doc.save_to_bytes().map_err(|e| ExportError::Pdf(e.to_string()))
}

/// Printable Latin-1 plus the whitespace controls the layout understands.
/// C0/C1 control characters have no Helvetica glyph and are rejected.
fn is_encodable(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\t')
        || (' '..='~').contains(&c)
        || ('\u{A0}'..='\u{FF}').contains(&c)
}

fn max_chars_per_line() -> usize {
    ((PAGE_WIDTH_MM - 2.0 * MARGIN_MM) / CHAR_WIDTH_MM) as usize
}

fn lines_per_page() -> usize {
    ((PAGE_HEIGHT_MM - 2.0 * MARGIN_MM) / LINE_HEIGHT_MM) as usize
}

/// Greedy word-wrap. Paragraph breaks are preserved; words longer than a
/// whole line are hard-split. Widths are measured in characters, not bytes,
/// so multi-byte Latin-1 text splits on char boundaries.
fn wrap_lines(content: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for raw in content.lines() {
        if raw.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_chars = 0;
        for word in raw.split_whitespace() {
            let mut word = word;
            let mut word_chars = word.chars().count();
            while word_chars > max_chars {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_chars = 0;
                }
                let split = word
                    .char_indices()
                    .nth(max_chars)
                    .map(|(i, _)| i)
                    .unwrap_or(word.len());
                let (head, tail) = word.split_at(split);
                lines.push(head.to_string());
                word = tail;
                word_chars -= max_chars;
            }
            if current.is_empty() {
                current.push_str(word);
                current_chars = word_chars;
            } else if current_chars + 1 + word_chars <= max_chars {
                current.push(' ');
                current.push_str(word);
                current_chars += 1 + word_chars;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_chars = word_chars;
            }
        }
        lines.push(current);
    }

    lines
}
