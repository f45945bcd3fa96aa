use lopdf::{
    Document, Object, ObjectId, Stream,
    content::{Content, Operation},
    dictionary,
};

use crate::error::{PdfProcessError, Result};
use crate::html::Block;

const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;
const MARGIN: f32 = 40.0;
const LINE_HEIGHT: f32 = 1.5;
/// Average Times glyph width as a fraction of the font size.
const GLYPH_WIDTH: f32 = 0.5;

const REGULAR: &str = "F1";
const BOLD: &str = "F2";

#[derive(Debug, Clone, Copy)]
struct TextStyle {
    font: &'static str,
    size: f32,
    indent: f32,
}

impl TextStyle {
    const fn of(block: &Block) -> Self {
        match block {
            Block::Heading { level: 1, .. } => Self::bold(32.0),
            Block::Heading { level: 2, .. } => Self::bold(20.0),
            Block::Heading { level: 3, .. } => Self::bold(16.0),
            Block::Heading { .. } => Self::bold(12.0),
            Block::Paragraph(_) => Self {
                font: REGULAR,
                size: 12.0,
                indent: 0.0,
            },
            Block::ListItem(_) | Block::NumberedItem { .. } => Self {
                font: REGULAR,
                size: 12.0,
                indent: 18.0,
            },
        }
    }

    const fn bold(size: f32) -> Self {
        Self {
            font: BOLD,
            size,
            indent: 0.0,
        }
    }

    fn line_height(self) -> f32 {
        self.size * LINE_HEIGHT
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn max_chars(self) -> usize {
        let width = 2.0f32.mul_add(-MARGIN, PAGE_WIDTH) - self.indent;
        ((width / (self.size * GLYPH_WIDTH)).floor() as usize).max(1)
    }
}

/// Lays blocks out on A4 pages in a serif print style and returns the PDF bytes.
///
/// # Errors
///
/// Returns [`PdfProcessError::Render`] if the document cannot be serialized.
pub fn render_blocks(blocks: &[Block]) -> Result<Vec<u8>> {
    let mut pages: Vec<Vec<Operation>> = vec![Vec::new()];
    let mut cursor = PAGE_HEIGHT - MARGIN;

    for block in blocks {
        let style = TextStyle::of(block);
        let text = match block {
            Block::ListItem(text) => format!("\u{2022} {text}"),
            Block::NumberedItem { number, text } => format!("{number}. {text}"),
            other => other.text().to_string(),
        };
        for line in wrap(&text, style.max_chars()) {
            if cursor - style.line_height() < MARGIN {
                pages.push(Vec::new());
                cursor = PAGE_HEIGHT - MARGIN;
            }
            cursor -= style.line_height();
            if let Some(ops) = pages.last_mut() {
                push_line(ops, style, MARGIN + style.indent, cursor, &line);
            }
        }
        cursor -= style.size * 0.5;
    }

    write_document(pages)
}

fn push_line(ops: &mut Vec<Operation>, style: TextStyle, x: f32, y: f32, line: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![style.font.into(), real(style.size)],
    ));
    ops.push(Operation::new("Td", vec![real(x), real(y)]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::string_literal(win_ansi(line))],
    ));
    ops.push(Operation::new("ET", vec![]));
}

fn write_document(pages: Vec<Vec<Operation>>) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let regular = doc.add_object(font("Times-Roman"));
    let bold = doc.add_object(font("Times-Bold"));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR => regular,
            BOLD => bold,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations }
            .encode()
            .map_err(|e| PdfProcessError::Render(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = i64::try_from(kids.len()).unwrap_or(i64::MAX);
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![Object::Integer(0), Object::Integer(0), real(PAGE_WIDTH), real(PAGE_HEIGHT)],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| PdfProcessError::Render(e.to_string()))?;
    Ok(bytes)
}

fn font(base: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn real(value: f32) -> Object {
    Object::Real(value.into())
}

/// Greedy word wrap by character count. Words longer than a line are split.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };
        if needed > max_chars && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// Maps text onto `WinAnsiEncoding`; unmappable characters become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2122}' => 0x99,
            '\t' => b' ',
            c if (' '..='~').contains(&c) || ('\u{A0}'..='\u{FF}').contains(&c) => {
                u8::try_from(u32::from(c)).unwrap_or(b'?')
            }
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_count(bytes: &[u8]) -> usize {
        Document::load_mem(bytes).unwrap().get_pages().len()
    }

    #[test]
    fn renders_a_loadable_pdf() {
        let blocks = vec![
            Block::Heading {
                level: 1,
                text: "Statement of Work".into(),
            },
            Block::Paragraph("Prepared for the revenue team.".into()),
            Block::ListItem("Weekly pipeline review".into()),
        ];
        let bytes = render_blocks(&blocks).unwrap();

        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert_eq!(page_count(&bytes), 1);
    }

    #[test]
    fn long_documents_paginate() {
        let blocks: Vec<Block> = (0..200)
            .map(|i| Block::Paragraph(format!("Deliverable number {i} with supporting detail.")))
            .collect();
        let bytes = render_blocks(&blocks).unwrap();
        assert!(page_count(&bytes) > 1);
    }

    #[test]
    fn empty_document_still_has_a_page() {
        let bytes = render_blocks(&[]).unwrap();
        assert_eq!(page_count(&bytes), 1);
    }

    #[test]
    fn wrap_respects_width_and_keeps_words() {
        let lines = wrap("alpha beta gamma delta", 11);
        assert_eq!(lines, ["alpha beta", "gamma delta"]);
        assert!(lines.iter().all(|line| line.chars().count() <= 11));
    }

    #[test]
    fn wrap_splits_overlong_words() {
        assert_eq!(wrap("abcdefghij", 4), ["abcd", "efgh", "ij"]);
    }

    #[test]
    fn win_ansi_maps_typographic_marks() {
        assert_eq!(win_ansi("\u{2022} caf\u{e9} \u{2014} \u{4e2d}"), b"\x95 caf\xe9 \x97 ?");
    }
}
