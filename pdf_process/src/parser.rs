use std::path::Path;

use lopdf::Document;

use crate::PdfPage;
use crate::error::{PdfProcessError, Result};

pub(crate) fn parse_from_path(path: &Path) -> Result<Vec<PdfPage>> {
    let doc = Document::load(path).map_err(|e| PdfProcessError::Parse(e.to_string()))?;
    Ok(parse_document(&doc))
}

pub(crate) fn parse_from_bytes(bytes: &[u8]) -> Result<Vec<PdfPage>> {
    let doc = Document::load_mem(bytes).map_err(|e| PdfProcessError::Parse(e.to_string()))?;
    Ok(parse_document(&doc))
}

fn parse_document(doc: &Document) -> Vec<PdfPage> {
    let mut page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    page_numbers.sort_unstable();

    page_numbers
        .into_iter()
        .map(|number| {
            // A page whose content stream cannot be decoded still counts as a page.
            let raw = doc.extract_text(&[number]).unwrap_or_default();
            PdfPage {
                number,
                text: normalize_text(&raw),
            }
        })
        .collect()
}

pub(crate) fn normalize_text(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_drops_blank_lines_and_padding() {
        assert_eq!(normalize_text("  Scope \n\n\t\n Deliverables  "), "Scope\nDeliverables");
        assert_eq!(normalize_text(" \n "), "");
    }

    #[test]
    fn garbage_bytes_fail_to_parse() {
        assert!(matches!(
            parse_from_bytes(b"not-a-pdf"),
            Err(PdfProcessError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_fails() {
        assert!(parse_from_path(Path::new("/definitely/not/here.pdf")).is_err());
    }
}
