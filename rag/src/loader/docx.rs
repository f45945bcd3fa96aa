//! Paragraph text from `word/document.xml`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::{RagError, Result};

pub(super) fn extract(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| RagError::Docx(e.to_string()))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| RagError::Docx(e.to_string()))?
        .read_to_string(&mut xml)?;
    document_text(&xml)
}

/// Joins `w:t` runs per `w:p`, paragraphs separated by a blank line.
fn document_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader
            .read_event()
            .map_err(|e| RagError::Docx(e.to_string()))?
        {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text = true,
            Event::Start(e) | Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text => {
                let text = t.unescape().map_err(|e| RagError::Docx(e.to_string()))?;
                current.push_str(&text);
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    let paragraph = std::mem::take(&mut current);
                    if !paragraph.trim().is_empty() {
                        paragraphs.push(paragraph);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    if !current.trim().is_empty() {
        paragraphs.push(current);
    }
    Ok(paragraphs.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Revenue </w:t></w:r><w:r><w:t xml:space="preserve">Operations &amp; Enablement</w:t></w:r></w:p>
    <w:p></w:p>
    <w:p><w:r><w:t>Step</w:t><w:tab/><w:t>Owner</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn paragraphs_are_joined_with_blank_lines() {
        assert_eq!(
            document_text(BODY).unwrap(),
            "Revenue Operations & Enablement\n\nStep\tOwner"
        );
    }

    #[test]
    fn reads_document_xml_from_zip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("playbook.docx");
        let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
        zip.start_file("word/document.xml", zip::write::FileOptions::default())
            .unwrap();
        zip.write_all(BODY.as_bytes()).unwrap();
        zip.finish().unwrap();

        assert!(extract(&path).unwrap().starts_with("Revenue Operations"));
    }

    #[test]
    fn non_zip_is_a_docx_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("legacy.doc");
        std::fs::write(&path, b"\xD0\xCF\x11\xE0 legacy binary").unwrap();
        assert!(matches!(extract(&path), Err(RagError::Docx(_))));
    }
}
