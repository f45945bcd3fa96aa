use std::sync::LazyLock;

use regex::Regex;

/// A printable block extracted from HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `<h1>` through `<h6>`.
    Heading {
        /// Heading level, 1 to 6.
        level: u8,
        /// Plain text.
        text: String,
    },
    /// `<p>` or free text.
    Paragraph(String),
    /// `<li>` of an unordered list.
    ListItem(String),
    /// `<li>` of an `<ol>`, numbered from 1 within its list.
    NumberedItem {
        /// Position in the list.
        number: usize,
        /// Plain text.
        text: String,
    },
}

impl Block {
    /// Plain text of the block.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Heading { text, .. }
            | Self::Paragraph(text)
            | Self::ListItem(text)
            | Self::NumberedItem { text, .. } => text,
        }
    }
}

static NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style|head|noscript)\b[^>]*>.*?</(?:script|style|head|noscript)\s*>")
        .expect("static regex")
});

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<(/?)([a-zA-Z][a-zA-Z0-9]*)?[^>]*>").expect("static regex")
});

/// Tags that end the running block. Anything else is inline and only separates words.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "html", "li", "main",
    "nav", "ol", "p", "pre", "section", "table", "tbody", "td", "tfoot", "th", "thead", "tr",
    "ul",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Free,
    Heading(u8),
    Paragraph,
    Item(Option<usize>),
}

#[derive(Debug, Default)]
struct Builder {
    blocks: Vec<Block>,
    text: String,
    kind: Option<Kind>,
    // One entry per open list: the last number used for `<ol>`, `None` for `<ul>`.
    lists: Vec<Option<usize>>,
}

impl Builder {
    fn flush(&mut self) {
        let raw = std::mem::take(&mut self.text);
        match self.kind.take().unwrap_or(Kind::Free) {
            Kind::Free => {
                for run in raw.split("\n\n") {
                    let text = inline_text(run);
                    if !text.is_empty() {
                        self.blocks.push(Block::Paragraph(text));
                    }
                }
            }
            kind => {
                let text = inline_text(&raw);
                if text.is_empty() {
                    return;
                }
                self.blocks.push(match kind {
                    Kind::Heading(level) => Block::Heading { level, text },
                    Kind::Item(Some(number)) => Block::NumberedItem { number, text },
                    Kind::Item(None) => Block::ListItem(text),
                    Kind::Paragraph | Kind::Free => Block::Paragraph(text),
                });
            }
        }
    }

    fn open(&mut self, tag: &str) {
        self.flush();
        self.kind = match tag.as_bytes() {
            [b'h', level @ b'1'..=b'6'] => Some(Kind::Heading(level - b'0')),
            b"p" => Some(Kind::Paragraph),
            b"ul" => {
                self.lists.push(None);
                None
            }
            b"ol" => {
                self.lists.push(Some(0));
                None
            }
            b"li" => {
                let number = match self.lists.last_mut() {
                    Some(Some(last)) => {
                        *last += 1;
                        Some(*last)
                    }
                    _ => None,
                };
                Some(Kind::Item(number))
            }
            _ => None,
        };
    }

    fn close(&mut self, tag: &str) {
        self.flush();
        if matches!(tag, "ul" | "ol") {
            self.lists.pop();
        }
    }
}

/// Splits an HTML fragment into headings, paragraphs and list items in document order.
///
/// Text outside any block-level tag becomes paragraphs, one per blank-line separated run.
/// Items of an `<ol>` are numbered; nested lists produce their own items.
#[must_use]
pub fn html_blocks(html: &str) -> Vec<Block> {
    let html = NOISE.replace_all(html, "");
    let mut builder = Builder::default();

    let mut last = 0;
    for caps in TAG.captures_iter(&html) {
        let Some(whole) = caps.get(0) else { continue };
        builder.text.push_str(&html[last..whole.start()]);
        last = whole.end();

        let name = caps
            .get(2)
            .map(|m| m.as_str().to_ascii_lowercase())
            .unwrap_or_default();
        if name == "br" {
            builder.text.push(' ');
        } else if BLOCK_TAGS.contains(&name.as_str()) {
            if caps[1].is_empty() {
                builder.open(&name);
            } else {
                builder.close(&name);
            }
        } else {
            builder.text.push(' ');
        }
    }
    builder.text.push_str(&html[last..]);
    builder.flush();
    builder.blocks
}

fn inline_text(fragment: &str) -> String {
    let decoded = html_escape::decode_html_entities(fragment);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_follow_document_order() {
        let html = "<h1>Statement of Work</h1><p>Prepared for <strong>Acme</strong></p>\
                    <h2>Scope</h2><ul><li>CRM audit</li><li>Pipeline &amp; forecasting</li></ul>";
        assert_eq!(
            html_blocks(html),
            vec![
                Block::Heading {
                    level: 1,
                    text: "Statement of Work".into()
                },
                Block::Paragraph("Prepared for Acme".into()),
                Block::Heading {
                    level: 2,
                    text: "Scope".into()
                },
                Block::ListItem("CRM audit".into()),
                Block::ListItem("Pipeline & forecasting".into()),
            ]
        );
    }

    #[test]
    fn style_and_empty_blocks_are_dropped() {
        let html = "<style>p { color: red }</style><p>  </p><P class=\"x\">Kept\n  text</P>";
        assert_eq!(html_blocks(html), vec![Block::Paragraph("Kept text".into())]);
    }

    #[test]
    fn bare_text_becomes_paragraphs() {
        let blocks = html_blocks("First line<br>continues\n\nSecond");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph("First line continues".into()),
                Block::Paragraph("Second".into()),
            ]
        );
    }

    #[test]
    fn ordered_items_are_numbered_per_list() {
        let html = "<ol><li>Audit</li><li>Design</li></ol><ol><li>Launch</li></ol>\
                    <ul><li>Bullet</li></ul>";
        assert_eq!(
            html_blocks(html),
            vec![
                Block::NumberedItem {
                    number: 1,
                    text: "Audit".into()
                },
                Block::NumberedItem {
                    number: 2,
                    text: "Design".into()
                },
                Block::NumberedItem {
                    number: 1,
                    text: "Launch".into()
                },
                Block::ListItem("Bullet".into()),
            ]
        );
    }

    #[test]
    fn nested_lists_keep_words_apart() {
        let html = "<ol><li>Items<ul><li>sub one</li><li>sub two</li></ul></li><li>Next</li></ol>";
        assert_eq!(
            html_blocks(html),
            vec![
                Block::NumberedItem {
                    number: 1,
                    text: "Items".into()
                },
                Block::ListItem("sub one".into()),
                Block::ListItem("sub two".into()),
                Block::NumberedItem {
                    number: 2,
                    text: "Next".into()
                },
            ]
        );
    }

    #[test]
    fn text_outside_known_blocks_is_kept() {
        let html = "<h2>Timeline</h2><div>Six weeks from kickoff</div>Signed off by<br/>the CRO";
        assert_eq!(
            html_blocks(html),
            vec![
                Block::Heading {
                    level: 2,
                    text: "Timeline".into()
                },
                Block::Paragraph("Six weeks from kickoff".into()),
                Block::Paragraph("Signed off by the CRO".into()),
            ]
        );
    }

    #[test]
    fn inline_tags_separate_words() {
        assert_eq!(
            html_blocks("<p>Scope<br>Exclusions<span>Notes</span></p>"),
            vec![Block::Paragraph("Scope Exclusions Notes".into())]
        );
    }

    #[test]
    fn empty_input_has_no_blocks() {
        assert!(html_blocks("").is_empty());
    }
}
