//! Markdown-flavoured text from an HTML page.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{RagError, Result};

static NOISE: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("static regex"),
        Regex::new(r"(?is)<style[^>]*>.*?</style>").expect("static regex"),
        Regex::new(r"(?is)<noscript[^>]*>.*?</noscript>").expect("static regex"),
    ]
});

pub(super) fn extract(html: &str) -> Result<String> {
    let mut cleaned = html.to_string();
    for re in NOISE.iter() {
        cleaned = re.replace_all(&cleaned, "").into_owned();
    }
    let markdown = htmd::convert(&cleaned).map_err(|e| RagError::Serialization(e.to_string()))?;
    Ok(markdown.trim().to_string())
}
