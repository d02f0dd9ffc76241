pub mod fields;

pub use fields::*;

use html_escape::decode_html_entities;

/// Clean and normalize text by removing extra whitespace and decoding HTML entities
pub fn clean_text(text: &str) -> String {
    let decoded = decode_html_entities(text);
    decoded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::clean_text;
    use pretty_assertions::assert_eq;

    #[test]
    fn collapses_whitespace_and_decodes_entities() {
        assert_eq!(clean_text("  Blue\n  Dream &amp; Co  "), "Blue Dream & Co");
        assert_eq!(clean_text(""), "");
    }
}
