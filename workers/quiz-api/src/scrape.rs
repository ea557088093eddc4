//! wikipedia url checks and article text extraction from raw html

use lazy_static::lazy_static;
use regex::Regex;

/// upper bound on article text kept for generation and storage
pub const MAX_ARTICLE_CHARS: usize = 10_000;

/// paragraphs at or under this many characters are navigation noise
const MIN_PARAGRAPH_CHARS: usize = 40;

lazy_static! {
    static ref WIKIPEDIA_ARTICLE: Regex =
        Regex::new(r"^https?://(en\.)?wikipedia\.org/wiki/[A-Za-z0-9_\-()%,.]+$").unwrap();
    static ref FIRST_HEADING: Regex =
        Regex::new(r#"(?is)<h1\b[^>]*\bid\s*=\s*["']firstHeading["'][^>]*>(.*?)</h1>"#).unwrap();
    static ref PARAGRAPH: Regex = Regex::new(r"(?is)<p\b[^>]*>(.*?)</p>").unwrap();
    static ref NON_TEXT: Regex =
        Regex::new(r"(?is)<(?:style|script)\b[^>]*>.*?</(?:style|script)>|<sup\b[^>]*>.*?</sup>").unwrap();
    static ref TAG: Regex = Regex::new(r"(?s)<[^>]*>").unwrap();
    static ref ENTITY: Regex = Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

pub fn is_wikipedia_article(url: &str) -> bool {
    WIKIPEDIA_ARTICLE.is_match(url)
}

/// text of the page's `h1#firstHeading`
pub fn extract_title(html: &str) -> Option<String> {
    let heading = FIRST_HEADING.captures(html)?.get(1)?.as_str();
    let title = visible_text(heading);
    (!title.is_empty()).then_some(title)
}

/// readable body text: every paragraph longer than a short caption, joined
/// with spaces and cut at `MAX_ARTICLE_CHARS`
pub fn extract_article_text(html: &str) -> String {
    let joined = PARAGRAPH
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|inner| visible_text(inner.as_str()))
        .filter(|text| text.chars().count() > MIN_PARAGRAPH_CHARS)
        .collect::<Vec<_>>()
        .join(" ");

    truncate_chars(&joined, MAX_ARTICLE_CHARS)
}

/// cut to at most `max` characters without splitting a code point
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

/// strip markup, decode entities, collapse whitespace
fn visible_text(fragment: &str) -> String {
    let without_refs = NON_TEXT.replace_all(fragment, " ");
    let without_tags = TAG.replace_all(&without_refs, " ");
    let decoded = decode_entities(&without_tags);
    WHITESPACE.replace_all(&decoded, " ").trim().to_string()
}

fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &regex::Captures| {
            let name = &caps[1];
            let decoded = match name {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                "ndash" => Some('–'),
                "mdash" => Some('—'),
                _ => numeric_entity(name),
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn numeric_entity(name: &str) -> Option<char> {
    let digits = name.strip_prefix('#')?;
    let code = match digits.strip_prefix(|c: char| c == 'x' || c == 'X') {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse().ok()?,
    };
    char::from_u32(code)
}

// ==============================================================================
// tests
// ==============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <h1 id="firstHeading" class="firstHeading mw-first-heading"><span class="mw-page-title-main">Alan Turing</span></h1>
        <div class="mw-parser-output">
            <p>Short caption.</p>
            <p><b>Alan Mathison Turing</b> (23 June 1912 &ndash; 7 June 1954) was an English mathematician,<sup class="reference">[1]</sup> computer scientist &amp; logician.</p>
            <style>.x { color: red }</style>
            <p class="mw-empty-elt">
            </p>
            <p>He was highly influential in the development of theoretical computer science.</p>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_wikipedia_urls() {
        assert!(is_wikipedia_article("https://en.wikipedia.org/wiki/Alan_Turing"));
        assert!(is_wikipedia_article("http://wikipedia.org/wiki/C_(programming_language)"));
        assert!(!is_wikipedia_article("https://de.wikipedia.org/wiki/Alan_Turing"));
        assert!(!is_wikipedia_article("https://example.com/wiki/Alan_Turing"));
        assert!(!is_wikipedia_article("https://en.wikipedia.org/wiki/Alan Turing"));
        assert!(!is_wikipedia_article(""));
    }

    #[test]
    fn test_extract_title() {
        assert_eq!(extract_title(PAGE).as_deref(), Some("Alan Turing"));
        assert_eq!(extract_title("<h1>No id</h1>"), None);
    }

    #[test]
    fn test_extract_article_text() {
        let text = extract_article_text(PAGE);
        assert!(text.starts_with("Alan Mathison Turing (23 June 1912 – 7 June 1954)"));
        assert!(text.contains("computer scientist & logician."));
        assert!(text.ends_with("theoretical computer science."));
        assert!(!text.contains("Short caption"));
        assert!(!text.contains("[1]"));
    }

    #[test]
    fn test_article_text_is_capped() {
        let paragraph = format!("<p>{}</p>", "é".repeat(MAX_ARTICLE_CHARS));
        let html = paragraph.repeat(3);
        assert_eq!(extract_article_text(&html).chars().count(), MAX_ARTICLE_CHARS);
    }

    #[test]
    fn test_numeric_entities() {
        assert_eq!(decode_entities("&#65;&#x42;&unknown;"), "AB&unknown;");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 10), "hi");
    }
}
