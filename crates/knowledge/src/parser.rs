//! Source file parsing and text extraction.
//!
//! Documents are read as UTF-8 text. A form-feed character (`\x0c`) marks a
//! page break, so exported text keeps its page numbers through indexing.

use ragassist_core::{AppError, AppResult};
use std::fs;
use std::path::Path;

const PAGE_BREAK: char = '\x0c';

/// Content type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Markdown,
    Html,
    Code,
    PlainText,
    Unknown,
}

impl ContentType {
    /// Detect content type from file extension.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("md") | Some("markdown") => Self::Markdown,
            Some("html") | Some("htm") => Self::Html,
            Some("rs") | Some("py") | Some("js") | Some("ts") | Some("go") | Some("c")
            | Some("cpp") | Some("java") | Some("sh") | Some("yaml") | Some("yml")
            | Some("json") | Some("toml") => Self::Code,
            Some("txt") | Some("text") | Some("rst") => Self::PlainText,
            _ => Self::Unknown,
        }
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::Code => "code",
            Self::PlainText => "text",
            Self::Unknown => "unknown",
        }
    }
}

/// One page of extracted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage {
    /// 1-based page number; `None` for documents without page breaks
    pub number: Option<u32>,

    /// Cleaned text
    pub text: String,
}

/// Parse a source file into cleaned pages.
///
/// Empty pages are dropped. Binary and non-UTF-8 files are rejected.
pub fn parse_file(path: &Path) -> AppResult<Vec<ParsedPage>> {
    let content_type = ContentType::from_path(path);

    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Knowledge(format!("Failed to read {:?}: {}", path, e)))?;

    if content_type == ContentType::Unknown && !is_likely_text(&raw) {
        tracing::warn!("Skipping likely binary file: {:?}", path);
        return Err(AppError::Knowledge(format!(
            "Binary file not supported: {:?}",
            path
        )));
    }

    Ok(parse_text(&raw, content_type))
}

/// Split raw text into pages and clean each one.
pub fn parse_text(raw: &str, content_type: ContentType) -> Vec<ParsedPage> {
    let paged = raw.contains(PAGE_BREAK);

    raw.split(PAGE_BREAK)
        .enumerate()
        .filter_map(|(i, page)| {
            let text = clean(page, content_type);
            if text.trim().is_empty() {
                return None;
            }
            Some(ParsedPage {
                number: paged.then_some(i as u32 + 1),
                text,
            })
        })
        .collect()
}

fn clean(text: &str, content_type: ContentType) -> String {
    match content_type {
        ContentType::Markdown => clean_markdown(text),
        ContentType::Html => clean_html(text),
        ContentType::Code => clean_code(text),
        ContentType::PlainText | ContentType::Unknown => text.trim().to_string(),
    }
}

/// Clean markdown by removing header markers, rules and code fences.
fn clean_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for line in text.lines() {
        let trimmed = line.trim_start_matches('#').trim();

        if trimmed.starts_with("---") || trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            continue;
        }

        if !trimmed.is_empty() {
            result.push_str(trimmed);
            result.push('\n');
        }
    }

    result.trim().to_string()
}

/// Clean HTML by stripping tags, scripts and styles.
fn clean_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_tag = false;
    let mut in_script = false;
    let mut in_style = false;

    for (i, ch) in text.char_indices() {
        if ch == '<' {
            in_tag = true;

            let rest = &text[i..];
            if starts_with_ignore_case(rest, "<script") {
                in_script = true;
            } else if starts_with_ignore_case(rest, "</script") {
                in_script = false;
            } else if starts_with_ignore_case(rest, "<style") {
                in_style = true;
            } else if starts_with_ignore_case(rest, "</style") {
                in_style = false;
            }
        } else if ch == '>' {
            in_tag = false;
            // Keep words from adjacent elements apart
            result.push(' ');
        } else if !in_tag && !in_script && !in_style {
            result.push(ch);
        }
    }

    result.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
    haystack.len() >= prefix.len()
        && haystack.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// Clean code by dropping blank lines and single-line comments.
fn clean_code(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for line in text.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("//") || trimmed.starts_with('#') {
            continue;
        }

        if !trimmed.is_empty() {
            result.push_str(trimmed);
            result.push('\n');
        }
    }

    result.trim().to_string()
}

/// Check if text is likely human-readable (no NUL bytes).
fn is_likely_text(data: &str) -> bool {
    !data.contains('\0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_content_type_detection() {
        assert_eq!(
            ContentType::from_path(Path::new("notes.MD")),
            ContentType::Markdown
        );
        assert_eq!(
            ContentType::from_path(Path::new("main.rs")),
            ContentType::Code
        );
        assert_eq!(
            ContentType::from_path(Path::new("ml.txt")),
            ContentType::PlainText
        );
        assert_eq!(
            ContentType::from_path(Path::new("report.pdf")),
            ContentType::Unknown
        );
    }

    #[test]
    fn test_clean_markdown() {
        let input = "# Header\n\nSome text\n\n```rust\ncode\n```\n\nMore text";
        let output = clean_markdown(input);
        assert!(output.contains("Header"));
        assert!(output.contains("More text"));
        assert!(!output.contains("```"));
    }

    #[test]
    fn test_clean_html() {
        let input = "<html><head><style>p { color: red; }</style></head><body><p>Hello <b>world</b></p><script>var x;</script></body></html>";
        assert_eq!(clean_html(input), "Hello world");
    }

    #[test]
    fn test_clean_html_non_ascii() {
        let input = "<p>Café – naïve</p><SCRIPT>x()</SCRIPT>";
        assert_eq!(clean_html(input), "Café – naïve");
    }

    #[test]
    fn test_clean_code() {
        let input = "// Comment\nfn main() {\n    println!(\"hello\");\n}";
        let output = clean_code(input);
        assert!(!output.contains("// Comment"));
        assert!(output.contains("fn main()"));
    }

    #[test]
    fn test_single_page_document() {
        let pages = parse_text("Docker packages applications.", ContentType::PlainText);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].number, None);
    }

    #[test]
    fn test_form_feed_pages() {
        let raw = "Page one text.\x0c\x0cPage three text.";
        let pages = parse_text(raw, ContentType::PlainText);

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].number, Some(1));
        assert_eq!(pages[1].number, Some(3));
        assert_eq!(pages[1].text, "Page three text.");
    }

    #[test]
    fn test_parse_file_rejects_binary() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blob.bin");
        std::fs::write(&path, "abc\0def").unwrap();

        assert!(parse_file(&path).is_err());
    }
}
