//! Front-matter extraction
//!
//! A content file starts with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Hello world
//! published: 2024-03-15
//! ---
//! Markdown body...
//! ```
//!
//! The block is parsed into an untyped `serde_json::Value` so that the
//! validator sees the same raw shape regardless of the source format.

use serde_json::{Map, Value};
use thiserror::Error;

const FENCE: &str = "---";

#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("missing front-matter: file must start with '---'")]
    Missing,

    #[error("unterminated front-matter: no closing '---' line")]
    Unterminated,

    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Raw front-matter plus the markdown that follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub data: Value,
    pub body: String,
}

/// Splits a content file into its front-matter and body.
pub fn parse(source: &str) -> Result<Document, FrontmatterError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    let mut lines = source.split_inclusive('\n');
    match lines.next() {
        Some(first) if first.trim_end() == FENCE => {}
        _ => return Err(FrontmatterError::Missing),
    }

    let mut yaml = String::new();
    let mut closed = false;
    for line in lines.by_ref() {
        if line.trim_end() == FENCE {
            closed = true;
            break;
        }
        yaml.push_str(line);
    }
    if !closed {
        return Err(FrontmatterError::Unterminated);
    }

    let body: String = lines.collect();
    let data = match serde_yaml::from_str::<Value>(&yaml)? {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };

    Ok(Document { data, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_block_and_body() {
        let doc = parse("---\ntitle: Hello world\npublished: 2024-03-15\ntags: [rust, web]\n---\n# Heading\n\nText\n")
            .unwrap();

        assert_eq!(doc.data["title"], "Hello world");
        assert_eq!(doc.data["published"], "2024-03-15");
        assert_eq!(doc.data["tags"], json!(["rust", "web"]));
        assert_eq!(doc.body, "# Heading\n\nText\n");
    }

    #[test]
    fn test_crlf_line_endings() {
        let doc = parse("---\r\ntitle: Hello world\r\n---\r\nbody\r\n").unwrap();
        assert_eq!(doc.data["title"], "Hello world");
        assert_eq!(doc.body, "body\r\n");
    }

    #[test]
    fn test_empty_block_is_empty_object() {
        let doc = parse("---\n---\nbody").unwrap();
        assert_eq!(doc.data, json!({}));
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn test_missing_fence() {
        assert!(matches!(parse("title: nope\n"), Err(FrontmatterError::Missing)));
        assert!(matches!(parse(""), Err(FrontmatterError::Missing)));
    }

    #[test]
    fn test_unterminated_block() {
        assert!(matches!(
            parse("---\ntitle: Hello world\n"),
            Err(FrontmatterError::Unterminated)
        ));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = parse("---\ntitle: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::Yaml(_)));
    }

    #[test]
    fn test_booleans_and_numbers_keep_yaml_types() {
        let doc = parse("---\ndraft: true\nweight: 3\n---\n").unwrap();
        assert_eq!(doc.data["draft"], json!(true));
        assert_eq!(doc.data["weight"], json!(3));
    }
}
