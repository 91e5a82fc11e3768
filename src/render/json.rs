//! JSON rendering of converted documents.

use crate::convert::DocumentObject;
use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document object to JSON.
pub fn to_json(doc: &DocumentObject, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Element, Metadata};

    fn sample() -> DocumentObject {
        DocumentObject {
            elements: vec![Element::H1("Test".to_string()), Element::P("Hello".to_string())],
            metadata: Metadata::new().with("id", "doc-1"),
            cover: None,
        }
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"type\": \"h1\""));
        assert!(json.contains("\"id\": \"doc-1\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["elements"][1]["value"], "Hello");
        assert!(value["cover"].is_null());
    }
}
