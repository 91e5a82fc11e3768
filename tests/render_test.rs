//! Integration tests for Markdown and JSON rendering.

use serde_json::json;
use ungdoc::model::Footnote;
use ungdoc::render::{to_markdown, to_markdown_with_stats};
use ungdoc::{
    ConvertOptions, ConvertedDocument, DocumentObject, Element, JsonFormat, Metadata, RawDocument,
    RenderOptions, Ungdoc,
};

fn sample_document() -> RawDocument {
    RawDocument::from_value(json!({
        "documentId": "doc-42",
        "title": "Getting Started",
        "body": {"content": [
            {"paragraph": {
                "elements": [{"textRun": {"content": "Install\n"}}],
                "paragraphStyle": {"namedStyleType": "HEADING_1"}
            }},
            {"paragraph": {
                "elements": [
                    {"textRun": {"content": "Run "}},
                    {"textRun": {"content": "cargo", "textStyle": {"weightedFontFamily": {"fontFamily": "Consolas"}}}},
                    {"textRun": {"content": " and read the "}},
                    {"textRun": {"content": "docs", "textStyle": {"link": {"url": "https://example.com/docs"}}}},
                    {"footnoteReference": {"footnoteId": "kix.fn1", "footnoteNumber": "1"}},
                    {"textRun": {"content": "\n"}}
                ]
            }},
            {"paragraph": {
                "elements": [{"textRun": {"content": "First step\n"}}],
                "bullet": {"listId": "kix.steps", "nestingLevel": 0}
            }},
            {"paragraph": {
                "elements": [{"textRun": {"content": "Detail\n"}}],
                "bullet": {"listId": "kix.steps", "nestingLevel": 1}
            }},
            {"paragraph": {
                "elements": [{"textRun": {"content": "Second step\n"}}],
                "bullet": {"listId": "kix.steps", "nestingLevel": 0}
            }}
        ]},
        "lists": {"kix.steps": {"listProperties": {"nestingLevels": [
            {"glyphType": "DECIMAL"},
            {"glyphSymbol": "○"}
        ]}}},
        "footnotes": {"kix.fn1": {"footnoteId": "kix.fn1", "content": [
            {"paragraph": {"elements": [{"textRun": {"content": "Online only.\n"}}]}}
        ]}}
    }))
    .unwrap()
}

#[test]
fn test_full_document_markdown() {
    let document = sample_document();
    let converted =
        ConvertedDocument::new(&document, Metadata::from_document(&document), ConvertOptions::new());

    let markdown = converted.to_markdown().unwrap();
    let expected = "---\n\
        id: doc-42\n\
        name: Getting Started\n\
        cover: null\n\
        ---\n\
        \n\
        # Install\n\
        \n\
        Run `cargo` and read the [docs](https://example.com/docs)[^1]\n\
        \n\
        1. First step\n   - Detail\n2. Second step\n\
        \n\
        [^1]: Online only.\n";
    assert_eq!(markdown, expected);
}

#[test]
fn test_markdown_without_frontmatter() {
    let markdown = Ungdoc::new()
        .without_frontmatter()
        .demote_headings()
        .convert(&sample_document())
        .to_markdown()
        .unwrap();

    assert!(markdown.starts_with("## Install\n\n"));
    assert!(markdown.ends_with("[^1]: Online only.\n"));
    assert!(!markdown.contains("---"));
}

#[test]
fn test_empty_body_renders_frontmatter_only() {
    let doc = DocumentObject {
        elements: Vec::new(),
        metadata: Metadata::new().with("name", "Empty"),
        cover: None,
    };

    let markdown = to_markdown(&doc, &RenderOptions::new()).unwrap();
    assert_eq!(markdown, "---\nname: Empty\ncover: null\n---\n");

    let markdown = to_markdown(&doc, &RenderOptions::new().with_frontmatter(false)).unwrap();
    assert_eq!(markdown, "");
}

#[test]
fn test_custom_footnote_rule() {
    fn html_rule(footnote: &Footnote) -> String {
        format!("<p id=\"fn{}\">{}</p>", footnote.number, footnote.text)
    }

    let markdown = Ungdoc::new()
        .without_frontmatter()
        .convert(&sample_document())
        .document()
        .to_markdown_with(&RenderOptions::new().with_frontmatter(false).with_footnote_rule(html_rule))
        .unwrap();

    assert!(markdown.ends_with("<p id=\"fn1\">Online only.</p>\n"));
}

#[test]
fn test_stats() {
    let result = Ungdoc::new()
        .convert(&sample_document())
        .to_markdown_with_stats()
        .unwrap();

    assert_eq!(result.stats.heading_count, 1);
    assert_eq!(result.stats.paragraph_count, 1);
    assert_eq!(result.stats.list_count, 1);
    assert_eq!(result.stats.list_item_count, 3);
    assert_eq!(result.stats.footnote_count, 1);
    assert_eq!(result.metadata.id(), Some("doc-42"));

    let direct = to_markdown_with_stats(
        &Ungdoc::new().convert(&sample_document()).to_object(),
        &RenderOptions::new(),
    )
    .unwrap();
    assert_eq!(direct.content, result.content);
}

#[test]
fn test_json_output() {
    let result = Ungdoc::new().convert(&sample_document());

    let json = result.to_json(JsonFormat::Compact).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["elements"][0], json!({"type": "h1", "value": "Install"}));
    assert_eq!(
        value["elements"][2],
        json!({"type": "ol", "value": [
            "First step",
            {"type": "ul", "value": ["Detail"]},
            "Second step"
        ]})
    );
    assert_eq!(
        value["elements"][3],
        json!({"type": "footnote", "value": {"number": "1", "text": "Online only."}})
    );

    let object: DocumentObject = serde_json::from_str(&json).unwrap();
    assert_eq!(object, result.to_object());
    assert_eq!(object.elements[0], Element::H1("Install".to_string()));
}
