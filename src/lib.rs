//! # ungdoc
//!
//! Google Docs document tree to Markdown conversion for Rust.
//!
//! This library takes a document exported from the Google Docs API
//! (`documents.get` JSON) and converts it to a sequence of typed markdown
//! elements, then to Markdown with YAML frontmatter or to JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ungdoc::{parse_file, ConvertOptions, ConvertedDocument, Metadata};
//!
//! fn main() -> ungdoc::Result<()> {
//!     // Decode an exported document
//!     let doc = parse_file("document.json")?;
//!
//!     // Convert and render
//!     let metadata = Metadata::from_document(&doc);
//!     let converted = ConvertedDocument::new(&doc, metadata, ConvertOptions::default());
//!     println!("{}", converted.to_markdown()?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Nested lists**: Flat list paragraphs folded back into list trees
//! - **Special tables**: Single-cell tables become quotes or code fences
//! - **Footnotes**: References collected and definitions appended in order
//! - **Cross-links**: Links between documents rewritten to output paths
//! - **Batch conversion**: Uses Rayon to convert many documents at once

pub mod convert;
pub mod error;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use convert::{
    convert_batch, BatchInput, ConvertOptions, ConvertResult, ConvertedDocument,
    DefaultTableClassifier, DocumentObject, TableClassifier,
};
pub use error::{Error, Result};
pub use model::{
    Cover, Element, HeadingRecord, Image, List, ListKind, ListNode, Metadata, MetadataOptions,
    Paragraph, RawDocument, Table, TableCell, TableRow, TextRun, TextStyle,
};
pub use render::{ExtractionStats, JsonFormat, RenderOptions, RenderResult};

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Decode a document tree from JSON text.
///
/// # Example
///
/// ```
/// let doc = ungdoc::parse_str(r#"{"documentId": "abc", "title": "Notes"}"#).unwrap();
/// assert_eq!(doc.title.as_deref(), Some("Notes"));
/// ```
pub fn parse_str(json: &str) -> Result<RawDocument> {
    RawDocument::from_json(json)
}

/// Decode a document tree from a JSON file.
///
/// # Example
///
/// ```no_run
/// use ungdoc::parse_file;
///
/// let doc = parse_file("document.json").unwrap();
/// println!("Blocks: {}", doc.content().len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<RawDocument> {
    let file = std::fs::File::open(path)?;
    parse_reader(std::io::BufReader::new(file))
}

/// Decode a document tree from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<RawDocument> {
    RawDocument::from_reader(reader)
}

/// Convert a document file to Markdown with frontmatter.
///
/// Metadata is seeded from the document's id and title.
///
/// # Example
///
/// ```no_run
/// use ungdoc::to_markdown;
///
/// let markdown = to_markdown("document.json").unwrap();
/// std::fs::write("output.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    Ungdoc::new().convert_file(path)?.to_markdown()
}

/// Convert a document file to Markdown with custom options.
///
/// # Example
///
/// ```no_run
/// use ungdoc::{to_markdown_with_options, ConvertOptions, RenderOptions};
///
/// let options = ConvertOptions::new().with_demote_headings(true);
/// let render = RenderOptions::new().with_frontmatter(false);
/// let markdown = to_markdown_with_options("document.json", options, &render).unwrap();
/// ```
pub fn to_markdown_with_options<P: AsRef<Path>>(
    path: P,
    options: ConvertOptions,
    render_options: &RenderOptions,
) -> Result<String> {
    let doc = parse_file(path)?;
    let metadata = Metadata::from_document(&doc);
    ConvertedDocument::new(&doc, metadata, options).to_markdown_with(render_options)
}

/// Convert a document file to the JSON element object.
///
/// # Example
///
/// ```no_run
/// use ungdoc::{to_json, JsonFormat};
///
/// let json = to_json("document.json", JsonFormat::Pretty).unwrap();
/// std::fs::write("output.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    Ungdoc::new().convert_file(path)?.to_json(format)
}

/// Builder for converting documents.
///
/// # Example
///
/// ```no_run
/// use ungdoc::Ungdoc;
///
/// let markdown = Ungdoc::new()
///     .demote_headings()
///     .indented_blockquotes()
///     .without_frontmatter()
///     .convert_file("document.json")?
///     .to_markdown()?;
/// # Ok::<(), ungdoc::Error>(())
/// ```
pub struct Ungdoc {
    convert_options: ConvertOptions,
    render_options: RenderOptions,
    metadata: Option<Metadata>,
}

impl Ungdoc {
    /// Create a new Ungdoc builder.
    pub fn new() -> Self {
        Self {
            convert_options: ConvertOptions::default(),
            render_options: RenderOptions::default(),
            metadata: None,
        }
    }

    /// Move every heading one level deeper.
    pub fn demote_headings(mut self) -> Self {
        self.convert_options = self.convert_options.with_demote_headings(true);
        self
    }

    /// Turn indented paragraphs into blockquotes.
    pub fn indented_blockquotes(mut self) -> Self {
        self.convert_options = self.convert_options.with_indented_blockquotes(true);
        self
    }

    /// Set the cross-link map (document id to output path).
    pub fn with_crosslinks(mut self, paths: HashMap<String, String>) -> Self {
        self.convert_options = self.convert_options.with_crosslinks(paths);
        self
    }

    /// Use this metadata instead of seeding it from the document.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Leave the YAML frontmatter out of the Markdown output.
    pub fn without_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(false);
        self
    }

    /// Set the unordered list marker.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.render_options = self.render_options.with_list_marker(marker);
        self
    }

    /// Decode and convert a document file.
    pub fn convert_file<P: AsRef<Path>>(self, path: P) -> Result<UngdocResult> {
        let document = parse_file(path)?;
        Ok(self.convert(&document))
    }

    /// Decode and convert JSON text.
    pub fn convert_str(self, json: &str) -> Result<UngdocResult> {
        let document = parse_str(json)?;
        Ok(self.convert(&document))
    }

    /// Convert an already decoded document.
    pub fn convert(self, document: &RawDocument) -> UngdocResult {
        let metadata = self
            .metadata
            .unwrap_or_else(|| Metadata::from_document(document));

        UngdocResult {
            document: ConvertedDocument::new(document, metadata, self.convert_options),
            render_options: self.render_options,
        }
    }
}

impl Default for Ungdoc {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of converting a document.
pub struct UngdocResult {
    /// The converted document
    pub document: ConvertedDocument,
    /// Render options to use
    render_options: RenderOptions,
}

impl UngdocResult {
    /// Render to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        self.document.to_markdown_with(&self.render_options)
    }

    /// Render to Markdown with statistics.
    pub fn to_markdown_with_stats(&self) -> Result<RenderResult> {
        self.document.to_markdown_with_stats(&self.render_options)
    }

    /// Render to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        self.document.to_json(format)
    }

    /// Elements, metadata and cover.
    pub fn to_object(&self) -> DocumentObject {
        self.document.to_object()
    }

    /// Element statistics.
    pub fn stats(&self) -> ExtractionStats {
        self.document.stats()
    }

    /// Get the converted document.
    pub fn document(&self) -> &ConvertedDocument {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "documentId": "doc-1",
        "title": "Sample",
        "body": {"content": [
            {"paragraph": {
                "elements": [{"textRun": {"content": "Heading\n"}}],
                "paragraphStyle": {"namedStyleType": "HEADING_1"}
            }},
            {"paragraph": {
                "elements": [{"textRun": {"content": "Body text\n"}}],
                "paragraphStyle": {"namedStyleType": "NORMAL_TEXT"}
            }}
        ]}
    }"#;

    #[test]
    fn test_ungdoc_builder() {
        let ungdoc = Ungdoc::new()
            .demote_headings()
            .indented_blockquotes()
            .without_frontmatter();

        assert!(ungdoc.convert_options.demote_headings);
        assert!(ungdoc.convert_options.indented_blockquotes);
        assert!(!ungdoc.render_options.include_frontmatter);
    }

    #[test]
    fn test_ungdoc_builder_default() {
        let builder = Ungdoc::default();
        assert!(builder.render_options.include_frontmatter);
        assert!(!builder.convert_options.demote_headings);
        assert!(builder.metadata.is_none());
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_parse_str_invalid_json() {
        assert!(matches!(parse_str("{"), Err(Error::Json(_))));
    }

    #[test]
    fn test_parse_str_not_an_object() {
        assert!(matches!(parse_str("[1, 2]"), Err(Error::InvalidDocument(_))));
        assert!(matches!(parse_str("\"text\""), Err(Error::InvalidDocument(_))));
    }

    #[test]
    fn test_parse_str_empty_object() {
        let doc = parse_str("{}").unwrap();
        assert!(doc.content().is_empty());
    }

    #[test]
    fn test_parse_file_missing() {
        assert!(matches!(
            parse_file("/nonexistent/document.json"),
            Err(Error::Io(_))
        ));
    }

    // ==================== Output Format Tests ====================

    #[test]
    fn test_convert_str_markdown() {
        let markdown = Ungdoc::new().convert_str(SAMPLE).unwrap().to_markdown().unwrap();
        assert_eq!(
            markdown,
            "---\nid: doc-1\nname: Sample\ncover: null\n---\n\n# Heading\n\nBody text\n"
        );
    }

    #[test]
    fn test_convert_str_demoted_without_frontmatter() {
        let markdown = Ungdoc::new()
            .demote_headings()
            .without_frontmatter()
            .convert_str(SAMPLE)
            .unwrap()
            .to_markdown()
            .unwrap();
        assert_eq!(markdown, "## Heading\n\nBody text\n");
    }

    #[test]
    fn test_with_metadata_replaces_seed() {
        let result = Ungdoc::new()
            .with_metadata(Metadata::new().with("path", "/guides/sample"))
            .convert_str(SAMPLE)
            .unwrap();

        let object = result.to_object();
        assert_eq!(object.metadata.path(), Some("/guides/sample"));
        assert_eq!(object.metadata.id(), None);
        assert_eq!(result.stats().heading_count, 1);
    }

    #[test]
    fn test_to_markdown_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let markdown = to_markdown(file.path()).unwrap();
        assert!(markdown.ends_with("# Heading\n\nBody text\n"));

        let json = to_json(file.path(), JsonFormat::Compact).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["elements"][0]["type"], "h1");
        assert_eq!(value["metadata"]["name"], "Sample");
    }

    #[test]
    fn test_to_markdown_with_options_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let markdown = to_markdown_with_options(
            file.path(),
            ConvertOptions::new().with_demote_headings(true),
            &RenderOptions::new().with_frontmatter(false),
        )
        .unwrap();
        assert_eq!(markdown, "## Heading\n\nBody text\n");
    }
}
