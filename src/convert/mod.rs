//! Conversion from a document tree to markdown elements.
//!
//! [`ConvertedDocument`] walks a [`RawDocument`] once when it is built and
//! keeps the resulting elements. Heading demotion and cross-link rewriting
//! are applied on every output call, with the options current at the time.
//!
//! # Example
//!
//! ```no_run
//! use ungdoc::convert::{ConvertOptions, ConvertedDocument};
//! use ungdoc::model::{Metadata, RawDocument};
//!
//! fn main() -> ungdoc::Result<()> {
//!     let json = std::fs::read_to_string("document.json")?;
//!     let document = RawDocument::from_json(&json)?;
//!     let metadata = Metadata::from_document(&document);
//!
//!     let converted = ConvertedDocument::new(
//!         &document,
//!         metadata,
//!         ConvertOptions::new().with_demote_headings(true),
//!     );
//!     println!("{}", converted.to_markdown()?);
//!     Ok(())
//! }
//! ```

mod batch;
mod footnote;
mod inline;
mod list;
mod table;
mod transform;
mod walker;

pub use batch::{convert_batch, crosslinks_from_metadata, BatchInput, ConvertResult};
pub use footnote::FootnoteCollector;
pub use inline::{delete_smart_quotes, format_image, format_text_run, InlineFormatter};
pub use list::{append_to_list, ListItem, ListReconstructor};
pub use table::{
    cell_content, code_element, data_table_element, quote_element, DefaultTableClassifier,
    TableClassifier,
};
pub use transform::{demote_headings, rewrite_crosslinks, rewrite_text};
pub use walker::{
    extract_cover, indent_level, WalkOutput, Walker, INDENT_MARKER, INDENT_UNIT, MAX_INDENT_LEVEL,
};

use crate::error::Result;
use crate::model::{Cover, Element, HeadingRecord, Metadata, RawDocument};
use crate::render::{self, ExtractionStats, JsonFormat, RenderOptions, RenderResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Move every heading one level deeper (h1 to h2, ...)
    pub demote_headings: bool,

    /// Turn paragraphs indented past the first paragraph into blockquotes
    pub indented_blockquotes: bool,

    /// Output paths of other documents, keyed by document id
    pub crosslinks_paths: Arc<HashMap<String, String>>,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable heading demotion.
    pub fn with_demote_headings(mut self, demote: bool) -> Self {
        self.demote_headings = demote;
        self
    }

    /// Enable or disable blockquotes from indentation.
    pub fn with_indented_blockquotes(mut self, enabled: bool) -> Self {
        self.indented_blockquotes = enabled;
        self
    }

    /// Set the cross-link map.
    pub fn with_crosslinks(mut self, paths: HashMap<String, String>) -> Self {
        self.crosslinks_paths = Arc::new(paths);
        self
    }

    /// Set a shared cross-link map.
    pub fn with_crosslinks_paths(mut self, paths: Arc<HashMap<String, String>>) -> Self {
        self.crosslinks_paths = paths;
        self
    }
}

/// Elements, metadata and cover of a converted document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentObject {
    /// Post-processed elements
    pub elements: Vec<Element>,

    /// Document metadata
    pub metadata: Metadata,

    /// Cover image
    pub cover: Option<Cover>,
}

/// A document converted to elements.
#[derive(Debug, Clone)]
pub struct ConvertedDocument {
    elements: Vec<Element>,
    headings: Vec<HeadingRecord>,
    cover: Option<Cover>,
    metadata: Metadata,
    options: ConvertOptions,
}

impl ConvertedDocument {
    /// Convert a document using the default table classifier.
    pub fn new(document: &RawDocument, metadata: Metadata, options: ConvertOptions) -> Self {
        Self::with_classifier(document, metadata, options, &DefaultTableClassifier)
    }

    /// Convert a document using a custom table classifier.
    pub fn with_classifier(
        document: &RawDocument,
        metadata: Metadata,
        options: ConvertOptions,
        classifier: &dyn TableClassifier,
    ) -> Self {
        let output = Walker::new(document, classifier, options.indented_blockquotes).walk();

        Self {
            elements: output.elements,
            headings: output.headings,
            cover: output.cover,
            metadata,
            options,
        }
    }

    /// Post-processed elements.
    pub fn elements(&self) -> Vec<Element> {
        let mut elements = self.elements.clone();

        if self.options.demote_headings {
            demote_headings(&mut elements, &self.headings);
        }
        rewrite_crosslinks(&mut elements, &self.options.crosslinks_paths);

        elements
    }

    /// Elements as produced by the walk, before post-processing.
    pub fn raw_elements(&self) -> &[Element] {
        &self.elements
    }

    /// Headings seen during the walk.
    pub fn headings(&self) -> &[HeadingRecord] {
        &self.headings
    }

    /// Cover image, if the document has one.
    pub fn cover(&self) -> Option<&Cover> {
        self.cover.as_ref()
    }

    /// Document metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Current options.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Enable or disable heading demotion for later output calls.
    pub fn set_demote_headings(&mut self, demote: bool) {
        self.options.demote_headings = demote;
    }

    /// Replace the cross-link map for later output calls.
    pub fn set_crosslinks_paths(&mut self, paths: Arc<HashMap<String, String>>) {
        self.options.crosslinks_paths = paths;
    }

    /// Elements, metadata and cover.
    pub fn to_object(&self) -> DocumentObject {
        DocumentObject {
            elements: self.elements(),
            metadata: self.metadata.clone(),
            cover: self.cover.clone(),
        }
    }

    /// Render to Markdown with frontmatter.
    pub fn to_markdown(&self) -> Result<String> {
        self.to_markdown_with(&RenderOptions::default())
    }

    /// Render to Markdown with the given options.
    pub fn to_markdown_with(&self, options: &RenderOptions) -> Result<String> {
        render::to_markdown(&self.to_object(), options)
    }

    /// Render to Markdown, collecting statistics.
    pub fn to_markdown_with_stats(&self, options: &RenderOptions) -> Result<RenderResult> {
        render::to_markdown_with_stats(&self.to_object(), options)
    }

    /// Render to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.to_object(), format)
    }

    /// Element statistics, without rendering.
    pub fn stats(&self) -> ExtractionStats {
        ExtractionStats::from_elements(&self.elements)
    }
}
