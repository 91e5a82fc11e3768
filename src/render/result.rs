//! Rendering result with metadata and statistics.

use crate::model::{Element, ListNode, Metadata};
use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (Markdown)
    pub content: String,

    /// Document metadata
    pub metadata: Metadata,

    /// Extraction statistics
    pub stats: ExtractionStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, metadata: Metadata, stats: ExtractionStats) -> Self {
        Self {
            content,
            metadata,
            stats,
        }
    }

    /// Create a simple result with just content.
    pub fn content_only(content: String) -> Self {
        Self {
            content,
            metadata: Metadata::default(),
            stats: ExtractionStats::default(),
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics collected over an element sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of paragraphs
    pub paragraph_count: u32,

    /// Number of headings
    pub heading_count: u32,

    /// Number of blockquotes, boxed quotes included
    pub blockquote_count: u32,

    /// Number of code blocks
    pub code_block_count: u32,

    /// Number of data tables
    pub table_count: u32,

    /// Number of top-level lists
    pub list_count: u32,

    /// Number of list items at any depth
    pub list_item_count: u32,

    /// Number of standalone images
    pub image_count: u32,

    /// Number of footnotes
    pub footnote_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics over an element sequence.
    pub fn from_elements(elements: &[Element]) -> Self {
        let mut stats = Self::new();
        for element in elements {
            stats.add_element(element);
        }
        stats
    }

    /// Count one element.
    pub fn add_element(&mut self, element: &Element) {
        match element {
            Element::H1(_)
            | Element::H2(_)
            | Element::H3(_)
            | Element::H4(_)
            | Element::H5(_)
            | Element::H6(_) => self.heading_count += 1,
            Element::P(_) => self.paragraph_count += 1,
            Element::Blockquote(_) => self.blockquote_count += 1,
            Element::Code(_) => self.code_block_count += 1,
            Element::Table(_) => self.table_count += 1,
            Element::Ul(items) | Element::Ol(items) => {
                self.list_count += 1;
                self.list_item_count += count_items(items);
            }
            Element::Img(_) => self.image_count += 1,
            Element::Footnote(_) => self.footnote_count += 1,
        }
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        // Word count: whitespace-separated tokens
        self.word_count += text.split_whitespace().count() as u32;

        // Character count: non-whitespace characters
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.paragraph_count += other.paragraph_count;
        self.heading_count += other.heading_count;
        self.blockquote_count += other.blockquote_count;
        self.code_block_count += other.code_block_count;
        self.table_count += other.table_count;
        self.list_count += other.list_count;
        self.list_item_count += other.list_item_count;
        self.image_count += other.image_count;
        self.footnote_count += other.footnote_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}

fn count_items(items: &[ListNode]) -> u32 {
    items
        .iter()
        .map(|node| match node {
            ListNode::Item(_) => 1,
            ListNode::List(list) => count_items(&list.items),
        })
        .sum()
}
