//! Body traversal.
//!
//! [`Walker`] visits the body of a document once, in order, and builds the
//! element sequence. It owns all state carried from one node to the next:
//! the open list, the indentation baseline, the headings seen so far and
//! the footnote references.

use super::footnote::FootnoteCollector;
use super::inline::{delete_smart_quotes, stringify_content, InlineFormatter};
use super::list::{ListItem, ListReconstructor};
use super::table::{code_element, data_table_element, quote_element, TableClassifier};
use crate::model::{
    Bullet, Cover, Element, HeadingRecord, NamedStyle, Paragraph, RawDocument, StructuralElement,
    Table,
};

/// Points of start indentation per indentation level.
pub const INDENT_UNIT: f64 = 18.0;

/// Deepest indentation level; a letter page is about 34 levels wide.
pub const MAX_INDENT_LEVEL: u32 = 40;

/// Marker prefixed once per indentation level.
pub const INDENT_MARKER: &str = "&#09;";

/// What a walk produces.
#[derive(Debug, Clone, Default)]
pub struct WalkOutput {
    /// Elements in document order, footnotes last
    pub elements: Vec<Element>,

    /// Headings, with the position of their element
    pub headings: Vec<HeadingRecord>,

    /// Cover image from the first-page header
    pub cover: Option<Cover>,
}

/// Single-pass converter from body nodes to elements.
pub struct Walker<'a> {
    document: &'a RawDocument,
    formatter: InlineFormatter<'a>,
    classifier: &'a dyn TableClassifier,
    indented_blockquotes: bool,
    elements: Vec<Element>,
    headings: Vec<HeadingRecord>,
    first_indent_level: Option<u32>,
    lists: ListReconstructor,
    footnotes: FootnoteCollector,
}

impl<'a> Walker<'a> {
    /// Create a walker over a document.
    pub fn new(
        document: &'a RawDocument,
        classifier: &'a dyn TableClassifier,
        indented_blockquotes: bool,
    ) -> Self {
        Self {
            document,
            formatter: InlineFormatter::new(document),
            classifier,
            indented_blockquotes,
            elements: Vec::new(),
            headings: Vec::new(),
            first_indent_level: None,
            lists: ListReconstructor::new(),
            footnotes: FootnoteCollector::new(),
        }
    }

    /// Walk the whole document.
    pub fn walk(mut self) -> WalkOutput {
        let document = self.document;
        let cover = extract_cover(document);

        for node in document.content() {
            self.process_node(node);
        }

        let footnotes = std::mem::take(&mut self.footnotes).into_elements(document);
        log::debug!(
            "Walked {} nodes: {} elements, {} headings, {} footnotes",
            document.content().len(),
            self.elements.len(),
            self.headings.len(),
            footnotes.len()
        );
        self.elements.extend(footnotes);

        WalkOutput {
            elements: self.elements,
            headings: self.headings,
            cover,
        }
    }

    fn process_node(&mut self, node: &StructuralElement) {
        if let Some(paragraph) = &node.paragraph {
            match &paragraph.bullet {
                Some(bullet) => self.process_list_item(paragraph, bullet),
                None => {
                    self.lists.interrupt();
                    self.process_paragraph(paragraph);
                }
            }
        } else if let Some(table) = &node.table {
            self.lists.interrupt();
            self.process_table(table);
        } else {
            self.lists.interrupt();
        }
    }

    /// Format every inline element, recording footnote references.
    fn inline_parts(&mut self, paragraph: &Paragraph, with_bold: bool) -> Vec<String> {
        paragraph
            .elements
            .iter()
            .map(|el| {
                if let Some(reference) = &el.footnote_reference {
                    self.footnotes.record(reference);
                }
                self.formatter.format(el, with_bold)
            })
            .collect()
    }

    fn process_list_item(&mut self, paragraph: &Paragraph, bullet: &Bullet) {
        let list_id = bullet.list_id.as_deref().unwrap_or_default();
        let level = bullet.nesting_level.unwrap_or(0);
        let content = self.inline_parts(paragraph, true).concat();

        let item = ListItem {
            text: stringify_content(&content).to_string(),
            level,
            kind: self.document.list_kind(list_id, level),
        };
        let top_kind = self.document.list_kind(list_id, 0);
        self.lists.push(&mut self.elements, list_id, top_kind, item);
    }

    fn process_paragraph(&mut self, paragraph: &Paragraph) {
        let style = paragraph.paragraph_style.named_style_type;
        let heading_level = style.heading_level();

        let mut heading_text = String::new();
        let mut parts = Vec::new();
        for el in &paragraph.elements {
            if let Some(reference) = &el.footnote_reference {
                self.footnotes.record(reference);
            }
            let text = self.formatter.format(el, heading_level.is_none());
            if text.is_empty() {
                continue;
            }
            if heading_level.is_some()
                && el.horizontal_rule.is_none()
                && el.footnote_reference.is_none()
            {
                heading_text.push_str(&text);
            }
            parts.push(text);
        }

        if parts.is_empty() {
            return;
        }

        let mut content = stringify_content(&parts.concat()).to_string();
        let mut quoted = style == NamedStyle::Subtitle;

        let level = indent_level(paragraph);
        let baseline = *self.first_indent_level.get_or_insert(level);
        if self.indented_blockquotes && level > baseline {
            quoted = true;
            content = delete_smart_quotes(&content);
        }
        if level > 0 {
            content = format!("{}{}", INDENT_MARKER.repeat(level as usize), content);
        }

        if content.trim().is_empty() {
            return;
        }

        let element = match heading_level {
            _ if quoted => Element::Blockquote(content),
            Some(level) => Element::heading(level, content),
            None => Element::P(content),
        };
        self.elements.push(element);

        if let Some(level) = heading_level {
            let text = stringify_content(&heading_text);
            if !text.is_empty() {
                self.headings.push(HeadingRecord {
                    level,
                    text: text.to_string(),
                    index: self.elements.len() - 1,
                });
            }
        }
    }

    fn process_table(&mut self, table: &Table) {
        for row in &table.table_rows {
            for cell in &row.table_cells {
                for el in cell.paragraphs().flat_map(|p| &p.elements) {
                    if let Some(reference) = &el.footnote_reference {
                        self.footnotes.record(reference);
                    }
                }
            }
        }

        let element = if self.classifier.is_quote(table) {
            quote_element(&self.formatter, table)
        } else if self.classifier.is_code_block(table) {
            code_element(table)
        } else if table.row_count() > 0 {
            data_table_element(&self.formatter, table)
        } else {
            None
        };

        if let Some(element) = element {
            self.elements.push(element);
        }
    }
}

/// Indentation level of a paragraph.
///
/// Magnitudes that are not finite count as no indentation, and levels are
/// capped at [`MAX_INDENT_LEVEL`].
pub fn indent_level(paragraph: &Paragraph) -> u32 {
    let Some(magnitude) = paragraph
        .paragraph_style
        .indent_start
        .as_ref()
        .and_then(|dimension| dimension.magnitude)
    else {
        return 0;
    };

    if !magnitude.is_finite() {
        log::warn!("Ignoring non-finite indentation {}", magnitude);
        return 0;
    }

    let level = (magnitude / INDENT_UNIT).round().max(0.0);
    if level > f64::from(MAX_INDENT_LEVEL) {
        log::warn!(
            "Indentation {} exceeds {} levels, capping",
            magnitude,
            MAX_INDENT_LEVEL
        );
        return MAX_INDENT_LEVEL;
    }
    level as u32
}

/// Cover image: the first element of the first paragraph of the
/// first-page header, when it is an image.
pub fn extract_cover(document: &RawDocument) -> Option<Cover> {
    let header = document.first_page_header()?;
    let element = header
        .content
        .first()?
        .paragraph
        .as_ref()?
        .elements
        .first()?;
    let object_id = element
        .inline_object_element
        .as_ref()?
        .inline_object_id
        .as_deref()?;

    document.inline_image(object_id).map(Cover::from)
}
