//! Document-level types.
//!
//! These mirror the Google Docs API `Document` resource closely enough to
//! deserialize an exported payload directly. Every field is optional on
//! input, and malformed nodes degrade to empty ones instead of failing the
//! whole document.

use super::{Image, ListKind, Paragraph, Table};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::io::Read;

/// A Google Docs document tree, as returned by `documents.get`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawDocument {
    /// Document ID
    pub document_id: Option<String>,

    /// Document title
    pub title: Option<String>,

    /// Main body
    #[serde(deserialize_with = "lenient")]
    pub body: Body,

    /// Headers keyed by header ID
    #[serde(deserialize_with = "lenient_map")]
    pub headers: HashMap<String, Header>,

    /// Footnote definitions keyed by footnote ID
    #[serde(deserialize_with = "lenient_sorted_map")]
    pub footnotes: BTreeMap<String, FootnoteDefinition>,

    /// List definitions keyed by list ID
    #[serde(deserialize_with = "lenient_map")]
    pub lists: HashMap<String, ListDefinition>,

    /// Inline objects (images) keyed by object ID
    #[serde(deserialize_with = "lenient_map")]
    pub inline_objects: HashMap<String, InlineObject>,

    /// Document-wide style
    #[serde(deserialize_with = "lenient")]
    pub document_style: DocumentStyle,
}

impl RawDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a document from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Decode a document from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::InvalidDocument(format!(
                "expected a JSON object, found {}",
                json_kind(&value)
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Decode a document from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }

    /// Structural elements of the body, in document order.
    pub fn content(&self) -> &[StructuralElement] {
        &self.body.content
    }

    /// Append a paragraph to the body.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.body.content.push(StructuralElement::paragraph(paragraph));
    }

    /// Append a table to the body.
    pub fn add_table(&mut self, table: Table) {
        self.body.content.push(StructuralElement::table(table));
    }

    /// Register a list definition with one glyph type per nesting level.
    ///
    /// `None` marks a bulleted level.
    pub fn add_list(&mut self, list_id: impl Into<String>, glyph_types: &[Option<&str>]) {
        let nesting_levels = glyph_types
            .iter()
            .map(|glyph| NestingLevel {
                glyph_type: glyph.map(str::to_string),
                glyph_symbol: glyph.is_none().then(|| "●".to_string()),
            })
            .collect();
        self.lists.insert(
            list_id.into(),
            ListDefinition {
                list_properties: ListProperties { nesting_levels },
            },
        );
    }

    /// Register a footnote definition.
    pub fn add_footnote(&mut self, footnote_id: impl Into<String>, content: Vec<Paragraph>) {
        let footnote_id = footnote_id.into();
        self.footnotes.insert(
            footnote_id.clone(),
            FootnoteDefinition {
                footnote_id: Some(footnote_id),
                content: content.into_iter().map(StructuralElement::paragraph).collect(),
            },
        );
    }

    /// Register an inline image object.
    pub fn add_inline_image(&mut self, object_id: impl Into<String>, image: Image) {
        self.inline_objects.insert(
            object_id.into(),
            InlineObject {
                inline_object_properties: InlineObjectProperties {
                    embedded_object: EmbeddedObject {
                        title: Some(image.title),
                        description: Some(image.alt),
                        image_properties: Some(ImageProperties {
                            content_uri: Some(image.source),
                        }),
                    },
                },
            },
        );
    }

    /// Whether the list declares a numbering glyph at the given nesting level.
    pub fn list_kind(&self, list_id: &str, level: u32) -> ListKind {
        let glyph = self
            .lists
            .get(list_id)
            .and_then(|list| list.list_properties.nesting_levels.get(level as usize))
            .and_then(|nesting| nesting.glyph_type.as_deref());

        match glyph {
            Some(glyph) if !glyph.is_empty() && glyph != "GLYPH_TYPE_UNSPECIFIED" => ListKind::Ol,
            _ => ListKind::Ul,
        }
    }

    /// Resolve an inline object to an image.
    pub fn inline_image(&self, object_id: &str) -> Option<Image> {
        let embedded = &self
            .inline_objects
            .get(object_id)?
            .inline_object_properties
            .embedded_object;
        let source = embedded.image_properties.as_ref()?.content_uri.clone()?;

        Some(Image {
            source,
            title: embedded.title.clone().unwrap_or_default(),
            alt: embedded.description.clone().unwrap_or_default(),
        })
    }

    /// The header shown on the first page, if the document declares one.
    pub fn first_page_header(&self) -> Option<&Header> {
        let header_id = self.document_style.first_page_header_id.as_deref()?;
        self.headers.get(header_id)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Document body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Body {
    /// Structural elements in document order
    #[serde(deserialize_with = "lenient_seq")]
    pub content: Vec<StructuralElement>,
}

/// A body-level node: paragraph or table.
///
/// Section breaks and tables of contents deserialize to an element with
/// neither field set and are skipped by the converter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuralElement {
    /// Paragraph content
    pub paragraph: Option<Paragraph>,

    /// Table content
    pub table: Option<Table>,
}

impl StructuralElement {
    /// Wrap a paragraph.
    pub fn paragraph(paragraph: Paragraph) -> Self {
        Self {
            paragraph: Some(paragraph),
            table: None,
        }
    }

    /// Wrap a table.
    pub fn table(table: Table) -> Self {
        Self {
            paragraph: None,
            table: Some(table),
        }
    }
}

/// A page header.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Header {
    /// Header ID
    pub header_id: Option<String>,

    /// Header content
    #[serde(deserialize_with = "lenient_seq")]
    pub content: Vec<StructuralElement>,
}

/// A footnote definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FootnoteDefinition {
    /// Footnote ID
    pub footnote_id: Option<String>,

    /// Footnote content
    #[serde(deserialize_with = "lenient_seq")]
    pub content: Vec<StructuralElement>,
}

impl FootnoteDefinition {
    /// Paragraphs of the footnote, skipping any other node.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.content.iter().filter_map(|node| node.paragraph.as_ref())
    }
}

/// A list definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListDefinition {
    /// List properties
    pub list_properties: ListProperties,
}

/// Per-level list properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListProperties {
    /// One entry per nesting level (0-based)
    #[serde(deserialize_with = "lenient_seq")]
    pub nesting_levels: Vec<NestingLevel>,
}

/// Glyph settings of one list nesting level.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NestingLevel {
    /// Numbering glyph (e.g. `DECIMAL`, `ALPHA`); absent for bullets
    pub glyph_type: Option<String>,

    /// Bullet glyph (e.g. `●`)
    pub glyph_symbol: Option<String>,
}

/// An inline object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InlineObject {
    /// Object properties
    pub inline_object_properties: InlineObjectProperties,
}

/// Inline object properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InlineObjectProperties {
    /// The embedded object
    pub embedded_object: EmbeddedObject,
}

/// An embedded object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmbeddedObject {
    /// Object title
    pub title: Option<String>,

    /// Object description (used as alt text)
    pub description: Option<String>,

    /// Image properties, present for images
    pub image_properties: Option<ImageProperties>,
}

/// Image properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageProperties {
    /// Image URL
    pub content_uri: Option<String>,
}

/// Document-wide style.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentStyle {
    /// Header used on the first page
    pub first_page_header_id: Option<String>,
}

/// Deserialize a value, falling back to its default when malformed.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(decode_or_default(value))
}

/// Deserialize a sequence, replacing each malformed item by its default.
pub(crate) fn lenient_seq<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items.into_iter().map(decode_or_default).collect()),
        Value::Null => Ok(Vec::new()),
        other => {
            log::warn!("Expected an array, found {}; ignoring", json_kind(&other));
            Ok(Vec::new())
        }
    }
}

/// Deserialize a keyed table, replacing each malformed entry by its default.
pub(crate) fn lenient_map<'de, D, T>(
    deserializer: D,
) -> std::result::Result<HashMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient_entries(Value::deserialize(deserializer)?)
        .into_iter()
        .collect())
}

/// Like [`lenient_map`], keeping keys sorted.
pub(crate) fn lenient_sorted_map<'de, D, T>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient_entries(Value::deserialize(deserializer)?)
        .into_iter()
        .collect())
}

fn lenient_entries<T: DeserializeOwned + Default>(value: Value) -> Vec<(String, T)> {
    match value {
        Value::Object(entries) => entries
            .into_iter()
            .map(|(key, value)| (key, decode_or_default(value)))
            .collect(),
        Value::Null => Vec::new(),
        other => {
            log::warn!("Expected an object, found {}; ignoring", json_kind(&other));
            Vec::new()
        }
    }
}

fn decode_or_default<T: DeserializeOwned + Default>(value: Value) -> T {
    T::deserialize(value).unwrap_or_else(|err| {
        log::warn!("Skipping malformed node: {}", err);
        T::default()
    })
}
