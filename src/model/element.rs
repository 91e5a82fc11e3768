//! Output element types.
//!
//! The converter turns a document tree into a flat sequence of [`Element`]s,
//! one per markdown block. Elements serialize as `{"type": ..., "value": ...}`
//! so the sequence can be handed to other tools as JSON.

use serde::{Deserialize, Serialize};

/// One markdown block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Element {
    /// Level 1 heading
    H1(String),
    /// Level 2 heading
    H2(String),
    /// Level 3 heading
    H3(String),
    /// Level 4 heading
    H4(String),
    /// Level 5 heading
    H5(String),
    /// Level 6 heading
    H6(String),
    /// Paragraph
    P(String),
    /// Blockquote
    Blockquote(String),
    /// Fenced code block
    Code(CodeBlock),
    /// Data table
    Table(TableData),
    /// Bulleted list
    Ul(Vec<ListNode>),
    /// Numbered list
    Ol(Vec<ListNode>),
    /// Standalone image
    Img(Image),
    /// Footnote definition
    Footnote(Footnote),
}

impl Element {
    /// Create a heading element, clamping the level to 1-6.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        let text = text.into();
        match level.clamp(1, 6) {
            1 => Element::H1(text),
            2 => Element::H2(text),
            3 => Element::H3(text),
            4 => Element::H4(text),
            5 => Element::H5(text),
            _ => Element::H6(text),
        }
    }

    /// Create a list element of the given kind.
    pub fn list(kind: ListKind, items: Vec<ListNode>) -> Self {
        match kind {
            ListKind::Ul => Element::Ul(items),
            ListKind::Ol => Element::Ol(items),
        }
    }

    /// Heading level, or None if this is not a heading.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Element::H1(_) => Some(1),
            Element::H2(_) => Some(2),
            Element::H3(_) => Some(3),
            Element::H4(_) => Some(4),
            Element::H5(_) => Some(5),
            Element::H6(_) => Some(6),
            _ => None,
        }
    }

    /// Block type name, as used in the serialized form.
    pub fn tag(&self) -> &'static str {
        match self {
            Element::H1(_) => "h1",
            Element::H2(_) => "h2",
            Element::H3(_) => "h3",
            Element::H4(_) => "h4",
            Element::H5(_) => "h5",
            Element::H6(_) => "h6",
            Element::P(_) => "p",
            Element::Blockquote(_) => "blockquote",
            Element::Code(_) => "code",
            Element::Table(_) => "table",
            Element::Ul(_) => "ul",
            Element::Ol(_) => "ol",
            Element::Img(_) => "img",
            Element::Footnote(_) => "footnote",
        }
    }

    /// Text of a heading, paragraph or blockquote.
    pub fn text(&self) -> Option<&str> {
        match self {
            Element::H1(text)
            | Element::H2(text)
            | Element::H3(text)
            | Element::H4(text)
            | Element::H5(text)
            | Element::H6(text)
            | Element::P(text)
            | Element::Blockquote(text) => Some(text),
            _ => None,
        }
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        self.heading_level().is_some()
    }

    /// Mutable access to the items of a list element.
    pub fn list_items_mut(&mut self) -> Option<&mut Vec<ListNode>> {
        match self {
            Element::Ul(items) | Element::Ol(items) => Some(items),
            _ => None,
        }
    }

    /// Visit every string leaf of the element.
    pub fn for_each_text_mut<F: FnMut(&mut String)>(&mut self, f: &mut F) {
        match self {
            Element::H1(text)
            | Element::H2(text)
            | Element::H3(text)
            | Element::H4(text)
            | Element::H5(text)
            | Element::H6(text)
            | Element::P(text)
            | Element::Blockquote(text) => f(text),
            Element::Code(code) => {
                if let Some(language) = code.language.as_mut() {
                    f(language);
                }
                code.lines.iter_mut().for_each(|line| f(line));
            }
            Element::Table(table) => {
                table.headers.iter_mut().for_each(|cell| f(cell));
                table
                    .rows
                    .iter_mut()
                    .flatten()
                    .for_each(|cell| f(cell));
            }
            Element::Ul(items) | Element::Ol(items) => {
                items.iter_mut().for_each(|node| node.for_each_text_mut(f));
            }
            Element::Img(image) => {
                f(&mut image.source);
                f(&mut image.title);
                f(&mut image.alt);
            }
            Element::Footnote(footnote) => {
                f(&mut footnote.number);
                f(&mut footnote.text);
            }
        }
    }
}

/// Fenced code block content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Language tag, if the block declared one
    pub language: Option<String>,

    /// Code lines
    pub lines: Vec<String>,
}

/// Data table content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    /// Header cells (first row)
    pub headers: Vec<String>,

    /// Body rows
    pub rows: Vec<Vec<String>>,
}

/// An image reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Image URL
    pub source: String,

    /// Image title
    pub title: String,

    /// Alt text
    pub alt: String,
}

impl Image {
    /// Create a new image with empty title and alt text.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    /// Set the title and return self.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the alt text and return self.
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = alt.into();
        self
    }
}

/// A footnote definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Footnote {
    /// Display number, as declared by the document
    pub number: String,

    /// Rendered footnote text
    pub text: String,
}

/// Bulleted or numbered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Bulleted list
    #[default]
    Ul,
    /// Numbered list
    Ol,
}

/// A nested list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct List {
    /// List kind
    #[serde(rename = "type")]
    pub kind: ListKind,

    /// Items and sublists
    #[serde(rename = "value")]
    pub items: Vec<ListNode>,
}

impl List {
    /// Create a list holding a single item.
    pub fn with_item(kind: ListKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            items: vec![ListNode::Item(text.into())],
        }
    }
}

/// An entry of a list: an item, or a sublist rendered under the
/// preceding item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListNode {
    /// Item text
    Item(String),
    /// Nested sublist
    List(List),
}

impl ListNode {
    /// Visit every string leaf of the node.
    pub fn for_each_text_mut<F: FnMut(&mut String)>(&mut self, f: &mut F) {
        match self {
            ListNode::Item(text) => f(text),
            ListNode::List(list) => list
                .items
                .iter_mut()
                .for_each(|node| node.for_each_text_mut(f)),
        }
    }

    /// Depth of the node: 0 for an item, 1 + deepest child for a sublist.
    pub fn depth(&self) -> usize {
        match self {
            ListNode::Item(_) => 0,
            ListNode::List(list) => 1 + list.items.iter().map(ListNode::depth).max().unwrap_or(0),
        }
    }
}

/// Cover image of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cover {
    /// Image URL
    pub image: String,

    /// Image title
    pub title: String,

    /// Alt text
    pub alt: String,
}

impl From<Image> for Cover {
    fn from(image: Image) -> Self {
        Self {
            image: image.source,
            title: image.title,
            alt: image.alt,
        }
    }
}

/// A heading seen during conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingRecord {
    /// Heading level (1-6) as declared by the document
    pub level: u8,

    /// Heading text
    pub text: String,

    /// Position of the heading's element in the element sequence
    pub index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_element_serialization() {
        let element = Element::heading(2, "Intro");
        assert_eq!(
            serde_json::to_value(&element).unwrap(),
            json!({"type": "h2", "value": "Intro"})
        );

        let element = Element::Code(CodeBlock {
            language: Some("rust".to_string()),
            lines: vec!["fn main() {}".to_string()],
        });
        assert_eq!(
            serde_json::to_value(&element).unwrap(),
            json!({"type": "code", "value": {"language": "rust", "lines": ["fn main() {}"]}})
        );
    }

    #[test]
    fn test_list_serialization() {
        let element = Element::Ul(vec![
            ListNode::Item("a".to_string()),
            ListNode::List(List::with_item(ListKind::Ol, "b")),
        ]);
        let value = serde_json::to_value(&element).unwrap();
        assert_eq!(
            value,
            json!({"type": "ul", "value": ["a", {"type": "ol", "value": ["b"]}]})
        );

        let back: Element = serde_json::from_value(value).unwrap();
        assert_eq!(back, element);
    }

    #[test]
    fn test_heading_helpers() {
        assert_eq!(Element::heading(0, "x").heading_level(), Some(1));
        assert_eq!(Element::heading(8, "x").tag(), "h6");
        assert!(Element::P("x".to_string()).heading_level().is_none());
        assert_eq!(Element::Blockquote("q".to_string()).text(), Some("q"));
    }

    #[test]
    fn test_for_each_text_mut_reaches_nested_items() {
        let mut element = Element::Ol(vec![
            ListNode::Item("one".to_string()),
            ListNode::List(List {
                kind: ListKind::Ul,
                items: vec![
                    ListNode::Item("two".to_string()),
                    ListNode::List(List::with_item(ListKind::Ul, "three")),
                ],
            }),
        ]);

        let mut seen = Vec::new();
        element.for_each_text_mut(&mut |text: &mut String| {
            seen.push(text.clone());
            text.make_ascii_uppercase();
        });

        assert_eq!(seen, ["one", "two", "three"]);
        assert_eq!(element.list_items_mut().unwrap()[0], ListNode::Item("ONE".to_string()));
    }

    #[test]
    fn test_list_depth() {
        let node = ListNode::List(List {
            kind: ListKind::Ul,
            items: vec![
                ListNode::Item("f".to_string()),
                ListNode::List(List::with_item(ListKind::Ul, "g")),
            ],
        });
        assert_eq!(node.depth(), 2);
        assert_eq!(ListNode::Item("x".to_string()).depth(), 0);
    }

    #[test]
    fn test_cover_from_image() {
        let cover = Cover::from(Image::new("https://example.com/c.png").with_alt("Cover"));
        assert_eq!(cover.image, "https://example.com/c.png");
        assert_eq!(cover.alt, "Cover");
        assert_eq!(cover.title, "");
    }
}
