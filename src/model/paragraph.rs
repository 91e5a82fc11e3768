//! Paragraph and text-level types.

use super::document::{lenient, lenient_seq};
use serde::{Deserialize, Serialize};

/// Font families rendered as inline code.
pub const MONOSPACE_FONTS: &[&str] = &[
    "Consolas",
    "Courier New",
    "Roboto Mono",
    "Source Code Pro",
    "Inconsolata",
    "Ubuntu Mono",
    "Fira Code",
    "JetBrains Mono",
    "Cousine",
    "Space Mono",
    "IBM Plex Mono",
];

/// A paragraph of inline content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Paragraph {
    /// Inline elements in the paragraph
    #[serde(deserialize_with = "lenient_seq")]
    pub elements: Vec<ParagraphElement>,

    /// Paragraph style
    #[serde(deserialize_with = "lenient")]
    pub paragraph_style: ParagraphStyle,

    /// List membership, if this paragraph is a list item
    pub bullet: Option<Bullet>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with plain text.
    ///
    /// A trailing newline is appended, as in exported documents.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(format!("{}\n", text.into()));
        p
    }

    /// Create a heading paragraph.
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        let mut p = Self::with_text(text);
        p.paragraph_style.named_style_type = NamedStyle::heading(level);
        p
    }

    /// Create a list item paragraph.
    pub fn list_item(list_id: impl Into<String>, nesting_level: u32, text: impl Into<String>) -> Self {
        let mut p = Self::with_text(text);
        p.bullet = Some(Bullet {
            list_id: Some(list_id.into()),
            nesting_level: Some(nesting_level),
        });
        p
    }

    /// Set the named style and return self.
    pub fn styled(mut self, style: NamedStyle) -> Self {
        self.paragraph_style.named_style_type = style;
        self
    }

    /// Set the start indentation in points and return self.
    pub fn indented(mut self, points: f64) -> Self {
        self.paragraph_style.indent_start = Some(Dimension::points(points));
        self
    }

    /// Add plain text to the paragraph.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.add_run(TextRun::new(text));
    }

    /// Add a styled text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.elements.push(ParagraphElement::text(run));
    }

    /// Add an inline element.
    pub fn add_element(&mut self, element: ParagraphElement) {
        self.elements.push(element);
    }

    /// Concatenated raw text of all runs, without any formatting.
    pub fn plain_text(&self) -> String {
        self.elements
            .iter()
            .filter_map(|el| el.text_run.as_ref())
            .filter_map(|run| run.content.as_deref())
            .collect()
    }

    /// Check if the paragraph has no visible text.
    pub fn is_empty(&self) -> bool {
        self.plain_text().trim().is_empty()
    }

    /// Check if this is a list item.
    pub fn is_list_item(&self) -> bool {
        self.bullet.is_some()
    }
}

/// One inline element of a paragraph.
///
/// Exactly one of the fields is expected to be set; anything else (page
/// breaks, auto text, equations) renders as nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParagraphElement {
    /// Styled text
    pub text_run: Option<TextRun>,

    /// Reference to an inline object (image)
    pub inline_object_element: Option<InlineObjectElement>,

    /// Horizontal rule marker
    pub horizontal_rule: Option<HorizontalRule>,

    /// Reference to a footnote
    pub footnote_reference: Option<FootnoteReference>,
}

impl ParagraphElement {
    /// Create a text element.
    pub fn text(run: TextRun) -> Self {
        Self {
            text_run: Some(run),
            ..Default::default()
        }
    }

    /// Create an inline image element.
    pub fn inline_object(object_id: impl Into<String>) -> Self {
        Self {
            inline_object_element: Some(InlineObjectElement {
                inline_object_id: Some(object_id.into()),
            }),
            ..Default::default()
        }
    }

    /// Create a horizontal rule element.
    pub fn horizontal_rule() -> Self {
        Self {
            horizontal_rule: Some(HorizontalRule {}),
            ..Default::default()
        }
    }

    /// Create a footnote reference element.
    pub fn footnote_reference(footnote_id: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            footnote_reference: Some(FootnoteReference {
                footnote_id: Some(footnote_id.into()),
                footnote_number: Some(number.into()),
            }),
            ..Default::default()
        }
    }
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextRun {
    /// The text content
    pub content: Option<String>,

    /// Text styling
    #[serde(deserialize_with = "lenient")]
    pub text_style: TextStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            text_style: TextStyle::default(),
        }
    }

    /// Create a text run with the given style.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            content: Some(text.into()),
            text_style: style,
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                bold: true,
                ..Default::default()
            },
        )
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                italic: true,
                ..Default::default()
            },
        )
    }

    /// Create a linked text run.
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                link: Some(Link {
                    url: Some(url.into()),
                    ..Default::default()
                }),
                ..Default::default()
            },
        )
    }

    /// Create a text run in the given font family.
    pub fn with_font(text: impl Into<String>, font_family: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                weighted_font_family: Some(WeightedFontFamily {
                    font_family: Some(font_family.into()),
                    weight: None,
                }),
                ..Default::default()
            },
        )
    }

    /// Check if this run has no text.
    pub fn is_empty(&self) -> bool {
        self.content.as_deref().map_or(true, str::is_empty)
    }
}

/// Text styling properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Underlined text
    pub underline: bool,

    /// Strikethrough text
    pub strikethrough: bool,

    /// Superscript / subscript
    pub baseline_offset: BaselineOffset,

    /// Hyperlink
    pub link: Option<Link>,

    /// Font family and weight
    pub weighted_font_family: Option<WeightedFontFamily>,
}

impl TextStyle {
    /// Check if the run is set in a fixed-width code font.
    pub fn is_monospace(&self) -> bool {
        self.weighted_font_family
            .as_ref()
            .and_then(|font| font.font_family.as_deref())
            .is_some_and(|family| MONOSPACE_FONTS.contains(&family))
    }

    /// URL of the link, if the run links to a web address.
    pub fn link_url(&self) -> Option<&str> {
        self.link.as_ref().and_then(|link| link.url.as_deref())
    }
}

/// Vertical offset of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BaselineOffset {
    /// Normal baseline
    #[default]
    None,
    /// Raised text
    Superscript,
    /// Lowered text
    Subscript,
    /// Unspecified or unknown value
    #[serde(other)]
    BaselineOffsetUnspecified,
}

/// A hyperlink target.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Link {
    /// External URL
    pub url: Option<String>,

    /// Target heading inside the document
    pub heading_id: Option<String>,

    /// Target bookmark inside the document
    pub bookmark_id: Option<String>,
}

/// Font family with weight.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeightedFontFamily {
    /// Font family name
    pub font_family: Option<String>,

    /// Font weight (100-900)
    pub weight: Option<u32>,
}

/// Reference to an inline object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InlineObjectElement {
    /// Inline object ID
    pub inline_object_id: Option<String>,
}

/// Horizontal rule marker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HorizontalRule {}

/// Reference to a footnote.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FootnoteReference {
    /// Footnote ID
    pub footnote_id: Option<String>,

    /// Display number assigned by the document
    pub footnote_number: Option<String>,
}

/// List membership of a paragraph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bullet {
    /// ID of the list this item belongs to
    pub list_id: Option<String>,

    /// Nesting level (0 = top level)
    pub nesting_level: Option<u32>,
}

/// Paragraph styling properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParagraphStyle {
    /// Named style (normal text, headings, ...)
    pub named_style_type: NamedStyle,

    /// Start indentation
    pub indent_start: Option<Dimension>,
}

/// A magnitude with a unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dimension {
    /// Magnitude
    pub magnitude: Option<f64>,

    /// Unit (`PT`)
    pub unit: Option<String>,
}

impl Dimension {
    /// Create a dimension in points.
    pub fn points(magnitude: f64) -> Self {
        Self {
            magnitude: Some(magnitude),
            unit: Some("PT".to_string()),
        }
    }
}

/// Named paragraph style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamedStyle {
    /// Body text
    #[default]
    #[serde(rename = "NORMAL_TEXT")]
    NormalText,
    /// Document title
    #[serde(rename = "TITLE")]
    Title,
    /// Subtitle
    #[serde(rename = "SUBTITLE")]
    Subtitle,
    /// Heading 1
    #[serde(rename = "HEADING_1")]
    Heading1,
    /// Heading 2
    #[serde(rename = "HEADING_2")]
    Heading2,
    /// Heading 3
    #[serde(rename = "HEADING_3")]
    Heading3,
    /// Heading 4
    #[serde(rename = "HEADING_4")]
    Heading4,
    /// Heading 5
    #[serde(rename = "HEADING_5")]
    Heading5,
    /// Heading 6
    #[serde(rename = "HEADING_6")]
    Heading6,
    /// Unspecified or unknown style
    #[serde(other, rename = "NAMED_STYLE_TYPE_UNSPECIFIED")]
    Unspecified,
}

impl NamedStyle {
    /// Heading style for a level (clamped to 1-6).
    pub fn heading(level: u8) -> Self {
        match level.clamp(1, 6) {
            1 => NamedStyle::Heading1,
            2 => NamedStyle::Heading2,
            3 => NamedStyle::Heading3,
            4 => NamedStyle::Heading4,
            5 => NamedStyle::Heading5,
            _ => NamedStyle::Heading6,
        }
    }

    /// Heading level (1-6), or None for non-heading styles.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            NamedStyle::Heading1 => Some(1),
            NamedStyle::Heading2 => Some(2),
            NamedStyle::Heading3 => Some(3),
            NamedStyle::Heading4 => Some(4),
            NamedStyle::Heading5 => Some(5),
            NamedStyle::Heading6 => Some(6),
            _ => None,
        }
    }
}
