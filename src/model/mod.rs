//! Document model types.
//!
//! Two sides: the input tree ([`RawDocument`] and its paragraphs and
//! tables), deserialized from a Google Docs export, and the output
//! elements ([`Element`]) the converter produces from it.

mod document;
mod element;
mod metadata;
mod paragraph;
mod table;

pub use document::{
    Body, DocumentStyle, EmbeddedObject, FootnoteDefinition, Header, ImageProperties,
    InlineObject, InlineObjectProperties, ListDefinition, ListProperties, NestingLevel,
    RawDocument, StructuralElement,
};
pub use element::{
    CodeBlock, Cover, Element, Footnote, HeadingRecord, Image, List, ListKind, ListNode,
    TableData,
};
pub use metadata::{document_path, kebab_case, Metadata, MetadataOptions};
pub use paragraph::{
    BaselineOffset, Bullet, Dimension, FootnoteReference, HorizontalRule, InlineObjectElement,
    Link, NamedStyle, Paragraph, ParagraphElement, ParagraphStyle, TextRun, TextStyle,
    WeightedFontFamily, MONOSPACE_FONTS,
};
pub use table::{Table, TableCell, TableRow};
