//! Rendering module for converting element sequences to output formats.

mod json;
mod markdown;
mod options;
mod result;

pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, to_markdown_with_stats, MarkdownRenderer};
pub use options::{default_footnote_rule, FootnoteRule, RenderOptions};
pub use result::{ExtractionStats, RenderResult};
