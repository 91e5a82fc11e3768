//! Inline formatting: one paragraph element to one markdown string.

use crate::model::{BaselineOffset, Image, ParagraphElement, RawDocument, TextRun};
use regex::Regex;
use std::sync::LazyLock;

/// A run that is a plain word sequence, with the surrounding spaces
/// captured separately so style markers hug the words.
static WORD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^( *)([A-Za-z0-9_]+(?: [A-Za-z0-9_]+)*)( *)$").unwrap());

/// Formats the inline elements of one document.
#[derive(Debug, Clone, Copy)]
pub struct InlineFormatter<'a> {
    document: &'a RawDocument,
}

impl<'a> InlineFormatter<'a> {
    /// Create a formatter resolving images against the given document.
    pub fn new(document: &'a RawDocument) -> Self {
        Self { document }
    }

    /// Format one paragraph element.
    ///
    /// Horizontal rules give `<hr/>`, footnote references give `[^N]`.
    /// Elements with nothing renderable give an empty string.
    pub fn format(&self, element: &ParagraphElement, with_bold: bool) -> String {
        if element.horizontal_rule.is_some() {
            return "<hr/>".to_string();
        }

        if let Some(reference) = &element.footnote_reference {
            return match reference.footnote_number.as_deref() {
                Some(number) => format!("[^{}]", number),
                None => String::new(),
            };
        }

        if let Some(object) = &element.inline_object_element {
            let image = object
                .inline_object_id
                .as_deref()
                .and_then(|id| self.document.inline_image(id));
            return match image {
                Some(image) => format_image(&image),
                None => {
                    log::warn!(
                        "Inline object {:?} is not an image; skipping",
                        object.inline_object_id
                    );
                    String::new()
                }
            };
        }

        element
            .text_run
            .as_ref()
            .map(|run| format_text_run(run, with_bold))
            .unwrap_or_default()
    }

    /// Format and concatenate a sequence of elements.
    pub fn format_all<'e>(
        &self,
        elements: impl IntoIterator<Item = &'e ParagraphElement>,
        with_bold: bool,
    ) -> String {
        elements
            .into_iter()
            .map(|el| self.format(el, with_bold))
            .collect()
    }
}

/// Format an image as `![alt](source "title")`.
pub fn format_image(image: &Image) -> String {
    format!("![{}]({} \"{}\")", image.alt, image.source, image.title)
}

/// Format a styled text run.
pub fn format_text_run(run: &TextRun, with_bold: bool) -> String {
    let content = match run.content.as_deref() {
        None | Some("") | Some("\n") => return String::new(),
        Some(content) => content,
    };

    let (before, core, after) = match WORD_RUN.captures(content) {
        Some(caps) => (
            caps.get(1).map_or("", |m| m.as_str()),
            caps.get(2).map_or("", |m| m.as_str()),
            caps.get(3).map_or("", |m| m.as_str()),
        ),
        None => ("", content, ""),
    };
    let core = core.strip_suffix('\n').unwrap_or(core);

    let style = &run.text_style;

    if style.is_monospace() {
        return format!("{}`{}`{}", before, core, after);
    }

    let mut text = core.replace('*', "\\*").replace('_', "\\_");

    match style.baseline_offset {
        BaselineOffset::Superscript => text = format!("<sup>{}</sup>", text),
        BaselineOffset::Subscript => text = format!("<sub>{}</sub>", text),
        _ => {}
    }

    if style.underline && style.link.is_none() {
        text = format!("<ins>{}</ins>", text);
    }
    if style.italic {
        text = format!("_{}_", text);
    }
    if style.bold && with_bold {
        text = format!("**{}**", text);
    }
    if style.strikethrough {
        text = format!("~~{}~~", text);
    }

    let full = format!("{}{}{}", before, text, after);

    if let Some(url) = style.link_url() {
        return format!("[{}]({})", full, url);
    }

    guard_leading_whitespace(full)
}

/// Keep leading whitespace from turning the block into indented code.
fn guard_leading_whitespace(text: String) -> String {
    if let Some(rest) = text.strip_prefix('\t') {
        format!("&#9;{}", rest)
    } else if text.starts_with("    ") {
        format!("&#32;{}", &text[1..])
    } else {
        text
    }
}

/// Remove typographic double quotes.
pub fn delete_smart_quotes(text: &str) -> String {
    text.replace(['“', '”'], "")
}

/// Strip one trailing newline from joined inline content.
pub fn stringify_content(content: &str) -> &str {
    content.strip_suffix('\n').unwrap_or(content)
}
