//! Markdown rendering of element sequences.

use crate::convert::{format_image, DocumentObject};
use crate::error::Result;
use crate::model::{CodeBlock, Element, ListKind, ListNode, TableData};

use super::{ExtractionStats, RenderOptions, RenderResult};

/// Convert a document object to Markdown.
pub fn to_markdown(doc: &DocumentObject, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document object to Markdown with statistics.
pub fn to_markdown_with_stats(doc: &DocumentObject, options: &RenderOptions) -> Result<RenderResult> {
    let mut options = options.clone();
    options.collect_stats = true;
    let renderer = MarkdownRenderer::new(options);
    renderer.render_with_stats(doc)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
    stats: ExtractionStats,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: ExtractionStats::new(),
        }
    }

    /// Render a document object to Markdown.
    pub fn render(mut self, doc: &DocumentObject) -> Result<String> {
        self.render_internal(doc)
    }

    /// Render a document object to Markdown with extraction statistics.
    pub fn render_with_stats(mut self, doc: &DocumentObject) -> Result<RenderResult> {
        self.options.collect_stats = true;
        let content = self.render_internal(doc)?;
        Ok(RenderResult::new(content, doc.metadata.clone(), self.stats))
    }

    /// Render the body only, without frontmatter.
    pub fn render_body(&mut self, elements: &[Element]) -> String {
        let mut output = String::new();
        for element in elements {
            if self.options.collect_stats {
                self.stats.add_element(element);
            }
            self.render_element(&mut output, element);
        }
        output.trim_start_matches('\n').trim_end().to_string()
    }

    fn render_internal(&mut self, doc: &DocumentObject) -> Result<String> {
        let mut output = String::new();

        if self.options.include_frontmatter {
            output.push_str(&doc.metadata.to_yaml_frontmatter(doc.cover.as_ref())?);
        }

        let body = self.render_body(&doc.elements);
        if self.options.collect_stats {
            self.stats.count_text(&body);
        }

        if !body.is_empty() {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str(&body);
            output.push('\n');
        }

        Ok(output)
    }

    fn render_element(&self, output: &mut String, element: &Element) {
        match element {
            Element::P(text) => output.push_str(text),
            Element::Blockquote(text) => {
                let quoted: Vec<String> = text.lines().map(|line| format!("> {}", line)).collect();
                output.push_str(&quoted.join("\n"));
            }
            Element::Code(code) => render_code(output, code),
            Element::Table(table) => render_table(output, table),
            Element::Ul(items) => self.render_list(output, items, ListKind::Ul, ""),
            Element::Ol(items) => self.render_list(output, items, ListKind::Ol, ""),
            Element::Img(image) => output.push_str(&format_image(image)),
            Element::Footnote(footnote) => output.push_str(&(self.options.footnote_rule)(footnote)),
            heading => {
                let level = heading.heading_level().unwrap_or(1);
                output.push_str(&"#".repeat(level as usize));
                output.push(' ');
                output.push_str(heading.text().unwrap_or_default());
            }
        }

        // Trailing newline of list output is folded into the block gap
        while output.ends_with('\n') {
            output.pop();
        }
        output.push_str("\n\n");
    }

    fn render_list(&self, output: &mut String, items: &[ListNode], kind: ListKind, indent: &str) {
        let mut number = 0;
        let mut marker_width = self.marker(kind, 1).len() + 1;

        for node in items {
            match node {
                ListNode::Item(text) => {
                    number += 1;
                    let marker = self.marker(kind, number);
                    marker_width = marker.len() + 1;
                    let continuation = format!("\n{}{}", indent, " ".repeat(marker_width));

                    output.push_str(indent);
                    output.push_str(&marker);
                    output.push(' ');
                    output.push_str(&text.replace('\n', &continuation));
                    output.push('\n');
                }
                ListNode::List(sublist) => {
                    let nested = format!("{}{}", indent, " ".repeat(marker_width));
                    self.render_list(output, &sublist.items, sublist.kind, &nested);
                }
            }
        }
    }

    fn marker(&self, kind: ListKind, number: usize) -> String {
        match kind {
            ListKind::Ul => self.options.list_marker.to_string(),
            ListKind::Ol => format!("{}.", number),
        }
    }
}

fn render_code(output: &mut String, code: &CodeBlock) {
    output.push_str("```");
    output.push_str(code.language.as_deref().unwrap_or_default());
    output.push('\n');
    for line in &code.lines {
        output.push_str(line);
        output.push('\n');
    }
    output.push_str("```");
}

fn render_table(output: &mut String, table: &TableData) {
    let columns = table
        .rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(table.headers.len()))
        .max()
        .unwrap_or(0);
    if columns == 0 {
        return;
    }

    push_row(output, &table.headers, columns);
    output.push('|');
    for _ in 0..columns {
        output.push_str(" --- |");
    }
    output.push('\n');
    for row in &table.rows {
        push_row(output, row, columns);
    }
}

fn push_row(output: &mut String, cells: &[String], columns: usize) {
    output.push('|');
    for i in 0..columns {
        let cell = cells.get(i).map(String::as_str).unwrap_or_default();
        output.push(' ');
        output.push_str(&cell.replace('|', "\\|"));
        output.push_str(" |");
    }
    output.push('\n');
}
