//! Table interpretation.
//!
//! Writers often use a 1x1 table as a box around a quote or a code
//! snippet. A [`TableClassifier`] decides which single-cell tables are
//! such boxes; everything else with rows becomes a data table.

use super::inline::{delete_smart_quotes, InlineFormatter};
use crate::model::{CodeBlock, Element, Table, TableCell, TableData};
use regex::Regex;
use std::sync::LazyLock;

static LANG_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*lang:\s*(.*)$").unwrap());

/// Decides whether a table is a boxed quote or a boxed code block.
pub trait TableClassifier: Send + Sync {
    /// Check if the table holds a quote.
    fn is_quote(&self, table: &Table) -> bool;

    /// Check if the table holds a code block.
    fn is_code_block(&self, table: &Table) -> bool;
}

/// Classifier based on cell content.
///
/// A single-cell table is code when every non-blank run is set in a
/// monospace font, and a quote when its text opens with a quotation mark.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTableClassifier;

impl TableClassifier for DefaultTableClassifier {
    fn is_quote(&self, table: &Table) -> bool {
        if !table.is_single_cell() || self.is_code_block(table) {
            return false;
        }
        table.first_cell().is_some_and(|cell| {
            let text = cell.plain_text();
            let text = text.trim_start();
            text.starts_with('“') || text.starts_with('"')
        })
    }

    fn is_code_block(&self, table: &Table) -> bool {
        if !table.is_single_cell() {
            return false;
        }
        let Some(cell) = table.first_cell() else {
            return false;
        };

        let mut runs = cell
            .paragraphs()
            .flat_map(|p| &p.elements)
            .filter_map(|el| el.text_run.as_ref())
            .filter(|run| run.content.as_deref().is_some_and(|c| !c.trim().is_empty()))
            .peekable();

        runs.peek().is_some() && runs.all(|run| run.text_style.is_monospace())
    }
}

/// Flatten a cell to one line of formatted text.
///
/// Paragraph breaks and embedded newlines become `<br/>`.
pub fn cell_content(formatter: &InlineFormatter<'_>, cell: &TableCell) -> String {
    cell.paragraphs()
        .map(|p| formatter.format_all(&p.elements, true))
        .collect::<Vec<_>>()
        .join("\n")
        .replace('\n', "<br/>")
}

/// Extract a boxed quote.
pub fn quote_element(formatter: &InlineFormatter<'_>, table: &Table) -> Option<Element> {
    let cell = table.first_cell()?;
    Some(Element::Blockquote(delete_smart_quotes(&cell_content(
        formatter, cell,
    ))))
}

/// Extract a boxed code block.
///
/// Returns None when the cell holds no code at all.
pub fn code_element(table: &Table) -> Option<Element> {
    let cell = table.first_cell()?;
    let raw: String = cell
        .paragraphs()
        .flat_map(|p| &p.elements)
        .filter_map(|el| el.text_run.as_ref()?.content.as_deref())
        .collect();
    let raw = raw.replace('\u{0B}', "\n");
    let raw = raw.strip_prefix('\n').unwrap_or(&raw);
    let raw = raw.strip_suffix('\n').unwrap_or(raw);

    let mut lines: Vec<String> = raw.split('\n').map(str::to_string).collect();
    if lines.len() == 1 && lines[0].is_empty() {
        return None;
    }

    let language = LANG_LINE
        .captures(&lines[0])
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());
    if language.is_some() {
        lines.remove(0);
    }

    Some(Element::Code(CodeBlock { language, lines }))
}

/// Extract a data table: first row headers, other rows body.
pub fn data_table_element(formatter: &InlineFormatter<'_>, table: &Table) -> Option<Element> {
    let (head, body) = table.table_rows.split_first()?;

    let row_content = |row: &crate::model::TableRow| -> Vec<String> {
        row.table_cells
            .iter()
            .map(|cell| cell_content(formatter, cell))
            .collect()
    };

    Some(Element::Table(TableData {
        headers: row_content(head),
        rows: body.iter().map(row_content).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Paragraph, RawDocument, TextRun};

    fn code_table(lines: &[&str]) -> Table {
        let mut paragraph = Paragraph::new();
        for line in lines {
            paragraph.add_run(TextRun::with_font(format!("{}\u{0B}", line), "Consolas"));
        }
        Table::single_cell(vec![paragraph])
    }

    #[test]
    fn test_classify_code() {
        let classifier = DefaultTableClassifier;
        let table = code_table(&["fn main() {}"]);
        assert!(classifier.is_code_block(&table));
        assert!(!classifier.is_quote(&table));

        let table = Table::single_cell(vec![Paragraph::with_text("prose")]);
        assert!(!classifier.is_code_block(&table));

        let table = Table::single_cell(vec![Paragraph::new()]);
        assert!(!classifier.is_code_block(&table));
    }

    #[test]
    fn test_classify_quote() {
        let classifier = DefaultTableClassifier;
        let table = Table::single_cell(vec![Paragraph::with_text("“To be or not to be”")]);
        assert!(classifier.is_quote(&table));

        let table = Table::single_cell(vec![Paragraph::with_text("Not a quote")]);
        assert!(!classifier.is_quote(&table));

        let table = Table::from_rows([["“a”", "b"]]);
        assert!(!classifier.is_quote(&table));
    }

    #[test]
    fn test_quote_element() {
        let document = RawDocument::new();
        let formatter = InlineFormatter::new(&document);
        let table = Table::single_cell(vec![
            Paragraph::with_text("“First line"),
            Paragraph::with_text("second line”"),
        ]);

        assert_eq!(
            quote_element(&formatter, &table),
            Some(Element::Blockquote("First line<br/>second line".to_string()))
        );
    }

    #[test]
    fn test_code_with_language() {
        let table = code_table(&["lang: python", "x = 1"]);
        assert_eq!(
            code_element(&table),
            Some(Element::Code(CodeBlock {
                language: Some("python".to_string()),
                lines: vec!["x = 1".to_string()],
            }))
        );
    }

    #[test]
    fn test_code_without_language() {
        let table = code_table(&["let a = 1;", "  let b = 2;"]);
        assert_eq!(
            code_element(&table),
            Some(Element::Code(CodeBlock {
                language: None,
                lines: vec!["let a = 1;".to_string(), "  let b = 2;".to_string()],
            }))
        );
    }

    #[test]
    fn test_empty_code_cell() {
        let table = Table::single_cell(vec![Paragraph::with_text("")]);
        assert_eq!(code_element(&table), None);
    }

    #[test]
    fn test_data_table() {
        let document = RawDocument::new();
        let formatter = InlineFormatter::new(&document);
        let table = Table::from_rows([["Name", "Age"], ["Alice", "30"]]);

        assert_eq!(
            data_table_element(&formatter, &table),
            Some(Element::Table(TableData {
                headers: vec!["Name".to_string(), "Age".to_string()],
                rows: vec![vec!["Alice".to_string(), "30".to_string()]],
            }))
        );
        assert_eq!(data_table_element(&formatter, &Table::new()), None);
    }
}
