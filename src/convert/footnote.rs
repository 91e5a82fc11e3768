//! Footnote collection.

use super::inline::{stringify_content, InlineFormatter};
use crate::model::{Element, Footnote, FootnoteReference, RawDocument};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Records footnote references seen in the body.
#[derive(Debug, Clone, Default)]
pub struct FootnoteCollector {
    numbers: HashMap<String, String>,
}

impl FootnoteCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reference: footnote id to its display number.
    pub fn record(&mut self, reference: &FootnoteReference) {
        if let (Some(id), Some(number)) = (&reference.footnote_id, &reference.footnote_number) {
            self.numbers.insert(id.clone(), number.clone());
        }
    }

    /// Number of distinct footnotes referenced so far.
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    /// Check if no footnote was referenced.
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// Render the definitions of all referenced footnotes, sorted by number.
    pub fn into_elements(self, document: &RawDocument) -> Vec<Element> {
        let formatter = InlineFormatter::new(document);
        let mut footnotes = Vec::with_capacity(self.numbers.len());

        for (id, definition) in &document.footnotes {
            let Some(number) = self.numbers.get(id) else {
                log::debug!("Dropping unreferenced footnote {}", id);
                continue;
            };

            let text = definition
                .paragraphs()
                .map(|p| {
                    let content = formatter.format_all(&p.elements, true);
                    stringify_content(&content).to_string()
                })
                .collect::<Vec<_>>()
                .join("<br/>");

            footnotes.push(Footnote {
                number: number.clone(),
                text,
            });
        }

        footnotes.sort_by(|a, b| compare_numbers(&a.number, &b.number));
        footnotes.into_iter().map(Element::Footnote).collect()
    }
}

/// Numeric order; non-numeric numbers go last.
fn compare_numbers(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<u64>(), b.trim().parse::<u64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => Ordering::Equal,
    }
}
