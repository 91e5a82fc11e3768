//! Post-processing of the element sequence.

use crate::model::{Element, HeadingRecord};
use regex::{Captures, Regex};
use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

/// An absolute link to a Google Docs document, capturing the document id.
static DOCUMENT_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://docs\.google\.com/document/(?:u/\d+/)?d/([a-zA-Z0-9_-]+)(?:/edit|/preview)?")
        .unwrap()
});

/// Move every recorded heading one level deeper (h6 stays h6).
///
/// Levels are read from the elements themselves, so demoting twice moves
/// headings two levels. Recorded positions holding something other than a
/// heading are left alone.
pub fn demote_headings(elements: &mut [Element], headings: &[HeadingRecord]) {
    let indices: BTreeSet<usize> = headings.iter().map(|heading| heading.index).collect();

    for index in indices {
        let Some(element) = elements.get_mut(index) else {
            log::warn!("Heading index {} is out of range", index);
            continue;
        };
        let Some(level) = element.heading_level() else {
            continue;
        };
        let text = element.text().unwrap_or_default().to_string();
        *element = Element::heading(level + 1, text);
    }
}

/// Replace links to known documents by their output path.
///
/// Every string in every element is rewritten. Links whose id is not in
/// `paths` are left untouched.
pub fn rewrite_crosslinks(elements: &mut [Element], paths: &HashMap<String, String>) {
    if paths.is_empty() {
        return;
    }

    let mut rewritten = 0usize;
    for element in elements.iter_mut() {
        element.for_each_text_mut(&mut |text: &mut String| {
            if let Some(replaced) = rewrite_text(text, paths) {
                *text = replaced;
                rewritten += 1;
            }
        });
    }

    if rewritten > 0 {
        log::debug!("Rewrote cross-document links in {} strings", rewritten);
    }
}

/// Rewrite the links in one string, or None when nothing matched.
pub fn rewrite_text(text: &str, paths: &HashMap<String, String>) -> Option<String> {
    let mut changed = false;
    let result = DOCUMENT_LINK.replace_all(text, |caps: &Captures<'_>| match paths.get(&caps[1]) {
        Some(path) => {
            changed = true;
            path.clone()
        }
        None => caps[0].to_string(),
    });

    changed.then(|| result.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CodeBlock, Footnote, List, ListKind, ListNode, TableData};

    fn record(level: u8, index: usize) -> HeadingRecord {
        HeadingRecord {
            level,
            text: String::new(),
            index,
        }
    }

    #[test]
    fn test_demote_headings() {
        let mut elements = vec![
            Element::H1("Title".to_string()),
            Element::P("text".to_string()),
            Element::H6("Deep".to_string()),
        ];
        let headings = [record(1, 0), record(6, 2)];

        demote_headings(&mut elements, &headings);
        assert_eq!(
            elements,
            vec![
                Element::H2("Title".to_string()),
                Element::P("text".to_string()),
                Element::H6("Deep".to_string()),
            ]
        );
    }

    #[test]
    fn test_demote_twice_caps_at_six() {
        let mut elements: Vec<Element> = (1..=6).map(|level| Element::heading(level, "h")).collect();
        let headings: Vec<_> = (0..6).map(|i| record(i as u8 + 1, i)).collect();

        demote_headings(&mut elements, &headings);
        demote_headings(&mut elements, &headings);

        let levels: Vec<_> = elements.iter().filter_map(Element::heading_level).collect();
        assert_eq!(levels, [3, 4, 5, 6, 6, 6]);
    }

    #[test]
    fn test_demote_skips_non_headings_and_duplicates() {
        let mut elements = vec![
            Element::Blockquote("aside".to_string()),
            Element::H3("once".to_string()),
        ];
        let headings = [record(2, 0), record(3, 1), record(3, 1), record(1, 9)];

        demote_headings(&mut elements, &headings);
        assert_eq!(
            elements,
            vec![
                Element::Blockquote("aside".to_string()),
                Element::H4("once".to_string()),
            ]
        );
    }

    #[test]
    fn test_rewrite_text() {
        let paths = HashMap::from([("abc_1-X".to_string(), "/guides/setup".to_string())]);

        assert_eq!(
            rewrite_text("[Setup](https://docs.google.com/document/d/abc_1-X/edit)", &paths),
            Some("[Setup](/guides/setup)".to_string())
        );
        assert_eq!(
            rewrite_text("https://docs.google.com/document/u/1/d/abc_1-X/preview#h", &paths),
            Some("/guides/setup#h".to_string())
        );
        assert_eq!(
            rewrite_text("https://docs.google.com/document/d/unknown/edit", &paths),
            None
        );
    }

    #[test]
    fn test_rewrite_every_string() {
        let link = "https://docs.google.com/document/d/doc1";
        let paths = HashMap::from([("doc1".to_string(), "/one".to_string())]);
        let mut elements = vec![
            Element::H2(format!("[x]({})", link)),
            Element::Ul(vec![
                ListNode::Item(link.to_string()),
                ListNode::List(List::with_item(ListKind::Ol, format!("see {}/edit", link))),
            ]),
            Element::Table(TableData {
                headers: vec![link.to_string()],
                rows: vec![vec![format!("{}/preview", link)]],
            }),
            Element::Code(CodeBlock {
                language: None,
                lines: vec![link.to_string()],
            }),
            Element::Footnote(Footnote {
                number: "1".to_string(),
                text: link.to_string(),
            }),
            Element::P("https://docs.google.com/document/d/other".to_string()),
        ];

        rewrite_crosslinks(&mut elements, &paths);

        let mut strings = Vec::new();
        for element in &mut elements {
            element.for_each_text_mut(&mut |text: &mut String| strings.push(text.clone()));
        }
        assert!(strings.iter().all(|s| !s.contains("document/d/doc1")));
        assert_eq!(elements[0], Element::H2("[x](/one)".to_string()));
        assert_eq!(
            elements[5],
            Element::P("https://docs.google.com/document/d/other".to_string())
        );
    }
}
