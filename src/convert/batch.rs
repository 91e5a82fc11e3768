//! Batch conversion of many documents.
//!
//! Documents of one batch usually link to each other. The cross-link map is
//! built from the batch's own metadata (`id` to `path`) so those links point
//! at the converted files instead of the source documents.

use super::{ConvertOptions, ConvertedDocument};
use crate::error::Result;
use crate::model::{Cover, Element, Metadata, RawDocument};
use crate::render::RenderOptions;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// One document of a batch.
#[derive(Debug, Clone)]
pub struct BatchInput {
    /// The document tree
    pub document: RawDocument,

    /// Its metadata, with `id` and `path` set
    pub metadata: Metadata,
}

impl BatchInput {
    /// Create a batch input.
    pub fn new(document: RawDocument, metadata: Metadata) -> Self {
        Self { document, metadata }
    }
}

/// Result of converting one document.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertResult {
    /// Document metadata
    pub metadata: Metadata,

    /// Cover image
    pub cover: Option<Cover>,

    /// Post-processed elements
    pub elements: Vec<Element>,

    /// Rendered Markdown
    pub markdown: String,
}

/// Map document ids to output paths.
///
/// Records without both an `id` and a `path` are skipped.
pub fn crosslinks_from_metadata<'a>(
    records: impl IntoIterator<Item = &'a Metadata>,
) -> HashMap<String, String> {
    records
        .into_iter()
        .filter_map(|metadata| Some((metadata.id()?.to_string(), metadata.path()?.to_string())))
        .collect()
}

/// Convert a batch of documents in parallel.
///
/// Links between documents of the batch are rewritten to their paths. Entries
/// already present in `options.crosslinks_paths` take precedence. Results
/// come back in input order.
pub fn convert_batch(
    inputs: &[BatchInput],
    options: &ConvertOptions,
    render_options: &RenderOptions,
) -> Vec<Result<ConvertResult>> {
    let mut paths = crosslinks_from_metadata(inputs.iter().map(|input| &input.metadata));
    paths.extend(
        options
            .crosslinks_paths
            .iter()
            .map(|(id, path)| (id.clone(), path.clone())),
    );
    log::debug!(
        "Converting {} documents with {} cross-links",
        inputs.len(),
        paths.len()
    );

    let options = options.clone().with_crosslinks_paths(Arc::new(paths));

    inputs
        .par_iter()
        .map(|input| convert_one(input, &options, render_options))
        .collect()
}

fn convert_one(
    input: &BatchInput,
    options: &ConvertOptions,
    render_options: &RenderOptions,
) -> Result<ConvertResult> {
    let converted = ConvertedDocument::new(&input.document, input.metadata.clone(), options.clone());
    let object = converted.to_object();
    let markdown = crate::render::to_markdown(&object, render_options)?;

    Ok(ConvertResult {
        metadata: object.metadata,
        cover: object.cover,
        elements: object.elements,
        markdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Paragraph;

    fn input(id: &str, path: &str, text: &str) -> BatchInput {
        let mut document = RawDocument::new();
        document.add_paragraph(Paragraph::with_text(text));
        BatchInput::new(
            document,
            Metadata::new().with("id", id).with("path", path),
        )
    }

    #[test]
    fn test_crosslinks_from_metadata() {
        let records = [
            Metadata::new().with("id", "a").with("path", "/a"),
            Metadata::new().with("id", "b"),
        ];
        let paths = crosslinks_from_metadata(&records);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths["a"], "/a");
    }

    #[test]
    fn test_convert_batch_rewrites_between_documents() {
        let inputs = vec![
            input("doc-a", "/a", "Go to https://docs.google.com/document/d/doc-b/edit"),
            input("doc-b", "/guides/b", "Back to https://docs.google.com/document/d/doc-a"),
        ];

        let results = convert_batch(&inputs, &ConvertOptions::new(), &RenderOptions::new());
        assert_eq!(results.len(), 2);

        let first = results[0].as_ref().unwrap();
        assert_eq!(first.elements, vec![Element::P("Go to /guides/b".to_string())]);
        assert!(first.markdown.ends_with("Go to /guides/b\n"));

        let second = results[1].as_ref().unwrap();
        assert_eq!(second.metadata.id(), Some("doc-b"));
        assert_eq!(second.elements, vec![Element::P("Back to /a".to_string())]);
    }

    #[test]
    fn test_explicit_crosslinks_win() {
        let inputs = vec![input("doc-a", "/a", "https://docs.google.com/document/d/doc-a")];
        let options = ConvertOptions::new()
            .with_crosslinks(HashMap::from([("doc-a".to_string(), "/override".to_string())]));

        let results = convert_batch(&inputs, &options, &RenderOptions::new());
        assert_eq!(
            results[0].as_ref().unwrap().elements,
            vec![Element::P("/override".to_string())]
        );
    }
}
