//! Rendering options and configuration.

use crate::model::Footnote;
use std::fmt;

/// Renders one footnote definition line.
pub type FootnoteRule = fn(&Footnote) -> String;

/// Default footnote rule: `[^N]: text`.
pub fn default_footnote_rule(footnote: &Footnote) -> String {
    format!("[^{}]: {}", footnote.number, footnote.text)
}

/// Options for rendering document content.
#[derive(Clone)]
pub struct RenderOptions {
    /// Include YAML frontmatter with metadata
    pub include_frontmatter: bool,

    /// Character to use for unordered list markers
    pub list_marker: char,

    /// How footnote definitions are written
    pub footnote_rule: FootnoteRule,

    /// Collect extraction statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Set the footnote rule.
    pub fn with_footnote_rule(mut self, rule: FootnoteRule) -> Self {
        self.footnote_rule = rule;
        self
    }

    /// Enable statistics collection.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_frontmatter: true,
            list_marker: '-',
            footnote_rule: default_footnote_rule,
            collect_stats: false,
        }
    }
}

impl fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderOptions")
            .field("include_frontmatter", &self.include_frontmatter)
            .field("list_marker", &self.list_marker)
            .field("footnote_rule", &"fn(&Footnote) -> String")
            .field("collect_stats", &self.collect_stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_frontmatter(false)
            .with_list_marker('*')
            .with_stats(true);

        assert!(!options.include_frontmatter);
        assert_eq!(options.list_marker, '*');
        assert!(options.collect_stats);
    }

    #[test]
    fn test_footnote_rule() {
        let footnote = Footnote {
            number: "3".to_string(),
            text: "Source".to_string(),
        };
        assert_eq!((RenderOptions::new().footnote_rule)(&footnote), "[^3]: Source");

        fn bracketed(footnote: &Footnote) -> String {
            format!("[{}] {}", footnote.number, footnote.text)
        }
        let options = RenderOptions::new().with_footnote_rule(bracketed);
        assert_eq!((options.footnote_rule)(&footnote), "[3] Source");
    }
}
