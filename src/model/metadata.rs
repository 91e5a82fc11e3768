//! Document metadata.
//!
//! Metadata is a free-form, insertion-ordered record rendered as YAML
//! frontmatter. A handful of well-known keys (`id`, `name`, `path`,
//! `breadcrumb`, `description`) get typed accessors; anything else passes
//! through unchanged.

use super::{Cover, RawDocument};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata record of one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    /// Fields in insertion order
    pub fields: Map<String, Value>,
}

impl Metadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed metadata from a document tree (`id` and `name`).
    pub fn from_document(document: &RawDocument) -> Self {
        let mut metadata = Self::new();
        if let Some(id) = &document.document_id {
            metadata.insert("id", id.as_str());
        }
        if let Some(title) = &document.title {
            metadata.insert("name", title.as_str());
        }
        metadata
    }

    /// Build metadata from a JSON object; other values give empty metadata.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::new(),
        }
    }

    /// Get a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Get a string field.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Set a field, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Set a field and return self.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Remove a field.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    /// Check if a field is present.
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Document ID.
    pub fn id(&self) -> Option<&str> {
        self.get_str("id")
    }

    /// Document name.
    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    /// Output path (e.g. `/guides/getting-started`).
    pub fn path(&self) -> Option<&str> {
        self.get_str("path")
    }

    /// Breadcrumb segments.
    pub fn breadcrumb(&self) -> Vec<String> {
        self.get("breadcrumb")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Check if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Apply the caller-side metadata step.
    ///
    /// In order: derive `breadcrumb` from `path`; fold a document named
    /// `index` into its parent folder; fill missing fields from
    /// `fields_default`; rename fields per `fields_mapper`; merge a
    /// `description` that parses as a YAML mapping.
    pub fn update(&mut self, options: &MetadataOptions) {
        let mut breadcrumb: Vec<String> = self
            .path()
            .unwrap_or_default()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();

        if self.name() == Some("index") && breadcrumb.len() > 1 {
            breadcrumb.pop();
            if let Some(folder) = breadcrumb.last().cloned() {
                self.insert("name", folder);
                self.insert("path", format!("/{}", breadcrumb.join("/")));
            }
        }

        for (key, value) in &options.fields_default {
            if !self.contains(key) {
                self.insert(key.clone(), value.clone());
            }
        }

        for (old_key, new_key) in &options.fields_mapper {
            if let Some(value) = self.remove(old_key) {
                self.insert(new_key.clone(), value);
            }
        }

        if let Some(description) = self.get_str("description").filter(|d| !d.is_empty()) {
            match serde_yaml::from_str::<Value>(description) {
                Ok(Value::Object(fields)) => {
                    for (key, value) in fields {
                        self.insert(key, value);
                    }
                }
                Ok(_) => {}
                Err(err) => log::debug!("Description is not YAML, keeping it as text: {}", err),
            }
        }

        self.insert(
            "breadcrumb",
            breadcrumb.into_iter().map(Value::String).collect::<Vec<_>>(),
        );
    }

    /// Render as a YAML frontmatter block, with the cover merged in.
    pub fn to_yaml_frontmatter(&self, cover: Option<&Cover>) -> Result<String> {
        let mut fields = self.fields.clone();
        fields.insert("cover".to_string(), serde_json::to_value(cover)?);

        let yaml = serde_yaml::to_string(&fields)?;
        Ok(format!("---\n{}---\n", yaml))
    }

    /// Render as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.fields)?)
    }
}

impl From<Map<String, Value>> for Metadata {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// Options for [`Metadata::update`].
#[derive(Debug, Clone, Default)]
pub struct MetadataOptions {
    /// Values for fields the metadata does not already carry
    pub fields_default: Map<String, Value>,

    /// Field renames, old key to new key
    pub fields_mapper: Vec<(String, String)>,
}

impl MetadataOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a default field value.
    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields_default.insert(key.into(), value.into());
        self
    }

    /// Add a field rename.
    pub fn with_mapping(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.fields_mapper.push((from.into(), to.into()));
        self
    }
}

/// Convert a file or folder name to a kebab-case path segment.
///
/// Word boundaries are non-alphanumeric characters and lower-to-upper
/// case transitions: `"Getting Started"` and `"gettingStarted"` both give
/// `"getting-started"`.
pub fn kebab_case(name: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if c.is_uppercase() && prev_lower && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = c.is_lowercase() || c.is_numeric();
            current.extend(c.to_lowercase());
        } else {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    words.join("-")
}

/// Output path of a document under a parent path.
pub fn document_path(parent: &str, name: &str) -> String {
    format!("{}/{}", parent.trim_end_matches('/'), kebab_case(name))
}
