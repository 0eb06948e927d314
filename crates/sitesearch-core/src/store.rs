//! Document store loading
//!
//! The store maps a document key to a record of fields. It is produced by the
//! site generator either as a plain JSON object or embedded in a page script as
//! `window.store = { ... };`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Result, SearchError};

static STORE_ASSIGNMENT: OnceLock<Regex> = OnceLock::new();

fn store_assignment() -> &'static Regex {
    STORE_ASSIGNMENT.get_or_init(|| {
        Regex::new(r"(?:window\s*\.\s*store|\b(?:var|let|const)\s+store)\s*=\s*")
            .expect("store assignment pattern is valid")
    })
}

/// One record of the store
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Document {
    fields: Map<String, Value>,
}

impl Document {
    /// Build a document from string fields
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                .collect(),
        }
    }

    pub fn title(&self) -> String {
        self.text("title")
    }

    pub fn url(&self) -> String {
        self.text("url")
    }

    /// Whether the record carries a usable value for `key`
    pub fn has(&self, key: &str) -> bool {
        self.fields.get(key).and_then(value_text).is_some()
    }

    /// Text of a field.
    ///
    /// Strings are returned as-is, arrays of scalars are joined with a space,
    /// numbers and booleans are stringified. Missing, null or object values
    /// yield an empty string.
    pub fn text(&self, key: &str) -> String {
        self.fields
            .get(key)
            .and_then(value_text)
            .unwrap_or_default()
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(scalar_text)
                .collect::<Vec<_>>()
                .join(" "),
        ),
        other => scalar_text(other),
    }
}

/// Read-only mapping from document key to record, iterated in key order
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct DocumentStore {
    documents: BTreeMap<String, Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, document: Document) {
        self.documents.insert(key.into(), document);
    }

    pub fn get(&self, key: &str) -> Option<&Document> {
        self.documents.get(key)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Document)> {
        self.documents.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Parse a store from JSON, or from script text containing a store assignment
    pub fn parse(text: &str) -> std::result::Result<Self, String> {
        let trimmed = text.trim_start_matches('\u{feff}').trim_start();
        if trimmed.starts_with('{') {
            return serde_json::from_str(trimmed).map_err(|e| e.to_string());
        }

        let found = store_assignment()
            .find(trimmed)
            .ok_or_else(|| "expected a JSON object or a `window.store = {...}` assignment".to_string())?;

        // Only the first value after `=` is read; the trailing `;` and the rest
        // of the script are ignored.
        let rest = &trimmed[found.end()..];
        let mut values = serde_json::Deserializer::from_str(rest).into_iter::<DocumentStore>();
        match values.next() {
            Some(Ok(store)) => Ok(store),
            Some(Err(e)) => Err(e.to_string()),
            None => Err("store assignment has no value".to_string()),
        }
    }

    /// Load a store file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| SearchError::io_operation("read store", path.display(), e))?;
        let store = Self::parse(&text).map_err(|reason| SearchError::invalid_store(path, reason))?;
        tracing::debug!(path = %path.display(), documents = store.len(), "load_store");
        Ok(store)
    }
}

impl FromIterator<(String, Document)> for DocumentStore {
    fn from_iter<I: IntoIterator<Item = (String, Document)>>(iter: I) -> Self {
        Self {
            documents: iter.into_iter().collect(),
        }
    }
}
