//! Configuration type definitions

use serde::{Deserialize, Serialize};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "sitesearch.toml";

/// Widget configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// URL parameter holding the search text
    #[serde(default = "default_query_param")]
    pub query_param: String,

    /// Id of the page element receiving the results
    #[serde(default = "default_result_element")]
    pub result_element: String,

    /// Text rendered when nothing matches
    #[serde(default = "default_no_results_text")]
    pub no_results_text: String,

    /// HTML-escape title, URL and snippet before interpolation
    #[serde(default = "default_true")]
    pub escape_html: bool,

    /// Index with the porter stemmer (otherwise plain unicode61)
    #[serde(default = "default_true")]
    pub stemming: bool,

    /// Indexed fields in column order
    #[serde(default = "default_fields")]
    pub fields: Vec<FieldConfig>,

    /// Snippet rendering
    #[serde(default)]
    pub snippet: SnippetConfig,
}

/// A single indexed field and its boost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Index column name, also usable as a `name:term` query scope
    pub name: String,

    /// Store record key to read; defaults to `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Relevance multiplier, must be positive
    pub boost: f64,
}

impl FieldConfig {
    pub fn new(name: &str, boost: f64) -> Self {
        Self {
            name: name.to_string(),
            source: None,
            boost,
        }
    }

    /// Read this field from a differently named record key
    pub fn from_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }

    /// Record key this field is read from
    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or(&self.name)
    }
}

/// Snippet rendering parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnippetConfig {
    /// Record key the snippet is taken from
    #[serde(default = "default_snippet_field")]
    pub field: String,

    /// Literal removed once (first occurrence) before truncation; empty disables
    #[serde(default = "default_strip")]
    pub strip: String,

    /// Maximum snippet length in characters, suffix excluded
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,

    /// Appended after the truncated snippet
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

impl Default for SnippetConfig {
    fn default() -> Self {
        Self {
            field: default_snippet_field(),
            strip: default_strip(),
            max_chars: default_max_chars(),
            suffix: default_suffix(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            query_param: default_query_param(),
            result_element: default_result_element(),
            no_results_text: default_no_results_text(),
            escape_html: true,
            stemming: true,
            fields: default_fields(),
            snippet: SnippetConfig::default(),
        }
    }
}

fn default_query_param() -> String {
    "query".to_string()
}

fn default_result_element() -> String {
    "result".to_string()
}

fn default_no_results_text() -> String {
    "No results found!".to_string()
}

fn default_true() -> bool {
    true
}

fn default_fields() -> Vec<FieldConfig> {
    vec![
        FieldConfig::new("title", 15.0),
        FieldConfig::new("content", 10.0),
        FieldConfig::new("tags", 5.0).from_source("category"),
    ]
}

fn default_snippet_field() -> String {
    "content".to_string()
}

fn default_strip() -> String {
    "Introduction".to_string()
}

fn default_max_chars() -> usize {
    150
}

fn default_suffix() -> String {
    "...".to_string()
}
