//! Widget configuration for sitesearch
//!
//! Configuration is read from `sitesearch.toml` (or an explicit path). Without a
//! file, one of the built-in presets is used.

pub mod types;

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::bail_config;
use crate::error::{Result, SearchError};

pub use types::{FieldConfig, SearchConfig, SnippetConfig, CONFIG_FILE_NAME};

/// Built-in field layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// title / content / tags (read from `category`), snippet from content with `...`
    #[default]
    Content,
    /// title / description / content / tags, snippet from description, no suffix
    Description,
}

impl FromStr for Preset {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "content" => Ok(Preset::Content),
            "description" => Ok(Preset::Description),
            other => Err(SearchError::invalid_value(
                "preset (expected: content or description)",
                other,
            )),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Content => write!(f, "content"),
            Preset::Description => write!(f, "description"),
        }
    }
}

impl SearchConfig {
    /// Build the configuration for a preset
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Content => SearchConfig::default(),
            Preset::Description => SearchConfig {
                fields: vec![
                    FieldConfig::new("title", 15.0),
                    FieldConfig::new("description", 10.0),
                    FieldConfig::new("content", 10.0),
                    FieldConfig::new("tags", 5.0),
                ],
                snippet: SnippetConfig {
                    field: "description".to_string(),
                    suffix: String::new(),
                    ..SnippetConfig::default()
                },
                ..SearchConfig::default()
            },
        }
    }

    /// Load and validate configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| SearchError::io_operation("read config", path.display(), e))?;
        let config: SearchConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit path must exist. Otherwise `sitesearch.toml` in `dir` is used
    /// when present, falling back to the preset.
    pub fn resolve(explicit: Option<&Path>, dir: &Path, preset: Preset) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let default_path = dir.join(CONFIG_FILE_NAME);
        if default_path.is_file() {
            tracing::debug!(path = %default_path.display(), "load_config");
            return Self::load(&default_path);
        }

        tracing::debug!(%preset, "use_preset");
        Ok(Self::preset(preset))
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self)
            .map_err(|e| SearchError::Other(format!("failed to serialize config: {}", e)))
    }

    /// Check the invariants the index and renderer rely on
    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            bail_config!("at least one field must be configured");
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !is_identifier(&field.name) {
                bail_config!(
                    "field name {:?} must start with a letter or underscore and contain only letters, digits and underscores",
                    field.name
                );
            }
            if RESERVED_FIELD_NAMES
                .iter()
                .any(|r| r.eq_ignore_ascii_case(&field.name))
            {
                bail_config!("field name {:?} is reserved", field.name);
            }
            if !seen.insert(field.name.to_lowercase()) {
                bail_config!("duplicate field {:?}", field.name);
            }
            if !field.boost.is_finite() || field.boost <= 0.0 {
                bail_config!("boost for field {:?} must be positive", field.name);
            }
        }

        if self.query_param.is_empty() {
            bail_config!("query_param must not be empty");
        }
        if self.result_element.is_empty() {
            bail_config!("result_element must not be empty");
        }
        if self.snippet.max_chars == 0 {
            bail_config!("snippet.max_chars must be at least 1");
        }

        Ok(())
    }

    /// Look up a field by its index name (case-insensitive)
    pub fn field(&self, name: &str) -> Option<&FieldConfig> {
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }
}

/// Column names the index cannot use
const RESERVED_FIELD_NAMES: &[&str] = &["rowid", "rank", crate::index::FTS_TABLE];

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
