//! Output format handling for sitesearch
//!
//! - html: the rendered results element content, as a page would receive it
//! - json: stable, machine-readable JSON

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use sitesearch_core::error::SearchError;

/// Output format for sitesearch commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Rendered HTML (default)
    #[default]
    Html,
    /// JSON output for machine consumption
    Json,
}

impl FromStr for OutputFormat {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            other => Err(SearchError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Html => write!(f, "html"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

// Implement ValueEnum for OutputFormat to work with clap
impl ValueEnum for OutputFormat {
    fn value_variants<'a>() -> &'a [Self] {
        &[OutputFormat::Html, OutputFormat::Json]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            OutputFormat::Html => Some(clap::builder::PossibleValue::new("html")),
            OutputFormat::Json => Some(clap::builder::PossibleValue::new("json")),
        }
    }
}
