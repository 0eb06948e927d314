//! CLI argument parsing for sitesearch
//!
//! Uses clap for argument parsing.
//! Supports global flags: --store, --config, --preset, --format, --quiet, --verbose

pub mod output;
pub mod parse;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use output::OutputFormat;
use parse::parse_preset;
use sitesearch_core::config::Preset;

/// Sitesearch - static site search widget
#[derive(Parser, Debug)]
#[command(name = "sitesearch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Document store file (JSON, or a script containing `window.store = {...}`)
    #[arg(long, global = true, env = "SITESEARCH_STORE")]
    pub store: Option<PathBuf>,

    /// Config file (defaults to ./sitesearch.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Built-in field layout used when no config file is found
    #[arg(long, global = true, value_parser = parse_preset, default_value = "content")]
    pub preset: Preset,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "html")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. `debug`, `sitesearch_core=trace`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the store for the query in a page location and render the results
    Search {
        /// Page location carrying the query parameter (e.g. https://site/search/?query=cats)
        #[arg(long, conflicts_with = "query")]
        url: Option<String>,

        /// Query text, used instead of a location
        #[arg(long)]
        query: Option<String>,

        /// HTML page whose results element is overwritten instead of printing
        #[arg(long)]
        page: Option<PathBuf>,
    },

    /// Load the store, build the index and report missing fields
    Check,

    /// Print the effective configuration as TOML
    Config,
}
