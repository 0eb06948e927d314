//! Command dispatch logic for sitesearch

use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

use sitesearch_core::bail_usage;
use sitesearch_core::error::Result;
use sitesearch_core::{DocumentStore, SearchConfig};
use tracing::debug;

use crate::cli::{Cli, Commands};

/// Shared state resolved once per invocation
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub config: SearchConfig,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    /// Load the document store named by `--store`
    pub fn load_store(&self) -> Result<DocumentStore> {
        let path = self.store_path()?;
        let store = DocumentStore::load(path)?;
        debug!(
            path = %path.display(),
            documents = store.len(),
            elapsed = ?self.start.elapsed(),
            "load_store"
        );
        Ok(store)
    }

    fn store_path(&self) -> Result<&Path> {
        match self.cli.store.as_deref() {
            Some(path) => Ok(path),
            None => bail_usage!("no document store given (use --store or SITESEARCH_STORE)"),
        }
    }
}

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = SearchConfig::resolve(cli.config.as_deref(), &cwd, cli.preset)?;

    debug!(elapsed = ?start.elapsed(), "resolve_config");

    let ctx = CommandContext { cli, config, start };

    match &cli.command {
        Commands::Search { url, query, page } => {
            super::search::execute(&ctx, url.as_deref(), query.as_deref(), page.as_deref())
        }
        Commands::Check => super::check::execute(&ctx),
        Commands::Config => super::config::execute(&ctx),
    }
}
