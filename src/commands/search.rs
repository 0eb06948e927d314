//! `sitesearch search` command

use std::io;
use std::path::Path;

use sitesearch_core::error::Result;
use sitesearch_core::render::{PageSink, WriterSink};
use sitesearch_core::{Outcome, RenderSink, Rendered, SearchWidget};
use tracing::debug;

use super::dispatch::CommandContext;
use crate::cli::OutputFormat;

/// Execute the search command
///
/// The query comes from `--url` (read through the configured parameter) or
/// from `--query` as-is. Neither means an empty query.
pub fn execute(
    ctx: &CommandContext,
    url: Option<&str>,
    query: Option<&str>,
    page: Option<&Path>,
) -> Result<()> {
    let store = ctx.load_store()?;
    let widget = SearchWidget::new(&store, &ctx.config);

    let outcome = match page {
        Some(page) => {
            let mut sink = PageSink::new(page, ctx.config.result_element.as_str());
            run(&widget, url, query, &mut sink)?
        }
        None if ctx.cli.format == OutputFormat::Html => {
            let mut sink = WriterSink::new(io::stdout().lock());
            run(&widget, url, query, &mut sink)?
        }
        None => {
            // JSON output carries the fragment itself
            let mut sink = |_: &Rendered| -> Result<()> { Ok(()) };
            run(&widget, url, query, &mut sink)?
        }
    };

    debug!(
        query = ?outcome.query,
        hits = outcome.rendered.items().len(),
        elapsed = ?ctx.start.elapsed(),
        "search"
    );

    report(ctx, &outcome, page)
}

fn run(
    widget: &SearchWidget,
    url: Option<&str>,
    query: Option<&str>,
    sink: &mut dyn RenderSink,
) -> Result<Outcome> {
    match url {
        Some(location) => widget.run(location, sink),
        None => widget.run_query(query.map(str::to_string), sink),
    }
}

fn report(ctx: &CommandContext, outcome: &Outcome, page: Option<&Path>) -> Result<()> {
    match ctx.cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(outcome)?);
        }
        OutputFormat::Html => {
            if let Some(page) = page {
                if !ctx.cli.quiet {
                    eprintln!(
                        "Updated #{} in {} ({} results)",
                        ctx.config.result_element,
                        page.display(),
                        outcome.rendered.items().len()
                    );
                }
            }
        }
    }
    Ok(())
}
