//! `sitesearch check` command
//!
//! Loads the store, builds the index and reports records that lack a field
//! the widget reads.

use serde::Serialize;
use sitesearch_core::config::SearchConfig;
use sitesearch_core::error::Result;
use sitesearch_core::{DocumentStore, SearchIndex};

use super::dispatch::CommandContext;
use crate::cli::OutputFormat;

#[derive(Debug, Serialize)]
struct FieldReport {
    name: String,
    source: String,
    boost: f64,
}

#[derive(Debug, Serialize)]
struct MissingFields {
    id: String,
    missing: Vec<String>,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    documents: usize,
    fields: Vec<FieldReport>,
    incomplete: Vec<MissingFields>,
}

pub fn execute(ctx: &CommandContext) -> Result<()> {
    let store = ctx.load_store()?;
    let index = SearchIndex::build(&store, &ctx.config)?;

    let report = CheckReport {
        documents: index.len(),
        fields: index
            .fields()
            .iter()
            .map(|f| FieldReport {
                name: f.name.clone(),
                source: f.source().to_string(),
                boost: f.boost,
            })
            .collect(),
        incomplete: incomplete_records(&store, &ctx.config),
    };

    match ctx.cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Html => print_human(&report, ctx.cli.quiet),
    }
    Ok(())
}

/// Keys each record is expected to carry, in first-use order
fn expected_keys(config: &SearchConfig) -> Vec<&str> {
    let mut keys = vec!["title", "url"];
    for key in config
        .fields
        .iter()
        .map(|f| f.source())
        .chain([config.snippet.field.as_str()])
    {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

fn incomplete_records(store: &DocumentStore, config: &SearchConfig) -> Vec<MissingFields> {
    let keys = expected_keys(config);
    store
        .iter()
        .filter_map(|(id, doc)| {
            let missing: Vec<String> = keys
                .iter()
                .filter(|k| !doc.has(k))
                .map(|k| k.to_string())
                .collect();
            (!missing.is_empty()).then(|| MissingFields {
                id: id.to_string(),
                missing,
            })
        })
        .collect()
}

fn print_human(report: &CheckReport, quiet: bool) {
    println!("{} documents indexed", report.documents);
    if !quiet {
        for field in &report.fields {
            if field.source == field.name {
                println!("  {} (boost {})", field.name, field.boost);
            } else {
                println!("  {} <- {} (boost {})", field.name, field.source, field.boost);
            }
        }
    }

    if report.incomplete.is_empty() {
        println!("All records complete");
        return;
    }
    println!("{} records with missing fields:", report.incomplete.len());
    for record in &report.incomplete {
        println!("  {}: {}", record.id, record.missing.join(", "));
    }
}
