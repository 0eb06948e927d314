//! The search widget: extract, build, search, render
//!
//! One run per page load. The store and the render sink are passed in so the
//! whole sequence can run outside a browser.

use std::time::Instant;

use serde::Serialize;

use crate::config::SearchConfig;
use crate::error::Result;
use crate::index::SearchIndex;
use crate::query::extract_query;
use crate::render::{render, RenderSink, Rendered};
use crate::store::DocumentStore;
use crate::trace_time;

/// What a run produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    /// Query text taken from the location, if any
    pub query: Option<String>,
    pub documents: usize,
    #[serde(flatten)]
    pub rendered: Rendered,
}

/// Search widget bound to a store and a configuration
#[derive(Debug, Clone, Copy)]
pub struct SearchWidget<'a> {
    store: &'a DocumentStore,
    config: &'a SearchConfig,
}

impl<'a> SearchWidget<'a> {
    pub fn new(store: &'a DocumentStore, config: &'a SearchConfig) -> Self {
        Self { store, config }
    }

    /// Run against a page location such as `https://site/search/?query=cats`
    pub fn run(&self, location: &str, sink: &mut dyn RenderSink) -> Result<Outcome> {
        let query = extract_query(location, &self.config.query_param);
        tracing::debug!(location, ?query, "extract_query");
        self.run_query(query, sink)
    }

    /// Run with an already extracted query. `None` behaves like an empty query.
    pub fn run_query(&self, query: Option<String>, sink: &mut dyn RenderSink) -> Result<Outcome> {
        let start = Instant::now();

        let index = SearchIndex::build(self.store, self.config)?;
        let hits = index.search(query.as_deref().unwrap_or_default())?;
        let rendered = render(&hits, self.store, self.config);
        sink.render(&rendered)?;

        trace_time!(
            start,
            "run_widget",
            hits = hits.len(),
            empty = rendered.is_empty()
        );

        Ok(Outcome {
            query,
            documents: index.len(),
            rendered,
        })
    }
}
