//! In-memory full-text index over the document store
//!
//! Backed by SQLite FTS5 tables in a private in-memory database. A table with
//! one column per configured field decides which documents match. Ranking
//! sums, over fields, the field's boost times its bm25 score relative to the
//! best score that field reached among the matches, so a long body does not
//! dilute a title hit. The index is built once per run and dropped with the
//! connection.

pub mod query;
mod schema;

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};
use serde::Serialize;

use crate::config::{FieldConfig, SearchConfig};
use crate::error::{Result, SearchError};
use crate::map_index_err;
use crate::store::{Document, DocumentStore};
use crate::trace_time;

pub use query::{Clause, FtsQuery, ParsedQuery, Presence};
pub use schema::FTS_TABLE;

/// A matching document and its relevance (higher is better)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    /// Store key of the document
    pub id: String,
    pub score: f64,
}

/// Ephemeral full-text index
#[derive(Debug)]
pub struct SearchIndex {
    conn: Connection,
    fields: Vec<FieldConfig>,
    /// Store keys by row id - 1
    refs: Vec<String>,
    /// Field values indexed as empty text because the record lacked them
    substituted: usize,
}

impl SearchIndex {
    /// Create an empty index with the given fields
    pub fn new(fields: &[FieldConfig], stemming: bool) -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| map_index_err!("open in-memory index", e))?;
        schema::create_schema(&conn, fields, stemming)
            .map_err(|e| map_index_err!("create index table", e))?;

        Ok(Self {
            conn,
            fields: fields.to_vec(),
            refs: Vec::new(),
            substituted: 0,
        })
    }

    /// Build an index holding every document of the store
    pub fn build(store: &DocumentStore, config: &SearchConfig) -> Result<Self> {
        let start = Instant::now();
        let mut index = Self::new(&config.fields, config.stemming)?;

        let tx = index
            .conn
            .transaction()
            .map_err(|e| map_index_err!("begin index transaction", e))?;
        for (key, document) in store.iter() {
            index.substituted +=
                insert_row(&tx, &index.fields, &mut index.refs, key, document)?;
        }
        tx.commit()
            .map_err(|e| map_index_err!("commit index transaction", e))?;

        if index.substituted > 0 {
            tracing::warn!(
                fields = index.substituted,
                documents = index.refs.len(),
                "indexed missing fields as empty text"
            );
        }
        trace_time!(start, "build_index", documents = index.refs.len());
        Ok(index)
    }

    /// Add one document under its store key
    pub fn add(&mut self, key: &str, document: &Document) -> Result<()> {
        if self.refs.iter().any(|r| r == key) {
            return Err(SearchError::invalid_value("duplicate document key", key));
        }

        let substituted = insert_row(&self.conn, &self.fields, &mut self.refs, key, document)?;
        if substituted > 0 {
            tracing::warn!(
                document = key,
                fields = substituted,
                "indexed missing fields as empty text"
            );
        }
        self.substituted += substituted;
        Ok(())
    }

    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    pub fn fields(&self) -> &[FieldConfig] {
        &self.fields
    }

    /// Field values that were missing from their record and indexed as empty
    pub fn substituted_fields(&self) -> usize {
        self.substituted
    }

    /// Run a free-text query, returning hits by descending relevance.
    ///
    /// Ties keep store order. A query without searchable terms returns no
    /// hits and never touches the index.
    pub fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let start = Instant::now();
        let parsed = ParsedQuery::parse(query, &self.fields);
        if parsed.is_empty() {
            tracing::debug!(query, "empty_query");
            return Ok(Vec::new());
        }

        let fts = parsed.to_fts();
        let hits = match (fts.combined(), fts.negative) {
            (Some(expr), _) => self.run_match(&parsed, &expr)?,
            (None, Some(negative)) => self.run_exclusion(&negative)?,
            (None, None) => Vec::new(),
        };

        trace_time!(start, "search", hits = hits.len());
        Ok(hits)
    }

    fn run_match(&self, parsed: &ParsedQuery, expr: &str) -> Result<Vec<SearchHit>> {
        let matched = self.query_rowids(&schema::match_sql(), expr)?;
        let scores = self.field_scores(parsed, &matched)?;

        let mut ranked: Vec<(i64, f64)> = matched
            .into_iter()
            .map(|rowid| (rowid, scores.get(&rowid).copied().unwrap_or(0.0)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        ranked
            .into_iter()
            .map(|(rowid, score)| self.hit(rowid, score))
            .collect()
    }

    /// Every document not matching `negative`, in store order with score 0
    fn run_exclusion(&self, negative: &str) -> Result<Vec<SearchHit>> {
        self.query_rowids(&schema::exclusion_sql(), negative)?
            .into_iter()
            .map(|rowid| self.hit(rowid, 0.0))
            .collect()
    }

    /// Sum of `boost * bm25 / best bm25` over fields, for the matched rows
    fn field_scores(&self, parsed: &ParsedQuery, matched: &[i64]) -> Result<HashMap<i64, f64>> {
        let candidates: HashSet<i64> = matched.iter().copied().collect();
        let mut scores: HashMap<i64, f64> = HashMap::new();

        for (position, field) in self.fields.iter().enumerate() {
            let Some(expr) = parsed.field_fts(&field.name) else {
                continue;
            };

            let mut stmt = self
                .conn
                .prepare(&schema::field_score_sql(position))
                .map_err(|e| map_index_err!("prepare field scoring", e))?;
            let rows = stmt
                .query_map([expr.as_str()], |row| {
                    Ok((row.get::<_, i64>(0)?, row.get::<_, f64>(1)?))
                })
                .map_err(|e| map_index_err!("score field", e))?;

            let mut field_hits = Vec::new();
            for row in rows {
                let (rowid, score) = row.map_err(|e| map_index_err!("read field scores", e))?;
                if candidates.contains(&rowid) {
                    field_hits.push((rowid, score));
                }
            }

            let best = field_hits.iter().map(|(_, s)| *s).fold(0.0, f64::max);
            if best <= 0.0 {
                continue;
            }
            for (rowid, score) in field_hits {
                *scores.entry(rowid).or_default() += field.boost * score / best;
            }
        }

        Ok(scores)
    }

    fn query_rowids(&self, sql: &str, expr: &str) -> Result<Vec<i64>> {
        let mut stmt = self.conn.prepare(sql).map_err(|e| {
            SearchError::Other(format!("failed to prepare search for '{}': {}", expr, e))
        })?;

        let rows = stmt
            .query_map([expr], |row| row.get::<_, i64>(0))
            .map_err(|e| map_index_err!("execute search", e))?;

        let mut rowids = Vec::new();
        for row in rows {
            rowids.push(row.map_err(|e| map_index_err!("read search results", e))?);
        }
        Ok(rowids)
    }

    fn hit(&self, rowid: i64, score: f64) -> Result<SearchHit> {
        let id = usize::try_from(rowid - 1)
            .ok()
            .and_then(|i| self.refs.get(i))
            .ok_or_else(|| SearchError::Other(format!("unknown row id {}", rowid)))?;
        Ok(SearchHit {
            id: id.clone(),
            score,
        })
    }
}

/// Insert a document under the next row id and record its key.
///
/// Returns how many fields were missing from the record.
fn insert_row(
    conn: &Connection,
    fields: &[FieldConfig],
    refs: &mut Vec<String>,
    key: &str,
    document: &Document,
) -> Result<usize> {
    let rowid = refs.len() as i64 + 1;
    let (values, substituted) = row_values(rowid, key, document, fields);

    conn.prepare_cached(&schema::insert_sql(fields))?
        .execute(params_from_iter(values.iter()))
        .map_err(|e| map_index_err!("add document to index", e))?;

    for (position, field) in fields.iter().enumerate() {
        conn.prepare_cached(&schema::insert_field_sql(position, field))?
            .execute(params![rowid, &values[position + 1]])
            .map_err(|e| map_index_err!("add document to field index", e))?;
    }

    refs.push(key.to_string());
    Ok(substituted)
}

/// Row id followed by the text of each field, in column order, and the
/// number of fields the record lacked
fn row_values(
    rowid: i64,
    key: &str,
    document: &Document,
    fields: &[FieldConfig],
) -> (Vec<Value>, usize) {
    let mut values = Vec::with_capacity(fields.len() + 1);
    let mut substituted = 0;
    values.push(Value::Integer(rowid));
    for field in fields {
        if !document.has(field.source()) {
            tracing::debug!(document = key, field = field.source(), "missing_field");
            substituted += 1;
        }
        values.push(Value::Text(document.text(field.source())));
    }
    (values, substituted)
}
