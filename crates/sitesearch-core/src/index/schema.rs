//! FTS5 table layout for the in-memory index
//!
//! `site_fts` holds every field as a column and decides which documents
//! match. Each field also gets a single-column table (`site_fts_0`,
//! `site_fts_1`, ...) so bm25 is computed against that field's own length.

use rusqlite::Connection;

use crate::config::FieldConfig;
use crate::error::Result;

/// Name of the full-text table
pub const FTS_TABLE: &str = "site_fts";

/// Tokenizer spec for the full-text tables
pub fn tokenizer(stemming: bool) -> &'static str {
    if stemming {
        "porter unicode61"
    } else {
        "unicode61"
    }
}

/// Scoring table for the field at `position`
pub fn field_table(position: usize) -> String {
    format!("{}_{}", FTS_TABLE, position)
}

/// `CREATE VIRTUAL TABLE` statement with one column per field, in order
pub fn create_table_sql(fields: &[FieldConfig], stemming: bool) -> String {
    let columns: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    format!(
        "CREATE VIRTUAL TABLE {} USING fts5({}, tokenize='{}')",
        FTS_TABLE,
        columns.join(", "),
        tokenizer(stemming)
    )
}

/// `CREATE VIRTUAL TABLE` statement for one field's scoring table
pub fn create_field_table_sql(position: usize, field: &FieldConfig, stemming: bool) -> String {
    format!(
        "CREATE VIRTUAL TABLE {} USING fts5({}, tokenize='{}')",
        field_table(position),
        field.name,
        tokenizer(stemming)
    )
}

/// Parameterized insert with the row id first, then one value per field
pub fn insert_sql(fields: &[FieldConfig]) -> String {
    let columns: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    let placeholders: Vec<String> = (1..=fields.len() + 1).map(|i| format!("?{}", i)).collect();
    format!(
        "INSERT INTO {}(rowid, {}) VALUES ({})",
        FTS_TABLE,
        columns.join(", "),
        placeholders.join(", ")
    )
}

/// Parameterized insert into one field's scoring table
pub fn insert_field_sql(position: usize, field: &FieldConfig) -> String {
    format!(
        "INSERT INTO {}(rowid, {}) VALUES (?1, ?2)",
        field_table(position),
        field.name
    )
}

/// Row ids matching `?1`, in row id order
pub fn match_sql() -> String {
    format!(
        "SELECT rowid FROM {table} WHERE {table} MATCH ?1 ORDER BY rowid ASC",
        table = FTS_TABLE
    )
}

/// Row ids not matching `?1`, in row id order
pub fn exclusion_sql() -> String {
    format!(
        "SELECT rowid FROM {table} WHERE rowid NOT IN \
         (SELECT rowid FROM {table} WHERE {table} MATCH ?1) ORDER BY rowid ASC",
        table = FTS_TABLE
    )
}

/// Row ids and negated bm25 of one field's scoring table for `?1`
pub fn field_score_sql(position: usize) -> String {
    format!(
        "SELECT rowid, -bm25({table}) FROM {table} WHERE {table} MATCH ?1",
        table = field_table(position)
    )
}

/// Create the full-text tables on a fresh connection
pub fn create_schema(conn: &Connection, fields: &[FieldConfig], stemming: bool) -> Result<()> {
    conn.execute_batch(&create_table_sql(fields, stemming))?;
    for (position, field) in fields.iter().enumerate() {
        conn.execute_batch(&create_field_table_sql(position, field, stemming))?;
    }
    Ok(())
}
