//! Search query parsing and translation to FTS5 MATCH expressions
//!
//! Accepted syntax:
//! - plain words, at least one must match when nothing is required
//! - `+word` required, `-word` prohibited
//! - `field:word` restricts the word to an indexed field
//! - `word*` prefix match
//! - `word^10` and `word~1` parse but the modifier is ignored

use crate::config::FieldConfig;
use crate::text::{is_stop_word, split_terms};

/// Whether a clause must, may or must not match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Optional,
    Required,
    Prohibited,
}

/// A single term of a parsed query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub term: String,
    pub field: Option<String>,
    pub presence: Presence,
    pub prefix: bool,
}

impl Clause {
    /// Quoted term, with `*` for prefix clauses
    fn phrase(&self) -> String {
        let mut phrase = format!("\"{}\"", self.term.replace('"', "\"\""));
        if self.prefix {
            phrase.push('*');
        }
        phrase
    }

    fn to_fts(&self) -> String {
        match &self.field {
            Some(field) => format!("{} : {}", field, self.phrase()),
            None => self.phrase(),
        }
    }

    /// Whether this clause can contribute to the score of `field`
    fn scores_field(&self, field: &str) -> bool {
        self.presence != Presence::Prohibited
            && !matches!(self.field.as_deref(), Some(scope) if scope != field)
    }
}

/// MATCH expressions for the matching and the excluded documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtsQuery {
    pub positive: Option<String>,
    pub negative: Option<String>,
}

impl FtsQuery {
    /// Single expression when there is something to match against
    pub fn combined(&self) -> Option<String> {
        match (&self.positive, &self.negative) {
            (Some(pos), Some(neg)) => Some(format!("({}) NOT ({})", pos, neg)),
            (Some(pos), None) => Some(pos.clone()),
            (None, _) => None,
        }
    }
}

/// Parsed query clauses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    clauses: Vec<Clause>,
}

impl ParsedQuery {
    /// Parse raw query text against the indexed fields
    pub fn parse(query: &str, fields: &[FieldConfig]) -> Self {
        let mut clauses = Vec::new();

        for word in query.split_whitespace() {
            let (presence, rest) = match word.chars().next() {
                Some('+') => (Presence::Required, &word[1..]),
                Some('-') => (Presence::Prohibited, &word[1..]),
                _ => (Presence::Optional, word),
            };

            let (field, rest) = match rest.split_once(':') {
                Some((name, term)) => match fields.iter().find(|f| f.name.eq_ignore_ascii_case(name)) {
                    Some(f) => (Some(f.name.clone()), term),
                    None => (None, rest),
                },
                None => (None, rest),
            };

            let rest = strip_modifiers(rest);
            let (rest, prefix) = match rest.strip_suffix('*') {
                Some(stem) => (stem, true),
                None => (rest, false),
            };

            let terms = split_terms(rest);
            let last = terms.len().saturating_sub(1);
            for (i, term) in terms.into_iter().enumerate() {
                let prefix = prefix && i == last;
                if !prefix && is_stop_word(&term) {
                    continue;
                }
                clauses.push(Clause {
                    term,
                    field: field.clone(),
                    presence,
                    prefix,
                });
            }
        }

        Self { clauses }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Translate to FTS5 expressions.
    ///
    /// Required clauses are combined with AND and, when present, decide the
    /// match set alone. Otherwise optional clauses are combined with OR.
    pub fn to_fts(&self) -> FtsQuery {
        let join = |presence: Presence, op: &str| -> Option<String> {
            let parts: Vec<String> = self
                .clauses
                .iter()
                .filter(|c| c.presence == presence)
                .map(Clause::to_fts)
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(op))
            }
        };

        let positive = join(Presence::Required, " AND ").or_else(|| join(Presence::Optional, " OR "));
        let negative = join(Presence::Prohibited, " OR ");

        FtsQuery { positive, negative }
    }

    /// Expression scoring a single field's table: every required or optional
    /// clause that applies to `field`, combined with OR.
    pub fn field_fts(&self, field: &str) -> Option<String> {
        let parts: Vec<String> = self
            .clauses
            .iter()
            .filter(|c| c.scores_field(field))
            .map(Clause::phrase)
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" OR "))
        }
    }
}

/// Remove trailing `^N` boost and `~N` edit-distance modifiers
fn strip_modifiers(mut word: &str) -> &str {
    while let Some(idx) = word.rfind(['^', '~']) {
        if word[idx + 1..].chars().all(|c| c.is_ascii_digit()) {
            word = &word[..idx];
        } else {
            break;
        }
    }
    word
}
