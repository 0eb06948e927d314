//! Result rendering
//!
//! Turns ranked hits into the HTML list written into the results element:
//!
//! ```text
//! <li><p><a href="URL">TITLE</a></p><p>SNIPPET</p></li>
//! ```
//!
//! one item per hit, in ranking order, or the configured no-results text.

mod sink;

use serde::Serialize;

use crate::config::{SearchConfig, SnippetConfig};
use crate::index::SearchHit;
use crate::store::DocumentStore;

pub use sink::{replace_element_content, MemorySink, PageSink, RenderSink, WriterSink};

/// One rendered result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedItem {
    pub id: String,
    pub score: f64,
    pub title: String,
    pub url: String,
    /// Snippet text before escaping, suffix excluded
    pub snippet: String,
}

/// Final content of the results element
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Rendered {
    /// Nothing matched; `text` is the no-results message
    Empty { text: String },
    /// At least one hit; `html` is the concatenated list items
    HasResults {
        html: String,
        items: Vec<RenderedItem>,
    },
}

impl Rendered {
    /// Content to place in the results element
    pub fn html(&self) -> &str {
        match self {
            Rendered::Empty { text } => text,
            Rendered::HasResults { html, .. } => html,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Rendered::Empty { .. })
    }

    pub fn items(&self) -> &[RenderedItem] {
        match self {
            Rendered::Empty { .. } => &[],
            Rendered::HasResults { items, .. } => items,
        }
    }
}

/// Render hits against the store they were indexed from
pub fn render(hits: &[SearchHit], store: &DocumentStore, config: &SearchConfig) -> Rendered {
    let mut items = Vec::with_capacity(hits.len());
    for hit in hits {
        let Some(document) = store.get(&hit.id) else {
            tracing::warn!(id = %hit.id, "hit_not_in_store");
            continue;
        };
        items.push(RenderedItem {
            id: hit.id.clone(),
            score: hit.score,
            title: document.title(),
            url: document.url(),
            snippet: snippet(&document.text(&config.snippet.field), &config.snippet),
        });
    }

    if items.is_empty() {
        return Rendered::Empty {
            text: config.no_results_text.clone(),
        };
    }

    let html = items
        .iter()
        .map(|item| render_item(item, config))
        .collect::<String>();

    Rendered::HasResults { html, items }
}

fn render_item(item: &RenderedItem, config: &SearchConfig) -> String {
    let text = |s: &str| {
        if config.escape_html {
            escape_html(s)
        } else {
            s.to_string()
        }
    };

    format!(
        "<li><p><a href=\"{}\">{}</a></p><p>{}{}</p></li>",
        text(&item.url),
        text(&item.title),
        text(&item.snippet),
        config.snippet.suffix
    )
}

/// Snippet text: first occurrence of `strip` removed, then cut to `max_chars`
pub fn snippet(source: &str, config: &SnippetConfig) -> String {
    let stripped = if config.strip.is_empty() {
        source.to_string()
    } else {
        source.replacen(&config.strip, "", 1)
    };
    stripped.chars().take(config.max_chars).collect()
}

/// Escape text for use in HTML content and quoted attribute values
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;
    use crate::store::Document;

    fn hit(id: &str, score: f64) -> SearchHit {
        SearchHit {
            id: id.to_string(),
            score,
        }
    }

    fn cats_store() -> DocumentStore {
        let mut store = DocumentStore::new();
        store.insert(
            "a",
            Document::from_pairs([
                ("title", "Cats"),
                ("url", "/cats"),
                ("content", "Introduction to cats and dogs"),
            ]),
        );
        store
    }

    #[test]
    fn test_single_item_markup() {
        let rendered = render(&[hit("a", 1.0)], &cats_store(), &SearchConfig::default());
        assert_eq!(
            rendered.html(),
            "<li><p><a href=\"/cats\">Cats</a></p><p> to cats and dogs...</p></li>"
        );
        assert!(!rendered.is_empty());
        assert_eq!(rendered.items()[0].snippet, " to cats and dogs");
    }

    #[test]
    fn test_no_hits_renders_message() {
        let rendered = render(&[], &cats_store(), &SearchConfig::default());
        assert_eq!(rendered.html(), "No results found!");
        assert!(rendered.is_empty());
        assert!(rendered.items().is_empty());
    }

    #[test]
    fn test_items_follow_hit_order() {
        let mut store = cats_store();
        store.insert(
            "b",
            Document::from_pairs([("title", "Dogs"), ("url", "/dogs"), ("content", "Woof")]),
        );
        let rendered = render(
            &[hit("b", 2.0), hit("a", 1.0)],
            &store,
            &SearchConfig::default(),
        );
        assert_eq!(
            rendered.html(),
            "<li><p><a href=\"/dogs\">Dogs</a></p><p>Woof...</p></li>\
             <li><p><a href=\"/cats\">Cats</a></p><p> to cats and dogs...</p></li>"
        );
    }

    #[test]
    fn test_unknown_hit_is_skipped() {
        let rendered = render(&[hit("missing", 1.0)], &cats_store(), &SearchConfig::default());
        assert!(rendered.is_empty());
    }

    #[test]
    fn test_snippet_strips_first_occurrence_only() {
        let config = SnippetConfig::default();
        assert_eq!(
            snippet("Introduction to widgets and stuff", &config),
            " to widgets and stuff"
        );
        assert_eq!(
            snippet("Introduction: see Introduction", &config),
            ": see Introduction"
        );
        // case-sensitive
        assert_eq!(snippet("introduction here", &config), "introduction here");
    }

    #[test]
    fn test_snippet_truncates_to_max_chars() {
        let config = SnippetConfig::default();
        let long = "x".repeat(400);
        assert_eq!(snippet(&long, &config).chars().count(), 150);

        let exact = "y".repeat(150);
        assert_eq!(snippet(&exact, &config), exact);

        assert_eq!(snippet("short", &config), "short");
    }

    #[test]
    fn test_snippet_counts_characters_not_bytes() {
        let config = SnippetConfig {
            max_chars: 3,
            ..SnippetConfig::default()
        };
        assert_eq!(snippet("héllo", &config), "hél");
        assert_eq!(snippet("日本語テキスト", &config), "日本語");
    }

    #[test]
    fn test_truncation_happens_after_stripping() {
        let config = SnippetConfig {
            max_chars: 5,
            ..SnippetConfig::default()
        };
        assert_eq!(snippet("IntroductionABCDEFG", &config), "ABCDE");
    }

    #[test]
    fn test_description_preset_has_no_suffix() {
        let mut store = DocumentStore::new();
        store.insert(
            "a",
            Document::from_pairs([
                ("title", "Owls"),
                ("url", "/owls"),
                ("description", "Introduction to owls"),
                ("content", "Long body"),
            ]),
        );
        let rendered = render(
            &[hit("a", 1.0)],
            &store,
            &SearchConfig::preset(Preset::Description),
        );
        assert_eq!(
            rendered.html(),
            "<li><p><a href=\"/owls\">Owls</a></p><p> to owls</p></li>"
        );
    }

    #[test]
    fn test_escaping_on_by_default() {
        let mut store = DocumentStore::new();
        store.insert(
            "x",
            Document::from_pairs([
                ("title", "<script>alert(1)</script>"),
                ("url", "/a\"onmouseover=\"x"),
                ("content", "Tom & Jerry's"),
            ]),
        );
        let rendered = render(&[hit("x", 1.0)], &store, &SearchConfig::default());
        assert_eq!(
            rendered.html(),
            "<li><p><a href=\"/a&quot;onmouseover=&quot;x\">&lt;script&gt;alert(1)&lt;/script&gt;</a></p>\
             <p>Tom &amp; Jerry&#39;s...</p></li>"
        );
    }

    #[test]
    fn test_escaping_can_be_disabled() {
        let mut store = DocumentStore::new();
        store.insert(
            "x",
            Document::from_pairs([("title", "<b>Bold</b>"), ("url", "/b"), ("content", "")]),
        );
        let config = SearchConfig {
            escape_html: false,
            ..SearchConfig::default()
        };
        let rendered = render(&[hit("x", 1.0)], &store, &config);
        assert_eq!(
            rendered.html(),
            "<li><p><a href=\"/b\"><b>Bold</b></a></p><p>...</p></li>"
        );
    }

    #[test]
    fn test_missing_fields_render_empty() {
        let mut store = DocumentStore::new();
        store.insert("bare", Document::default());
        let rendered = render(&[hit("bare", 1.0)], &store, &SearchConfig::default());
        assert_eq!(
            rendered.html(),
            "<li><p><a href=\"\"></a></p><p>...</p></li>"
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(escape_html("plain"), "plain");
    }
}
