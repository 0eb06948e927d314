//! Render sinks: where the rendered results element content goes

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use regex::Regex;

use super::Rendered;
use crate::error::{Result, SearchError};

/// Receives the final results element content, once per run
pub trait RenderSink {
    fn render(&mut self, rendered: &Rendered) -> Result<()>;
}

impl<F> RenderSink for F
where
    F: FnMut(&Rendered) -> Result<()>,
{
    fn render(&mut self, rendered: &Rendered) -> Result<()> {
        self(rendered)
    }
}

/// Writes the element content followed by a newline
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RenderSink for WriterSink<W> {
    fn render(&mut self, rendered: &Rendered) -> Result<()> {
        writeln!(self.writer, "{}", rendered.html())?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps the last rendered content in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub contents: Option<String>,
}

impl RenderSink for MemorySink {
    fn render(&mut self, rendered: &Rendered) -> Result<()> {
        self.contents = Some(rendered.html().to_string());
        Ok(())
    }
}

/// Overwrites the content of an element, found by id, in an HTML file
#[derive(Debug, Clone)]
pub struct PageSink {
    path: PathBuf,
    element_id: String,
}

impl PageSink {
    pub fn new(path: impl Into<PathBuf>, element_id: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            element_id: element_id.into(),
        }
    }
}

impl RenderSink for PageSink {
    fn render(&mut self, rendered: &Rendered) -> Result<()> {
        let page = fs::read_to_string(&self.path)
            .map_err(|e| SearchError::io_operation("read page", self.path.display(), e))?;

        let updated = replace_element_content(&page, &self.element_id, rendered.html())?
            .ok_or_else(|| SearchError::ElementNotFound {
                id: self.element_id.clone(),
                path: self.path.clone(),
            })?;

        fs::write(&self.path, updated)
            .map_err(|e| SearchError::io_operation("write page", self.path.display(), e))?;
        tracing::debug!(path = %self.path.display(), element = %self.element_id, "page_updated");
        Ok(())
    }
}

/// Replace everything between the opening tag of the element with `id` and
/// its matching closing tag.
///
/// Returns `Ok(None)` when no such element exists or it is never closed.
pub fn replace_element_content(html: &str, id: &str, content: &str) -> Result<Option<String>> {
    let open_pattern = format!(
        r#"<([A-Za-z][A-Za-z0-9-]*)(?:\s[^>]*?)?\sid\s*=\s*(?:"{id}"[^>]*|'{id}'[^>]*|{id}(?:[\s/][^>]*)?)>"#,
        id = regex::escape(id)
    );
    let open_re = Regex::new(&open_pattern)
        .map_err(|e| SearchError::Other(format!("invalid element pattern: {}", e)))?;

    let Some(open) = open_re.captures(html) else {
        return Ok(None);
    };
    let (Some(whole), Some(tag)) = (open.get(0), open.get(1)) else {
        return Ok(None);
    };
    let content_start = whole.end();

    let tag_re = Regex::new(&format!(
        r"(?i)<(/?){}(?:\s[^>]*)?>",
        regex::escape(tag.as_str())
    ))
    .map_err(|e| SearchError::Other(format!("invalid element pattern: {}", e)))?;

    let mut depth = 1usize;
    for m in tag_re.captures_iter(&html[content_start..]) {
        let (Some(whole), Some(slash)) = (m.get(0), m.get(1)) else {
            continue;
        };
        if slash.as_str() == "/" {
            depth -= 1;
            if depth == 0 {
                let content_end = content_start + whole.start();
                let mut out = String::with_capacity(html.len() + content.len());
                out.push_str(&html[..content_start]);
                out.push_str(content);
                out.push_str(&html[content_end..]);
                return Ok(Some(out));
            }
        } else if !whole.as_str().ends_with("/>") {
            depth += 1;
        }
    }

    Ok(None)
}
