//! Sitesearch Core Library
//!
//! A static site's search widget: read the query from the page location, index
//! the site's document store in memory, search it and render the hits as HTML.

pub mod config;
pub mod error;
pub mod index;
pub mod logging;
pub mod query;
pub mod render;
pub mod store;
pub mod text;
pub mod widget;

pub use config::{Preset, SearchConfig};
pub use error::{Result, SearchError};
pub use index::{SearchHit, SearchIndex};
pub use render::{RenderSink, Rendered};
pub use store::{Document, DocumentStore};
pub use widget::{Outcome, SearchWidget};
