//! Command implementations for sitesearch

pub mod check;
pub mod config;
pub mod dispatch;
pub mod search;
