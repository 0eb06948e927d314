mod check;
mod config;
mod search;
mod support;
