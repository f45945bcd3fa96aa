//! Web search provider implementations.

mod duckduckgo;

pub use duckduckgo::DuckDuckGo;
