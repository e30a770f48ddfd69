//! Full-text search over a note-taking application's notes.
//!
//! - `notes`: the read-only note and folder snapshot
//! - `search`: filtering, scoring, highlighting, snippets and ranking
//! - `suggest`: query suggestions from history, tags, folders and frequent words
//! - `analytics`: tag statistics and snapshot totals
//! - `export`: JSON, CSV and Markdown renditions of search results
//! - `history` and `store`: persisted recent searches
//! - `context`: ties configuration, clock and history together

pub mod analytics;
pub mod config;
pub mod context;
pub mod errors;
pub mod export;
pub mod history;
pub mod notes;
pub mod search;
pub mod store;
pub mod suggest;

#[cfg(test)]
mod tests;

pub use analytics::{get_top_tags, TagCount};
pub use context::SearchContext;
pub use errors::NoteseekError;
pub use export::{export_search_results, ExportFormat};
pub use notes::{Folder, Note, Snapshot};
pub use search::{search, SearchFilter, SearchResult};
pub use suggest::{get_suggestions, Suggestion};

/// Split a comma or space separated tag list.
pub fn parse_tags(tags: String) -> Vec<String> {
    tags.split(',')
        .flat_map(|value| value.split(' ').filter(|value| !value.is_empty()))
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
}
