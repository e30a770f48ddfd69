use crate::{
    analytics::{get_top_tags, TagCount},
    config::Config,
    errors::NoteseekError,
    history::SearchHistory,
    notes::{Folder, Note},
    search::{search_with, SearchFilter, SearchOptions, SearchResult},
    store::KeyValueStore,
    suggest::{get_suggestions_with, Suggestion},
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Explicit search state: configuration, history store and clock.
///
/// Every entry point of the crate can be reached through this type, so
/// callers never depend on hidden globals.
#[derive(Clone)]
pub struct SearchContext {
    config: Config,
    history: SearchHistory,
    now: Option<DateTime<Utc>>,
}

impl SearchContext {
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>) -> Self {
        let history = SearchHistory::new(store, config.history_limit);
        Self {
            config,
            history,
            now: None,
        }
    }

    /// Pin the reference time used for recency scoring.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            weights: self.config.weights.clone(),
            match_mode: self.config.match_mode,
            snippet: self.config.snippet.clone(),
            now: self.now.unwrap_or_else(Utc::now),
        }
    }

    pub fn search<'a>(
        &self,
        notes: &'a [Note],
        filter: &SearchFilter,
        folders: &[Folder],
    ) -> Vec<SearchResult<'a>> {
        search_with(notes, filter, folders, &self.options())
    }

    /// Search and remember the query in the history.
    pub fn search_and_record<'a>(
        &self,
        notes: &'a [Note],
        filter: &SearchFilter,
        folders: &[Folder],
    ) -> Result<Vec<SearchResult<'a>>, NoteseekError> {
        let results = self.search(notes, filter, folders);
        self.history.save_search(&filter.query)?;
        Ok(results)
    }

    pub fn suggestions(
        &self,
        query: &str,
        notes: &[Note],
        folders: &[Folder],
    ) -> Result<Vec<Suggestion>, NoteseekError> {
        let recent = self.history.get_search_history()?;
        Ok(get_suggestions_with(
            query,
            notes,
            folders,
            &recent,
            self.config.suggestion_limit,
        ))
    }

    pub fn top_tags(&self, notes: &[Note], limit: usize) -> Vec<TagCount> {
        get_top_tags(notes, limit)
    }
}
