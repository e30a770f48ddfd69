use crate::{errors::NoteseekError, store::KeyValueStore};
use std::sync::Arc;

pub const HISTORY_KEY: &str = "search_history";
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Recent search queries, most recent first, kept in a [`KeyValueStore`].
#[derive(Clone)]
pub struct SearchHistory {
    store: Arc<dyn KeyValueStore>,
    limit: usize,
}

impl SearchHistory {
    pub fn new(store: Arc<dyn KeyValueStore>, limit: usize) -> Self {
        Self { store, limit }
    }

    /// Records `query` at the front; a repeated query moves to the front
    /// instead of appearing twice. Blank queries are ignored.
    pub fn save_search(&self, query: &str) -> Result<(), NoteseekError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(());
        }

        let mut history = self.get_search_history()?;
        history.retain(|q| q != query);
        history.insert(0, query.to_string());
        history.truncate(self.limit);

        self.store
            .set(HISTORY_KEY, serde_json::to_string(&history)?.as_bytes())?;
        Ok(())
    }

    pub fn get_search_history(&self) -> Result<Vec<String>, NoteseekError> {
        let Some(data) = self.store.get(HISTORY_KEY)? else {
            return Ok(vec![]);
        };

        match serde_json::from_slice::<Vec<String>>(&data) {
            Ok(history) => Ok(history),
            Err(err) => {
                log::warn!("discarding unreadable search history: {err}");
                Ok(vec![])
            }
        }
    }

    pub fn clear_search_history(&self) -> Result<(), NoteseekError> {
        self.store.remove(HISTORY_KEY)?;
        Ok(())
    }
}
