use crate::{
    analytics::{folder_note_counts, tag_counts, word_frequencies},
    notes::{Folder, Note},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// Frequent words shorter than this are not suggested.
const MIN_WORD_CHARS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Recent,
    Tag,
    Folder,
    Word,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    pub kind: SuggestionKind,
    /// Tag usage, notes in the folder or word occurrences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

pub fn get_suggestions(
    query: &str,
    notes: &[Note],
    folders: &[Folder],
    recent_searches: &[String],
) -> Vec<Suggestion> {
    get_suggestions_with(query, notes, folders, recent_searches, DEFAULT_SUGGESTION_LIMIT)
}

/// Suggestions for a partially typed query.
///
/// An empty query yields recent searches. Otherwise tags, folder names and
/// frequent words containing the query are merged in that order, each group
/// sorted by count. Entries are unique by text, ignoring case.
pub fn get_suggestions_with(
    query: &str,
    notes: &[Note],
    folders: &[Folder],
    recent_searches: &[String],
    limit: usize,
) -> Vec<Suggestion> {
    let query = query.trim().to_lowercase();

    let candidates: Vec<Suggestion> = if query.is_empty() {
        recent_searches
            .iter()
            .map(|q| Suggestion {
                text: q.clone(),
                kind: SuggestionKind::Recent,
                count: None,
            })
            .collect()
    } else {
        let mut out = vec![];
        out.extend(tag_suggestions(&query, notes));
        out.extend(folder_suggestions(&query, notes, folders));
        out.extend(word_suggestions(&query, notes));
        out
    };

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|s| seen.insert(s.text.to_lowercase()))
        .take(limit)
        .collect()
}

fn by_count_then_text(a: &Suggestion, b: &Suggestion) -> std::cmp::Ordering {
    b.count.cmp(&a.count).then_with(|| a.text.cmp(&b.text))
}

fn tag_suggestions(query: &str, notes: &[Note]) -> Vec<Suggestion> {
    let mut out: Vec<Suggestion> = tag_counts(notes)
        .into_iter()
        .filter(|(tag, _)| tag.to_lowercase().contains(query))
        .map(|(tag, count)| Suggestion {
            text: tag.to_string(),
            kind: SuggestionKind::Tag,
            count: Some(count),
        })
        .collect();
    out.sort_by(by_count_then_text);
    out
}

fn folder_suggestions(query: &str, notes: &[Note], folders: &[Folder]) -> Vec<Suggestion> {
    let counts = folder_note_counts(notes, folders);
    let mut out: Vec<Suggestion> = folders
        .iter()
        .filter(|f| f.name.to_lowercase().contains(query))
        .map(|f| Suggestion {
            text: f.name.clone(),
            kind: SuggestionKind::Folder,
            count: counts.get(&f.id).copied(),
        })
        .collect();
    out.sort_by(by_count_then_text);
    out
}

fn word_suggestions(query: &str, notes: &[Note]) -> Vec<Suggestion> {
    let mut out: Vec<Suggestion> = word_frequencies(notes)
        .into_iter()
        .filter(|(word, count)| {
            *count > 1 && word.chars().count() >= MIN_WORD_CHARS && word.contains(query)
        })
        .map(|(word, count)| Suggestion {
            text: word,
            kind: SuggestionKind::Word,
            count: Some(count),
        })
        .collect();
    out.sort_by(by_count_then_text);
    out
}
