//! In-memory note search.
//!
//! The pipeline runs synchronously over a borrowed snapshot:
//!
//! - `tokenizer`: query text to lowercase terms
//! - `filter`: folder / tag / date / flag predicates, applied first
//! - `matcher`: which fields contain which terms
//! - `scoring`: weighted relevance score
//! - `highlight` and `snippets`: presentation copies of the matched text
//! - `rank`: final ordering

mod filter;
mod highlight;
mod matcher;
mod rank;
mod scoring;
mod snippets;
mod tokenizer;

pub use filter::FilterChain;
pub use highlight::{highlight, highlight_terms, MARK_CLOSE, MARK_OPEN};
pub use matcher::{match_fields, token_matchers, FieldMatches, MatchMode, MatchedField, TokenMatcher};
pub use rank::{sort_results, SortKey, SortOrder};
pub use scoring::{score, Weights};
pub use snippets::{extract_snippets, SnippetConfig};
pub use tokenizer::tokenize;

use crate::notes::{Folder, Note};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, time::Instant};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Free text, empty means no text filter.
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub folder_ids: Vec<i64>,
    /// Also accept notes from descendants of `folder_ids`.
    #[serde(default)]
    pub include_subfolders: bool,
    /// Notes carrying any of these tags pass.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub date_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
    #[serde(default)]
    pub is_archived: Option<bool>,
    #[serde(default)]
    pub sort_by: SortKey,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl SearchFilter {
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlights {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult<'a> {
    pub note: &'a Note,
    pub score: f64,
    pub matched_fields: BTreeSet<MatchedField>,
    pub highlights: Highlights,
    pub snippets: Vec<String>,
}

/// Everything besides the filter that shapes one search call.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub weights: Weights,
    pub match_mode: MatchMode,
    pub snippet: SnippetConfig,
    /// Reference time for the recency bonus.
    pub now: DateTime<Utc>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
            match_mode: MatchMode::default(),
            snippet: SnippetConfig::default(),
            now: Utc::now(),
        }
    }
}

/// Search `notes` with default options evaluated at the current time.
pub fn search<'a>(notes: &'a [Note], filter: &SearchFilter, folders: &[Folder]) -> Vec<SearchResult<'a>> {
    search_with(notes, filter, folders, &SearchOptions::default())
}

pub fn search_with<'a>(
    notes: &'a [Note],
    filter: &SearchFilter,
    folders: &[Folder],
    opts: &SearchOptions,
) -> Vec<SearchResult<'a>> {
    let started = Instant::now();

    let tokens = tokenize(&filter.query);
    let pattern = highlight::terms_pattern(&tokens);
    let matchers = matcher::token_matchers(&tokens);
    let chain = FilterChain::new(filter, folders);

    let mut candidates = 0;
    let mut results: Vec<SearchResult<'a>> = notes
        .iter()
        .filter(|note| chain.matches(note))
        .filter_map(|note| {
            candidates += 1;

            if tokens.is_empty() {
                return Some(SearchResult {
                    note,
                    score: 0.0,
                    matched_fields: BTreeSet::new(),
                    highlights: Highlights {
                        title: note.title.clone(),
                        content: note.content.clone(),
                    },
                    snippets: snippets::extract_with(&note.content, None, &opts.snippet),
                });
            }

            let matches = matcher::match_fields_with(note, &matchers);
            if !matches.is_match(opts.match_mode, tokens.len()) {
                return None;
            }

            let relevance = score(note, &filter.query, &matches, &opts.weights, opts.now);

            // pattern is only absent if the regex couldnt be built
            let highlights = match &pattern {
                Some(re) => Highlights {
                    title: highlight::highlight_with(&note.title, re),
                    content: highlight::highlight_with(&note.content, re),
                },
                None => Highlights {
                    title: note.title.clone(),
                    content: note.content.clone(),
                },
            };

            Some(SearchResult {
                note,
                score: relevance,
                matched_fields: matches.fields(),
                highlights,
                snippets: snippets::extract_with(&note.content, pattern.as_ref(), &opts.snippet),
            })
        })
        .collect();

    sort_results(&mut results, filter.sort_by, filter.sort_order);

    if let Some(limit) = filter.limit {
        results.truncate(limit);
    }

    log::debug!(
        "search tokens={:?} notes={} candidates={} results={} took={}ms",
        tokens,
        notes.len(),
        candidates,
        results.len(),
        started.elapsed().as_micros() as f64 / 1000.0
    );

    results
}
