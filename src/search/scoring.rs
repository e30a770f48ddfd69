//! Relevance scoring.
//!
//! A score is a plain weighted sum: every token found in a field adds that
//! field's weight, tags add their weight once per matching tag. On top of that
//! come an exact title bonus, a recency bonus computed from `created_at` and an
//! optional favorite bonus.
//!
//! The dashboard overview and the advanced filter search share this scorer and
//! differ only in their [`Weights`] preset.

use super::matcher::FieldMatches;
use crate::notes::Note;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

const DEFAULT_TITLE_WEIGHT: f64 = 10.0;
const DEFAULT_CONTENT_WEIGHT: f64 = 5.0;
const DEFAULT_TAG_WEIGHT: f64 = 8.0;
const DEFAULT_EXACT_TITLE_BONUS: f64 = 20.0;
const DEFAULT_RECENT_WEEK_BONUS: f64 = 1.0;
const DEFAULT_RECENT_DAY_BONUS: f64 = 2.0;
const DEFAULT_FAVORITE_BONUS: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    /// Per token contained in the title.
    #[serde(default = "default_title")]
    pub title: f64,
    /// Per token contained in the content.
    #[serde(default = "default_content")]
    pub content: f64,
    /// Per matching tag per token.
    #[serde(default = "default_tag")]
    pub tag: f64,
    /// Lowercased title equals the lowercased query.
    #[serde(default = "default_exact_title")]
    pub exact_title: f64,
    /// Note created within the last 7 days.
    #[serde(default = "default_recent_week")]
    pub recent_week: f64,
    /// Note created within the last day, added on top of `recent_week`.
    #[serde(default = "default_recent_day")]
    pub recent_day: f64,
    #[serde(default = "default_favorite")]
    pub favorite: f64,
}

fn default_title() -> f64 {
    DEFAULT_TITLE_WEIGHT
}

fn default_content() -> f64 {
    DEFAULT_CONTENT_WEIGHT
}

fn default_tag() -> f64 {
    DEFAULT_TAG_WEIGHT
}

fn default_exact_title() -> f64 {
    DEFAULT_EXACT_TITLE_BONUS
}

fn default_recent_week() -> f64 {
    DEFAULT_RECENT_WEEK_BONUS
}

fn default_recent_day() -> f64 {
    DEFAULT_RECENT_DAY_BONUS
}

fn default_favorite() -> f64 {
    DEFAULT_FAVORITE_BONUS
}

impl Weights {
    /// Overview search, no favorite bonus.
    pub fn dashboard() -> Self {
        Self {
            title: DEFAULT_TITLE_WEIGHT,
            content: DEFAULT_CONTENT_WEIGHT,
            tag: DEFAULT_TAG_WEIGHT,
            exact_title: DEFAULT_EXACT_TITLE_BONUS,
            recent_week: DEFAULT_RECENT_WEEK_BONUS,
            recent_day: DEFAULT_RECENT_DAY_BONUS,
            favorite: 0.0,
        }
    }

    /// Filter-aware search, favorites get a small boost.
    pub fn advanced() -> Self {
        Self {
            favorite: DEFAULT_FAVORITE_BONUS,
            ..Self::dashboard()
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            ("title", self.title),
            ("content", self.content),
            ("tag", self.tag),
            ("exact_title", self.exact_title),
            ("recent_week", self.recent_week),
            ("recent_day", self.recent_day),
            ("favorite", self.favorite),
        ]
        .into_iter()
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::advanced()
    }
}

/// Score a note that already matched the query.
///
/// `query` is the raw query text, used for the exact title bonus. Callers only
/// score notes with at least one token match; an empty query scores 0.
pub fn score(
    note: &Note,
    query: &str,
    matches: &FieldMatches,
    weights: &Weights,
    now: DateTime<Utc>,
) -> f64 {
    let query = query.trim();
    if query.is_empty() {
        return 0.0;
    }

    let mut total = matches.title as f64 * weights.title
        + matches.content as f64 * weights.content
        + matches.tag_hits as f64 * weights.tag;

    if note.title.to_lowercase() == query.to_lowercase() {
        total += weights.exact_title;
    }

    total += recency_bonus(note.created_at, now, weights);

    if note.is_favorite {
        total += weights.favorite;
    }

    total.max(0.0)
}

/// Notes dated in the future count as brand new.
fn recency_bonus(created_at: DateTime<Utc>, now: DateTime<Utc>, weights: &Weights) -> f64 {
    let age = now - created_at;

    let mut bonus = 0.0;
    if age <= Duration::days(7) {
        bonus += weights.recent_week;
    }
    if age <= Duration::days(1) {
        bonus += weights.recent_day;
    }
    bonus
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{matcher::match_fields, tokenize};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn make_note(title: &str, content: &str, tags: &[&str], age: Duration) -> Note {
        Note {
            id: 1,
            title: title.to_string(),
            content: content.to_string(),
            folder_id: None,
            tags: tags.iter().map(|s| s.to_string()).collect(),
            is_favorite: false,
            is_archived: false,
            created_at: now() - age,
            updated_at: None,
        }
    }

    fn score_for(note: &Note, query: &str, weights: &Weights) -> f64 {
        let m = match_fields(note, &tokenize(query));
        score(note, query, &m, weights, now())
    }

    #[test]
    fn test_field_weights() {
        let old = Duration::days(30);
        let w = Weights::dashboard();

        let note = make_note("Budget Meeting", "Discuss Q3 budget", &["work"], old);
        assert_eq!(score_for(&note, "budget", &w), 15.0);

        let note = make_note("Grocery List", "milk, eggs, budget bread", &[], old);
        assert_eq!(score_for(&note, "budget", &w), 5.0);

        let note = make_note("x", "", &["budget", "budget-2024", "home"], old);
        assert_eq!(score_for(&note, "budget", &w), 16.0);
    }

    #[test]
    fn test_exact_title_bonus() {
        let w = Weights::dashboard();
        let note = make_note("Budget", "", &[], Duration::days(30));
        assert_eq!(score_for(&note, "BUDGET", &w), 30.0);
        assert_eq!(score_for(&note, "  budget ", &w), 30.0);
    }

    #[test]
    fn test_recency_bonus() {
        let w = Weights::dashboard();

        let note = make_note("plan", "", &[], Duration::hours(3));
        assert_eq!(score_for(&note, "pla", &w), 13.0);

        let note = make_note("plan", "", &[], Duration::days(1));
        assert_eq!(score_for(&note, "pla", &w), 13.0);

        let note = make_note("plan", "", &[], Duration::days(5));
        assert_eq!(score_for(&note, "pla", &w), 11.0);

        let note = make_note("plan", "", &[], Duration::days(8));
        assert_eq!(score_for(&note, "pla", &w), 10.0);

        let note = make_note("plan", "", &[], -Duration::days(2));
        assert_eq!(score_for(&note, "pla", &w), 13.0);
    }

    #[test]
    fn test_favorite_bonus_only_in_advanced() {
        let mut note = make_note("plan", "", &[], Duration::days(30));
        note.is_favorite = true;
        assert_eq!(score_for(&note, "pla", &Weights::dashboard()), 10.0);
        assert_eq!(score_for(&note, "pla", &Weights::advanced()), 11.0);
    }

    #[test]
    fn test_empty_query_scores_zero() {
        let note = make_note("plan", "", &[], Duration::hours(1));
        assert_eq!(score_for(&note, "   ", &Weights::advanced()), 0.0);
    }

    #[test]
    fn test_score_never_negative() {
        let w = Weights {
            title: -100.0,
            ..Weights::dashboard()
        };
        let note = make_note("plan", "", &[], Duration::days(30));
        assert_eq!(score_for(&note, "plan", &w), 0.0);
    }

    #[test]
    fn test_exact_title_beats_content_match() {
        let w = Weights::advanced();
        let titled = make_note("notes", "", &[], Duration::days(30));
        let body = make_note("other", "my notes here", &[], Duration::days(30));
        assert!(score_for(&titled, "notes", &w) > score_for(&body, "notes", &w));
    }
}
