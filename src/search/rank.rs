use super::SearchResult;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt::Display, str::FromStr};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Relevance,
    /// `created_at`
    Date,
    Title,
    /// `updated_at`
    Updated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "relevance" => Ok(SortKey::Relevance),
            "date" => Ok(SortKey::Date),
            "title" => Ok(SortKey::Title),
            "updated" => Ok(SortKey::Updated),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Relevance => write!(f, "relevance"),
            SortKey::Date => write!(f, "date"),
            SortKey::Title => write!(f, "title"),
            SortKey::Updated => write!(f, "updated"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Sort results by `key` in `order`.
///
/// Equal keys always fall back to note id ascending, regardless of `order`,
/// so repeated calls on the same input give the same sequence.
pub fn sort_results(results: &mut [SearchResult<'_>], key: SortKey, order: SortOrder) {
    results.sort_by(|a, b| {
        let primary = match key {
            SortKey::Relevance => a.score.total_cmp(&b.score),
            SortKey::Date => a.note.created_at.cmp(&b.note.created_at),
            SortKey::Title => compare_titles(&a.note.title, &b.note.title),
            SortKey::Updated => a.note.updated().cmp(&b.note.updated()),
        };

        let primary = match order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };

        primary.then_with(|| a.note.id.cmp(&b.note.id))
    });
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::Note;
    use chrono::{Duration, TimeZone, Utc};
    use std::collections::BTreeSet;

    fn make_note(id: i64, title: &str, days: i64) -> Note {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Note {
            id,
            title: title.to_string(),
            content: String::new(),
            folder_id: None,
            tags: vec![],
            is_favorite: false,
            is_archived: false,
            created_at: base + Duration::days(days),
            updated_at: Some(base + Duration::days(100 - days)),
        }
    }

    fn result(note: &Note, score: f64) -> SearchResult<'_> {
        SearchResult {
            note,
            score,
            matched_fields: BTreeSet::new(),
            highlights: Default::default(),
            snippets: vec![],
        }
    }

    fn ids(results: &[SearchResult<'_>]) -> Vec<i64> {
        results.iter().map(|r| r.note.id).collect()
    }

    #[test]
    fn test_relevance_desc_with_id_tiebreak() {
        let notes = [make_note(3, "c", 0), make_note(1, "a", 1), make_note(2, "b", 2)];
        let mut results = vec![result(&notes[0], 5.0), result(&notes[1], 5.0), result(&notes[2], 9.0)];
        sort_results(&mut results, SortKey::Relevance, SortOrder::Desc);
        assert_eq!(ids(&results), vec![2, 1, 3]);

        sort_results(&mut results, SortKey::Relevance, SortOrder::Asc);
        assert_eq!(ids(&results), vec![1, 3, 2]);
    }

    #[test]
    fn test_title_is_case_insensitive() {
        let notes = [make_note(1, "banana", 0), make_note(2, "Apple", 0), make_note(3, "cherry", 0)];
        let mut results: Vec<_> = notes.iter().map(|n| result(n, 0.0)).collect();
        sort_results(&mut results, SortKey::Title, SortOrder::Asc);
        assert_eq!(ids(&results), vec![2, 1, 3]);
    }

    #[test]
    fn test_date_and_updated() {
        let mut never_edited = make_note(4, "", 50);
        never_edited.updated_at = None;
        let notes = [
            make_note(1, "", 5),
            make_note(2, "", 1),
            make_note(3, "", 9),
            never_edited,
        ];
        let mut results: Vec<_> = notes.iter().map(|n| result(n, 0.0)).collect();

        sort_results(&mut results, SortKey::Date, SortOrder::Desc);
        assert_eq!(ids(&results), vec![4, 3, 1, 2]);

        sort_results(&mut results, SortKey::Date, SortOrder::Asc);
        assert_eq!(ids(&results), vec![2, 1, 3, 4]);

        // missing updated_at sorts by created_at
        sort_results(&mut results, SortKey::Updated, SortOrder::Desc);
        assert_eq!(ids(&results), vec![2, 1, 3, 4]);

        sort_results(&mut results, SortKey::Updated, SortOrder::Asc);
        assert_eq!(ids(&results), vec![4, 3, 1, 2]);
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!("Updated".parse::<SortKey>().unwrap(), SortKey::Updated);
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert!("size".parse::<SortKey>().is_err());
    }
}
