use super::SearchFilter;
use crate::notes::{with_descendants, Folder, Note};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Pre-scoring predicates compiled from a [`SearchFilter`].
///
/// Stages are ANDed: folder, tags (any of), created date range (inclusive),
/// favorite, archived. Unset stages pass every note.
#[derive(Debug, Clone, Default)]
pub struct FilterChain {
    folder_ids: Option<HashSet<i64>>,
    tags: Option<HashSet<String>>,
    date_from: Option<DateTime<Utc>>,
    date_to: Option<DateTime<Utc>>,
    is_favorite: Option<bool>,
    is_archived: Option<bool>,
}

impl FilterChain {
    pub fn new(filter: &SearchFilter, folders: &[Folder]) -> Self {
        let folder_ids = if filter.folder_ids.is_empty() {
            None
        } else if filter.include_subfolders {
            Some(with_descendants(&filter.folder_ids, folders))
        } else {
            Some(filter.folder_ids.iter().copied().collect())
        };

        let tags = if filter.tags.is_empty() {
            None
        } else {
            Some(filter.tags.iter().map(|t| t.to_lowercase()).collect())
        };

        if let (Some(from), Some(to)) = (filter.date_from, filter.date_to) {
            if to < from {
                log::debug!("date range ends before it starts ({from} > {to}), nothing will match");
            }
        }

        FilterChain {
            folder_ids,
            tags,
            date_from: filter.date_from,
            date_to: filter.date_to,
            is_favorite: filter.is_favorite,
            is_archived: filter.is_archived,
        }
    }

    pub fn matches(&self, note: &Note) -> bool {
        self.folder_matches(note)
            && self.tags_match(note)
            && self.date_matches(note)
            && self.is_favorite.map_or(true, |fav| note.is_favorite == fav)
            && self
                .is_archived
                .map_or(true, |archived| note.is_archived == archived)
    }

    fn folder_matches(&self, note: &Note) -> bool {
        match &self.folder_ids {
            None => true,
            Some(ids) => note.folder_id.is_some_and(|id| ids.contains(&id)),
        }
    }

    fn tags_match(&self, note: &Note) -> bool {
        match &self.tags {
            None => true,
            Some(tags) => note.tags.iter().any(|t| tags.contains(&t.to_lowercase())),
        }
    }

    fn date_matches(&self, note: &Note) -> bool {
        if let Some(from) = self.date_from {
            if note.created_at < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if note.created_at > to {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn make_note(id: i64, folder_id: Option<i64>, tags: &[&str]) -> Note {
        Note {
            id,
            title: String::new(),
            content: String::new(),
            folder_id,
            tags: tags.iter().map(|s| s.to_string()).collect(),
            is_favorite: false,
            is_archived: false,
            created_at: Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn test_empty_filter_passes_everything() {
        let chain = FilterChain::new(&SearchFilter::default(), &[]);
        assert!(chain.matches(&make_note(1, None, &[])));
        assert!(chain.matches(&make_note(2, Some(4), &["a"])));
    }

    #[test]
    fn test_folder_membership() {
        let filter = SearchFilter {
            folder_ids: vec![1, 2],
            ..Default::default()
        };
        let chain = FilterChain::new(&filter, &[]);
        assert!(chain.matches(&make_note(1, Some(2), &[])));
        assert!(!chain.matches(&make_note(2, Some(3), &[])));
        assert!(!chain.matches(&make_note(3, None, &[])));
    }

    #[test]
    fn test_folder_membership_with_subfolders() {
        let folders = vec![
            Folder {
                id: 1,
                name: "work".into(),
                parent_id: None,
            },
            Folder {
                id: 2,
                name: "meetings".into(),
                parent_id: Some(1),
            },
        ];
        let mut filter = SearchFilter {
            folder_ids: vec![1],
            ..Default::default()
        };
        assert!(!FilterChain::new(&filter, &folders).matches(&make_note(1, Some(2), &[])));

        filter.include_subfolders = true;
        assert!(FilterChain::new(&filter, &folders).matches(&make_note(1, Some(2), &[])));
    }

    #[test]
    fn test_tags_any_of() {
        let filter = SearchFilter {
            tags: vec!["Work".into(), "urgent".into()],
            ..Default::default()
        };
        let chain = FilterChain::new(&filter, &[]);
        assert!(chain.matches(&make_note(1, None, &["work"])));
        assert!(chain.matches(&make_note(2, None, &["home", "URGENT"])));
        assert!(!chain.matches(&make_note(3, None, &["home"])));
        assert!(!chain.matches(&make_note(4, None, &["workshop"])));
    }

    #[test]
    fn test_date_range_inclusive() {
        let note = make_note(1, None, &[]);
        let at = note.created_at;

        let filter = SearchFilter {
            date_from: Some(at),
            date_to: Some(at),
            ..Default::default()
        };
        assert!(FilterChain::new(&filter, &[]).matches(&note));

        let filter = SearchFilter {
            date_from: Some(at + Duration::seconds(1)),
            ..Default::default()
        };
        assert!(!FilterChain::new(&filter, &[]).matches(&note));

        let filter = SearchFilter {
            date_to: Some(at - Duration::seconds(1)),
            ..Default::default()
        };
        assert!(!FilterChain::new(&filter, &[]).matches(&note));
    }

    #[test]
    fn test_inverted_date_range_matches_nothing() {
        let note = make_note(1, None, &[]);
        let filter = SearchFilter {
            date_from: Some(note.created_at + Duration::days(1)),
            date_to: Some(note.created_at - Duration::days(1)),
            ..Default::default()
        };
        assert!(!FilterChain::new(&filter, &[]).matches(&note));
    }

    #[test]
    fn test_tri_state_flags() {
        let mut fav = make_note(1, None, &[]);
        fav.is_favorite = true;
        let mut archived = make_note(2, None, &[]);
        archived.is_archived = true;

        let filter = SearchFilter {
            is_favorite: Some(true),
            ..Default::default()
        };
        let chain = FilterChain::new(&filter, &[]);
        assert!(chain.matches(&fav));
        assert!(!chain.matches(&archived));

        let filter = SearchFilter {
            is_archived: Some(false),
            ..Default::default()
        };
        let chain = FilterChain::new(&filter, &[]);
        assert!(chain.matches(&fav));
        assert!(!chain.matches(&archived));
    }
}
