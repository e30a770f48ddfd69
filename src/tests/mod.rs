
use crate::notes::Note;
use chrono::{DateTime, Duration, TimeZone, Utc};

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// A month-old note, outside every recency bonus.
pub fn make_note(id: i64, title: &str, content: &str, tags: &[&str]) -> Note {
    Note {
        id,
        title: title.to_string(),
        content: content.to_string(),
        folder_id: None,
        tags: tags.iter().map(|s| s.to_string()).collect(),
        is_favorite: false,
        is_archived: false,
        created_at: now() - Duration::days(30),
        updated_at: None,
    }
}
