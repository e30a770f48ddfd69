use crate::notes::{folder_path, Folder, Note, NoteStats};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Tags by number of notes using them, most used first, ties alphabetical.
pub fn get_top_tags(notes: &[Note], limit: usize) -> Vec<TagCount> {
    let mut top: Vec<TagCount> = tag_counts(notes)
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count,
        })
        .collect();

    top.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
    top.truncate(limit);
    top
}

pub(crate) fn tag_counts(notes: &[Note]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for note in notes {
        for tag in &note.tags {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }
    counts
}

pub(crate) fn folder_note_counts(notes: &[Note], folders: &[Folder]) -> HashMap<i64, usize> {
    let mut counts: HashMap<i64, usize> = folders.iter().map(|f| (f.id, 0)).collect();
    for folder_id in notes.iter().filter_map(|n| n.folder_id) {
        if let Some(count) = counts.get_mut(&folder_id) {
            *count += 1;
        }
    }
    counts
}

/// Lowercase words of titles and contents with how often they occur.
pub(crate) fn word_frequencies(notes: &[Note]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for note in notes {
        let words = note
            .title
            .split(|c: char| !c.is_alphanumeric())
            .chain(note.content.split(|c: char| !c.is_alphanumeric()))
            .filter(|w| !w.is_empty());

        for word in words {
            *counts.entry(word.to_lowercase()).or_insert(0) += 1;
        }
    }
    counts
}

/// Totals over a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overview {
    pub notes: usize,
    pub favorites: usize,
    pub archived: usize,
    pub words: usize,
    pub chars: usize,
    pub distinct_tags: usize,
    /// Notes per folder, by full path.
    pub folders: Vec<FolderCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderCount {
    pub path: String,
    pub notes: usize,
}

pub fn overview(notes: &[Note], folders: &[Folder]) -> Overview {
    let stats: Vec<NoteStats> = notes.iter().map(|n| n.stats()).collect();

    let counts = folder_note_counts(notes, folders);
    let mut folder_counts: Vec<FolderCount> = folders
        .iter()
        .map(|f| FolderCount {
            path: folder_path(f, folders),
            notes: counts.get(&f.id).copied().unwrap_or(0),
        })
        .collect();
    folder_counts.sort_by(|a, b| a.path.cmp(&b.path));

    Overview {
        notes: notes.len(),
        favorites: notes.iter().filter(|n| n.is_favorite).count(),
        archived: notes.iter().filter(|n| n.is_archived).count(),
        words: stats.iter().map(|s| s.word_count).sum(),
        chars: stats.iter().map(|s| s.char_count).sum(),
        distinct_tags: tag_counts(notes).len(),
        folders: folder_counts,
    }
}
