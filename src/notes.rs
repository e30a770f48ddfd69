use crate::errors::NoteseekError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::{collections::HashSet, hash::Hash, path::Path, time::Instant};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,

    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default)]
    pub folder_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,

    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub is_archived: bool,

    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Hash for Note {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl PartialEq for Note {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Note {}

impl Note {
    /// Last modification time, `created_at` for notes that were never edited.
    pub fn updated(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }

    pub fn stats(&self) -> NoteStats {
        NoteStats {
            id: self.id,
            word_count: self.content.split_whitespace().count(),
            char_count: self.content.chars().count(),
        }
    }
}

/// The backend serializes absent content and tags as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteStats {
    pub id: i64,
    pub word_count: usize,
    pub char_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
}

/// Slash separated path from the root folder, e.g. `work/meetings`.
///
/// Unknown parents end the walk; a parent cycle is cut at the first repeat.
pub fn folder_path(folder: &Folder, folders: &[Folder]) -> String {
    let mut parts = vec![folder.name.as_str()];
    let mut seen = HashSet::from([folder.id]);
    let mut parent = folder.parent_id;

    while let Some(parent_id) = parent {
        if !seen.insert(parent_id) {
            break;
        }
        match folders.iter().find(|f| f.id == parent_id) {
            Some(p) => {
                parts.push(p.name.as_str());
                parent = p.parent_id;
            }
            None => break,
        }
    }

    parts.reverse();
    parts.join("/")
}

/// Expands folder ids to include every descendant folder.
pub fn with_descendants(folder_ids: &[i64], folders: &[Folder]) -> HashSet<i64> {
    let mut out: HashSet<i64> = folder_ids.iter().copied().collect();
    let mut frontier: Vec<i64> = folder_ids.to_vec();

    while let Some(id) = frontier.pop() {
        for child in folders.iter().filter(|f| f.parent_id == Some(id)) {
            if out.insert(child.id) {
                frontier.push(child.id);
            }
        }
    }

    out
}

/// Read-only notes and folders as exported by the host application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub folders: Vec<Folder>,
}

impl Snapshot {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NoteseekError> {
        let path = path.as_ref();
        let now = Instant::now();

        let data = std::fs::read(path)?;
        let snapshot: Snapshot = serde_json::from_slice(&data)
            .map_err(|e| NoteseekError::Snapshot(format!("{}: {e}", path.display())))?;

        log::debug!(
            "took {}ms to read snapshot with {} notes and {} folders",
            now.elapsed().as_micros() as f64 / 1000.0,
            snapshot.notes.len(),
            snapshot.folders.len()
        );

        Ok(snapshot)
    }
}
