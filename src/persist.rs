use crate::app_dirs::AppDirs;
use crate::store::WorkoutStore;
use crate::workout::Workout;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The single process-wide slot workouts live under.
pub const STORAGE_KEY: &str = "workouts";

/// Generic string-keyed blob substrate, the moral equivalent of the
/// browser's local storage.
pub trait BlobStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&mut self, key: &str) -> io::Result<()>;
}

/// Blob store backed by one file per key under a root directory.
#[derive(Clone, Debug)]
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let root = AppDirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self { root }
    }

    pub fn with_root<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl Default for FileBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.path_for(key), value)
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// In-memory blob store for tests and headless runs.
#[derive(Clone, Debug, Default)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Option<String> {
        self.blobs.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.blobs.remove(key);
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("could not encode workouts: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("could not write workouts: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum LoadError {
    /// No prior saved state. Normal at first startup, never shown to the user.
    #[error("no saved workouts")]
    EmptyOrAbsent,
    /// Blob exists but cannot be trusted. One bad entry fails the whole load;
    /// the caller proceeds with an empty store rather than a partial one.
    #[error("saved workouts are malformed: {0}")]
    Malformed(String),
}

/// Round-trips the workout store through a blob store slot.
///
/// Records are written with their stored derived fields (pace/speed,
/// description) and those values are restored verbatim on load. They are
/// deliberately not re-derived from the base fields: if the derivation ever
/// changes, recomputing would silently rewrite history.
#[derive(Debug)]
pub struct WorkoutLog<B: BlobStore> {
    blobs: B,
}

impl<B: BlobStore> WorkoutLog<B> {
    pub fn new(blobs: B) -> Self {
        Self { blobs }
    }

    pub fn save(&mut self, store: &WorkoutStore) -> Result<(), SaveError> {
        let data = serde_json::to_string_pretty(store.all())?;
        self.blobs.set(STORAGE_KEY, &data)?;
        tracing::debug!(count = store.len(), "saved workouts");
        Ok(())
    }

    pub fn load(&self) -> Result<Vec<Workout>, LoadError> {
        let data = match self.blobs.get(STORAGE_KEY) {
            Some(data) if !data.trim().is_empty() => data,
            _ => return Err(LoadError::EmptyOrAbsent),
        };

        let records: Vec<Workout> =
            serde_json::from_str(&data).map_err(|e| LoadError::Malformed(e.to_string()))?;

        let mut seen = HashSet::new();
        for record in &records {
            if !record.is_well_formed() {
                return Err(LoadError::Malformed(format!(
                    "record {} violates workout invariants",
                    record.id()
                )));
            }
            if !seen.insert(record.id()) {
                return Err(LoadError::Malformed(format!(
                    "duplicate workout id: {}",
                    record.id()
                )));
            }
        }

        Ok(records)
    }

    pub fn reset(&mut self) -> io::Result<()> {
        self.blobs.remove(STORAGE_KEY)
    }
}
