//! This module provides ways to persist the task store between sessions

use std::error::Error;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::config::STORAGE_KEY;
use crate::mock_behaviour::MockBehaviour;
use crate::store::TaskStore;
use crate::traits::TaskPersistence;


/// Decode a persisted blob. Inconsistent orderings are repaired, see [`TaskStore::normalize`]
pub fn decode_store(blob: &str) -> Result<TaskStore, Box<dyn Error>> {
    let mut store: TaskStore = serde_json::from_str(blob)?;
    store.normalize();
    Ok(store)
}

pub fn encode_store(store: &TaskStore) -> Result<String, Box<dyn Error>> {
    Ok(serde_json::to_string(store)?)
}


/// A storage that keeps the task store in a local JSON file
#[derive(Debug, Clone, PartialEq)]
pub struct FileStorage {
    backing_file: PathBuf,
}

impl FileStorage {
    /// A storage backed by a file named after the [storage key](STORAGE_KEY) in the given folder.
    /// Neither the folder nor the file have to exist yet
    pub fn in_folder(folder: &Path) -> Self {
        Self::from_file(&folder.join(format!("{}.json", STORAGE_KEY)))
    }

    pub fn from_file(path: &Path) -> Self {
        Self { backing_file: PathBuf::from(path) }
    }

    /// Get the path to the backing file
    pub fn backing_file(&self) -> &Path {
        &self.backing_file
    }

    fn read_store(&self) -> Result<Option<TaskStore>, Box<dyn Error>> {
        let path = &self.backing_file;
        let content = match std::fs::read_to_string(path) {
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(format!("Unable to open file {:?}: {}", path, err).into()),
            Ok(content) => content,
        };
        Ok(Some(decode_store(&content)?))
    }
}

impl TaskPersistence for FileStorage {
    fn load(&mut self) -> TaskStore {
        match self.read_store() {
            Ok(Some(store)) => {
                log::debug!("Loaded {} tasks from {:?}", store.task_count(), self.backing_file);
                store
            },
            Ok(None) => {
                log::info!("No task file at {:?}. Starting with no task", self.backing_file);
                TaskStore::new()
            },
            Err(err) => {
                log::warn!("Invalid task file {:?}: {}. Starting with no task", self.backing_file, err);
                TaskStore::new()
            },
        }
    }

    fn save(&mut self, store: &TaskStore) -> Result<(), Box<dyn Error>> {
        let path = &self.backing_file;
        if let Some(folder) = path.parent() {
            if folder.as_os_str().is_empty() == false {
                std::fs::create_dir_all(folder)
                    .map_err(|err| format!("Unable to create folder {:?}: {}", folder, err))?;
            }
        }

        write_atomically(path, |file| {
            serde_json::to_writer(file, store)
                .map_err(|err| format!("Unable to serialize tasks: {}", err).into())
        })
    }
}

/// Write a file through a temporary file in the same folder, that replaces `path` only once it is complete.
///
/// In case `write` fails, the previous content of `path` is left untouched
fn write_atomically<F>(path: &Path, write: F) -> Result<(), Box<dyn Error>>
where
    F: FnOnce(&mut NamedTempFile) -> Result<(), Box<dyn Error>>,
{
    let folder = match path.parent() {
        Some(folder) if folder.as_os_str().is_empty() == false => folder,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(folder)
        .map_err(|err| format!("Unable to create a temporary file in {:?}: {}", folder, err))?;

    write(&mut temp)?;
    temp.flush()
        .map_err(|err| format!("Unable to save file {:?}: {}", path, err))?;

    temp.persist(path)
        .map_err(|err| format!("Unable to save file {:?}: {}", path, err))?;
    Ok(())
}


/// A storage that keeps the serialized task store in memory.
///
/// This mimics a key-value browser storage, and is mostly useful for tests
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    blob: Option<String>,
    mock_behaviour: MockBehaviour,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A storage that already holds a raw blob (which may be invalid)
    pub fn with_blob<S: ToString>(blob: S) -> Self {
        Self { blob: Some(blob.to_string()), mock_behaviour: MockBehaviour::default() }
    }

    /// A storage whose actions fail or succeed as described by `behaviour`
    pub fn with_behaviour(behaviour: MockBehaviour) -> Self {
        Self { blob: None, mock_behaviour: behaviour }
    }

    /// The raw persisted content, if any
    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }

    pub fn set_blob<S: ToString>(&mut self, blob: S) {
        self.blob = Some(blob.to_string());
    }

    /// Remove the persisted content, as if the storage has been cleared externally
    pub fn clear(&mut self) {
        self.blob = None;
    }

    pub fn mock_behaviour_mut(&mut self) -> &mut MockBehaviour {
        &mut self.mock_behaviour
    }
}

impl TaskPersistence for MemoryStorage {
    fn load(&mut self) -> TaskStore {
        if let Err(err) = self.mock_behaviour.can_load() {
            log::warn!("Unable to read stored tasks: {}. Starting with no task", err);
            return TaskStore::new();
        }

        match &self.blob {
            None => TaskStore::new(),
            Some(blob) => match decode_store(blob) {
                Ok(store) => store,
                Err(err) => {
                    log::warn!("Invalid stored tasks: {}. Starting with no task", err);
                    TaskStore::new()
                },
            },
        }
    }

    fn save(&mut self, store: &TaskStore) -> Result<(), Box<dyn Error>> {
        self.mock_behaviour.can_save()?;
        self.blob = Some(encode_store(store)?);
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::day::DayId;
    use crate::task::Label;

    fn sample_store() -> TaskStore {
        let mut store = TaskStore::new();
        let d1: DayId = "2024-03-05".parse().unwrap();
        let d2: DayId = "2024-03-06".parse().unwrap();
        store.add_task("Write report", d1, vec![Label::new("#61BD4F"), Label::new("#0079BF")]);
        store.add_task("Buy milk", d1, Vec::new());
        store.add_task("Call mum", d2, vec![Label::new("#EB5A46")]);
        store
    }

    #[test]
    fn serde_file_storage() {
        let temp = tempfile::tempdir().unwrap();
        let folder = temp.path().join("board");
        let mut storage = FileStorage::in_folder(&folder);
        assert_eq!(storage.backing_file(), folder.join("calendar-tasks.json").as_path());

        let store = sample_store();
        storage.save(&store).unwrap();

        let mut retrieved = FileStorage::in_folder(&folder);
        assert_eq!(retrieved.load(), store);

        // Saving again replaces the previous content
        let mut smaller = store.clone();
        let d: DayId = "2024-03-06".parse().unwrap();
        let id = smaller.task_ids_on(&d)[0].clone();
        smaller.delete_task(&d, &id);
        storage.save(&smaller).unwrap();
        assert_eq!(retrieved.load(), smaller);
    }

    #[test]
    fn failed_save_keeps_previous_file() {
        let temp = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::in_folder(temp.path());
        let store = sample_store();
        storage.save(&store).unwrap();

        // A write that breaks down halfway through
        let result = write_atomically(storage.backing_file(), |file| {
            file.write_all(b"{\"2024-03-05\": [{\"id\": \"trunc")?;
            Err("No space left on device".into())
        });
        assert!(result.is_err());

        assert_eq!(storage.load(), store);
        let leftovers = std::fs::read_dir(temp.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn missing_or_corrupt_file_loads_empty() {
        let temp = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::in_folder(temp.path());
        assert!(storage.load().is_empty());

        std::fs::write(storage.backing_file(), "{ this is not json").unwrap();
        assert!(storage.load().is_empty());
    }

    #[test]
    fn memory_round_trip() {
        let mut storage = MemoryStorage::new();
        assert!(storage.load().is_empty());

        let store = sample_store();
        storage.save(&store).unwrap();
        assert!(storage.blob().unwrap().contains("Write report"));
        assert_eq!(storage.load(), store);

        storage.clear();
        assert!(storage.load().is_empty());
    }

    #[test]
    fn memory_corrupt_blobs() {
        // Two spellings of the same day, which must not be merged or overwrite each other
        let non_canonical_key = r#"{
            "2024-03-05": [{"id": "a", "text": "A", "date": "2024-03-05", "position": 0}],
            "2024-3-5": [{"id": "b", "text": "B", "date": "2024-03-05", "position": 0}]
        }"#;
        let duplicate_key = r#"{
            "2024-03-05": [{"id": "a", "text": "A", "date": "2024-03-05", "position": 0}],
            "2024-03-05": [{"id": "b", "text": "B", "date": "2024-03-05", "position": 0}]
        }"#;
        let blobs = [
            "", "null", "[1, 2]",
            "{\"2024-03-05\": 3}",
            "{\"yesterday\": []}",
            "{\" 2024-03-05\": []}",
            "{\"2024-03-5\": []}",
            non_canonical_key,
            duplicate_key,
        ];
        for blob in &blobs {
            let mut storage = MemoryStorage::with_blob(blob);
            assert!(storage.load().is_empty(), "blob {:?} should load as an empty store", blob);
        }
    }

    #[test]
    fn memory_failures() {
        let mut storage = MemoryStorage::with_behaviour(MockBehaviour::fail_now(1));
        let store = sample_store();
        assert!(storage.save(&store).is_err());
        assert!(storage.blob().is_none());
        assert!(storage.save(&store).is_ok());

        // The first load fails open
        assert!(storage.load().is_empty());
        assert_eq!(storage.load(), store);
    }
}
