//! String key-value storage for persisted data
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub(crate) trait KeyValueStore: std::fmt::Debug {
    /// Return the value stored under `key`, or `None` if there is none
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// A store that keeps each key in a `{key}.json` file inside a directory.
/// The directory is created when the first value is written.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub(crate) fn new(dir: PathBuf) -> FileStore {
        FileStore { dir }
    }

    /// Return the default directory for data files, or `None` if the local
    /// data directory could not be determined
    pub(crate) fn default_dir() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("gridsnake"))
    }

    pub(crate) fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs_err::read_to_string(self.key_path(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::read(e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs_err::create_dir_all(&self.dir).map_err(StoreError::mkdir)?;
        fs_err::write(self.key_path(key), value).map_err(StoreError::write)?;
        Ok(())
    }
}

/// A store that forgets everything when the program exits
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct MemoryStore(HashMap<String, String>);

impl MemoryStore {
    pub(crate) fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.0.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.0.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[derive(Debug, Error)]
#[error("Key-value store operation failed")]
pub(crate) struct StoreError(#[source] StoreErrorSource);

impl StoreError {
    fn read(e: std::io::Error) -> Self {
        StoreError(StoreErrorSource::Read(e))
    }

    fn mkdir(e: std::io::Error) -> Self {
        StoreError(StoreErrorSource::Mkdir(e))
    }

    fn write(e: std::io::Error) -> Self {
        StoreError(StoreErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum StoreErrorSource {
    #[error("failed to read data file")]
    Read(#[source] std::io::Error),
    #[error("failed to create data directory")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to write data file")]
    Write(#[source] std::io::Error),
}
