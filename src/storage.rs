use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::events::EventStore;

#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    JsonDecode(serde_json::Error),
    JsonEncode(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(err) => write!(f, "io error: {err}"),
            StorageError::JsonDecode(err) => write!(f, "failed to parse event store: {err}"),
            StorageError::JsonEncode(err) => write!(f, "failed to encode event store: {err}"),
        }
    }
}

impl std::error::Error for StorageError {}

pub fn load_events(path: &Path) -> Result<EventStore, StorageError> {
    let raw = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(EventStore::new()),
        Err(err) => return Err(StorageError::Io(err)),
    };

    if raw.trim().is_empty() {
        return Ok(EventStore::new());
    }

    serde_json::from_str(&raw).map_err(StorageError::JsonDecode)
}

// The store is always rewritten wholesale; there are no partial updates.
pub fn save_events(path: &Path, store: &EventStore) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(StorageError::Io)?;
        }
    }

    let encoded = serde_json::to_string_pretty(store).map_err(StorageError::JsonEncode)?;
    fs::write(path, encoded).map_err(StorageError::Io)
}
