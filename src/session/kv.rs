//! Key-value backends for session persistence.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::WorkflowError;

/// Abstract key-value store the session is persisted through.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// In-memory store. Used by tests and by ephemeral workspaces.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// ファイルシステムベースのストア。`<dir>/<key>.json` に1キー1ファイルで格納する。
///
/// 書き込みはアトミック（一時ファイル + rename）。キーはファイル名に
/// 使われるため、英数字以外を含むキーは拒否する。
#[derive(Debug)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn key_path(&self, key: &str) -> crate::error::Result<PathBuf> {
        if key.is_empty() || !key.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(WorkflowError::session(format!(
                "invalid session key '{key}': expected non-empty alphanumeric string"
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for DirStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.key_path(key).ok()?;
        fs::read_to_string(path).ok()
    }

    fn set(&mut self, key: &str, value: String) {
        let Ok(path) = self.key_path(key) else {
            return;
        };
        if fs::create_dir_all(&self.dir).is_err() {
            return;
        }
        let tmp_path = path.with_extension("tmp");
        if fs::write(&tmp_path, value).is_ok() {
            let _ = fs::rename(&tmp_path, &path);
        }
    }

    fn remove(&mut self, key: &str) {
        if let Ok(path) = self.key_path(key) {
            let _ = fs::remove_file(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("projectData"), None);
        store.set("projectData", "{}".to_string());
        assert_eq!(store.get("projectData").as_deref(), Some("{}"));
        store.remove("projectData");
        assert_eq!(store.get("projectData"), None);
    }

    #[test]
    fn test_dir_store_rejects_non_alphanumeric_key() {
        let store = DirStore::new("/tmp/unused");
        assert!(store.key_path("../escape").is_err());
        assert!(store.key_path("").is_err());
        assert!(store.key_path("projectTasks").is_ok());
    }
}
