//! Session persistence boundary.
//!
//! The engine persists its state through an abstract key-value store (the
//! browser session storage in the reference deployment). A missing or
//! corrupt key is never an error: that portion of the state falls back to
//! its default so a stale or damaged session degrades instead of failing.

pub mod kv;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::{Document, Task};
use crate::session::kv::KeyValueStore;

/// 永続化キー。参照実装のsession storageキー名と一致させている。
pub mod keys {
    pub const UPLOADED_DOCUMENTS: &str = "uploadedDocuments";
    pub const PROJECT_DATA: &str = "projectData";
    pub const SELECTED_LABELS: &str = "selectedLabels";
    pub const PROJECT_TASKS: &str = "projectTasks";
}

/// Name/description pair persisted under `projectData`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Everything the workspace persists between page loads.
#[derive(Debug, Default)]
pub struct SessionSnapshot {
    pub documents: Vec<Document>,
    pub project: ProjectMeta,
    pub selected_labels: Vec<String>,
    pub tasks: Vec<Task>,
}

impl SessionSnapshot {
    /// Load the session from the store.
    ///
    /// Each key is decoded independently; a missing or undecodable key
    /// yields that field's default and a warning, never an error.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        SessionSnapshot {
            documents: load_key(store, keys::UPLOADED_DOCUMENTS),
            project: load_key(store, keys::PROJECT_DATA),
            selected_labels: load_key(store, keys::SELECTED_LABELS),
            tasks: load_key(store, keys::PROJECT_TASKS),
        }
    }

    /// Serialize every portion of the session into the store.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> crate::error::Result<()> {
        store.set(keys::UPLOADED_DOCUMENTS, serde_json::to_string(&self.documents)?);
        store.set(keys::PROJECT_DATA, serde_json::to_string(&self.project)?);
        store.set(keys::SELECTED_LABELS, serde_json::to_string(&self.selected_labels)?);
        store.set(keys::PROJECT_TASKS, serde_json::to_string(&self.tasks)?);
        Ok(())
    }
}

fn load_key<T: Default + for<'de> Deserialize<'de>>(store: &dyn KeyValueStore, key: &str) -> T {
    let Some(raw) = store.get(key) else {
        return T::default();
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "corrupt session key, falling back to default");
            T::default()
        }
    }
}
