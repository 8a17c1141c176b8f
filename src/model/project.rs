//! The project aggregate: root owner of all documents and tasks for a session.

use serde::{Deserialize, Serialize};

use crate::model::ids::{DocumentId, FigureId, TaskId, fresh_id};
use crate::model::types::{Document, Figure, Task};

/// Singleton aggregate owning the documents and tasks of the current session.
///
/// Mutation never happens in place: the store applies a command to the
/// current snapshot and swaps in the new one, so every view reads a
/// consistent project and no view holds an aliased mutable reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub linked_report_id: Option<String>,
}

impl Project {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Project {
            id: fresh_id("proj"),
            name: name.into(),
            description: description.into(),
            documents: Vec::new(),
            tasks: Vec::new(),
            linked_report_id: None,
        }
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn document(&self, id: &DocumentId) -> Option<&Document> {
        self.documents.iter().find(|d| &d.id == id)
    }

    /// Look up a figure together with its owning task.
    pub fn figure(&self, task_id: &TaskId, figure_id: &FigureId) -> Option<(&Task, &Figure)> {
        let task = self.task(task_id)?;
        let figure = task.figures.iter().find(|f| &f.id == figure_id)?;
        Some((task, figure))
    }

    /// Check the aggregate's structural invariants.
    ///
    /// Returns the first violation found, or `None` when the project is
    /// well-formed. Called defensively by the store after each command in
    /// debug builds.
    pub fn integrity_violation(&self) -> Option<String> {
        let mut task_ids = std::collections::BTreeSet::new();
        let mut figure_ids = std::collections::BTreeSet::new();

        for task in &self.tasks {
            if !task_ids.insert(&task.id) {
                return Some(format!("duplicate task id {}", task.id));
            }
            for figure in &task.figures {
                if !figure_ids.insert(&figure.id) {
                    return Some(format!(
                        "figure {} appears in more than one place",
                        figure.id
                    ));
                }
            }
        }

        let mut doc_ids = std::collections::BTreeSet::new();
        for doc in &self.documents {
            if !doc_ids.insert(&doc.id) {
                return Some(format!("duplicate document id {}", doc.id));
            }
        }

        None
    }
}
