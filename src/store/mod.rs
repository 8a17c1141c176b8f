pub mod commands;
pub mod notify;
pub mod validate;

use tracing::info;

use crate::extract::policy::FigureExtractionPolicy;
use crate::model::{DocumentId, Figure, FigureId, Project, Stage, Task, TaskId};
use crate::store::commands::{Command, apply};
use crate::store::notify::{Notice, Notifier};

/// Single-writer owner of the current project snapshot.
///
/// Views hold read-only references obtained from [`WorkflowStore::project`]
/// and dispatch [`Command`]s; each applied command swaps in a fresh
/// copy-on-write snapshot, so no view ever observes a half-applied mutation.
#[derive(Debug)]
pub struct WorkflowStore {
    project: Project,
}

impl WorkflowStore {
    pub fn new(project: Project) -> Self {
        WorkflowStore { project }
    }

    /// The current snapshot.
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Apply one command, replacing the snapshot. Returns the new snapshot.
    pub fn apply(&mut self, command: Command, notifier: &mut dyn Notifier) -> &Project {
        self.project = apply(&self.project, &command, notifier);
        &self.project
    }

    // Convenience wrappers mirroring the command set.

    pub fn move_task(&mut self, task: TaskId, stage: Stage, notifier: &mut dyn Notifier) {
        self.apply(Command::MoveTask { task, stage }, notifier);
    }

    pub fn delete_task(&mut self, task: TaskId, notifier: &mut dyn Notifier) {
        self.apply(Command::DeleteTask { task }, notifier);
    }

    pub fn delete_figure(&mut self, task: TaskId, figure: FigureId, notifier: &mut dyn Notifier) {
        self.apply(Command::DeleteFigure { task, figure }, notifier);
    }

    pub fn reorder_figures(&mut self, task: TaskId, order: Vec<Figure>, notifier: &mut dyn Notifier) {
        self.apply(Command::ReorderFigures { task, order }, notifier);
    }

    /// Synthesize a brand-new task from a source document via the injected
    /// extraction policy.
    ///
    /// Unknown document ids are a silent no-op returning `None`. On success
    /// the new task's id is returned and a success notice is raised.
    pub fn extract_figures(
        &mut self,
        document: &DocumentId,
        policy: &dyn FigureExtractionPolicy,
        notifier: &mut dyn Notifier,
    ) -> Option<TaskId> {
        let doc = self.project.document(document)?.clone();
        let plan = policy.plan(&doc);

        let mut task = Task::new(format!("Figures from {}", doc.name), plan.stage);
        for planned in plan.figures {
            task.figures.push(Figure {
                id: FigureId::generate(),
                title: planned.title,
                description: planned.description,
                image: planned.image,
                page_number: planned.page_number,
                document_id: Some(doc.id.clone()),
            });
        }

        let task_id = task.id.clone();
        let count = task.figures.len();
        self.apply(Command::AddTask { task }, notifier);

        if self.project.task(&task_id).is_some() {
            info!(document = %doc.id, task = %task_id, count, "figures extracted");
            notifier.notify(Notice::success(format!(
                "Extracted {count} figure(s) from {}",
                doc.name
            )));
            Some(task_id)
        } else {
            None
        }
    }
}
