//! Store mutation commands and their copy-on-write application.
//!
//! Each command is applied to an immutable project snapshot and yields a new
//! snapshot. Unknown ids are silent no-ops: the UI may retry or race its own
//! stale reads, and an idempotent no-op beats a hard failure there.

use std::collections::BTreeSet;

use tracing::debug;

use crate::model::{Document, DocumentId, Figure, FigureId, Project, Stage, Task, TaskId};
use crate::store::notify::{Notice, Notifier};

/// A single atomic mutation of the project aggregate.
#[derive(Debug, Clone)]
pub enum Command {
    MoveTask {
        task: TaskId,
        stage: Stage,
    },
    DeleteTask {
        task: TaskId,
    },
    DeleteFigure {
        task: TaskId,
        figure: FigureId,
    },
    /// Replace a task's figure sequence with a permutation of itself.
    ReorderFigures {
        task: TaskId,
        order: Vec<Figure>,
    },
    BulkMoveTasks {
        tasks: BTreeSet<TaskId>,
        stage: Stage,
    },
    BulkDeleteTasks {
        tasks: BTreeSet<TaskId>,
    },
    AddTask {
        task: Task,
    },
    AddDocuments {
        documents: Vec<Document>,
    },
    DeleteDocument {
        document: DocumentId,
    },
    UpdateTaskTitle {
        task: TaskId,
        title: String,
    },
    UpdateFigureText {
        task: TaskId,
        figure: FigureId,
        title: Option<String>,
        description: Option<String>,
    },
    UpdateDescription {
        text: String,
    },
    SetLinkedReport {
        report: Option<String>,
    },
}

/// Apply a command to a snapshot, producing the next snapshot.
///
/// Total over well-formed input: malformed requests (non-permutation reorder,
/// duplicate figure ids) raise an error notice and leave the snapshot
/// unchanged rather than panicking or returning an `Err`.
pub fn apply(project: &Project, command: &Command, notifier: &mut dyn Notifier) -> Project {
    let mut next = project.clone();

    match command {
        Command::MoveTask { task, stage } => {
            move_task(&mut next, task, *stage, notifier);
        }
        Command::DeleteTask { task } => {
            delete_task(&mut next, task, notifier);
        }
        Command::DeleteFigure { task, figure } => {
            let Some(t) = next.tasks.iter_mut().find(|t| &t.id == task) else {
                return next;
            };
            let before = t.figures.len();
            t.figures.retain(|f| &f.id != figure);
            if t.figures.len() < before {
                debug!(task = %task, figure = %figure, "figure deleted");
                notifier.notify(Notice::success("Figure deleted"));
            }
        }
        Command::ReorderFigures { task, order } => {
            let Some(t) = next.tasks.iter_mut().find(|t| &t.id == task) else {
                return next;
            };
            if !is_permutation(&t.figures, order) {
                notifier.notify(Notice::error(
                    "Reorder rejected: figure set does not match the task",
                ));
                return next;
            }
            t.figures = order.clone();
        }
        Command::BulkMoveTasks { tasks, stage } => {
            for task in tasks {
                // Skip-if-same lives in move_task: unchanged tasks emit no notice.
                move_task(&mut next, task, *stage, notifier);
            }
        }
        Command::BulkDeleteTasks { tasks } => {
            for task in tasks {
                delete_task(&mut next, task, notifier);
            }
        }
        Command::AddTask { task } => {
            if !task.figure_ids_unique() {
                notifier.notify(Notice::error("Task rejected: duplicate figure ids"));
                return next;
            }
            if next.task(&task.id).is_some() {
                notifier.notify(Notice::error("Task rejected: id already present"));
                return next;
            }
            debug!(task = %task.id, stage = %task.stage, figures = task.figures.len(), "task added");
            next.tasks.push(task.clone());
        }
        Command::AddDocuments { documents } => {
            debug!(count = documents.len(), "documents added");
            next.documents.extend(documents.iter().cloned());
        }
        Command::DeleteDocument { document } => {
            let before = next.documents.len();
            next.documents.retain(|d| &d.id != document);
            if next.documents.len() < before {
                notifier.notify(Notice::success("Document deleted"));
            }
        }
        Command::UpdateTaskTitle { task, title } => {
            if let Some(t) = next.tasks.iter_mut().find(|t| &t.id == task) {
                t.title = title.clone();
            }
        }
        Command::UpdateFigureText {
            task,
            figure,
            title,
            description,
        } => {
            if let Some(t) = next.tasks.iter_mut().find(|t| &t.id == task)
                && let Some(f) = t.figures.iter_mut().find(|f| &f.id == figure)
            {
                if let Some(title) = title {
                    f.title = title.clone();
                }
                if let Some(description) = description {
                    f.description = description.clone();
                }
            }
        }
        Command::UpdateDescription { text } => {
            next.description = text.clone();
        }
        Command::SetLinkedReport { report } => {
            next.linked_report_id = report.clone();
        }
    }

    debug_assert_eq!(next.integrity_violation(), None);
    next
}

/// Move one task, emitting a stage-change notice only on an actual change.
fn move_task(project: &mut Project, task: &TaskId, stage: Stage, notifier: &mut dyn Notifier) {
    let Some(t) = project.tasks.iter_mut().find(|t| &t.id == task) else {
        return;
    };
    if t.stage == stage {
        return;
    }
    debug!(task = %task, from = %t.stage, to = %stage, "task moved");
    t.stage = stage;
    notifier.notify(Notice::success(format!(
        "Task moved to {}",
        stage.display_name()
    )));
}

/// Delete one task, cascading to its figures (they have no other owner).
fn delete_task(project: &mut Project, task: &TaskId, notifier: &mut dyn Notifier) {
    let before = project.tasks.len();
    project.tasks.retain(|t| &t.id != task);
    if project.tasks.len() < before {
        debug!(task = %task, "task deleted");
        notifier.notify(Notice::success("Task deleted"));
    }
}

/// True when `order` holds exactly the same figure ids as `current`.
fn is_permutation(current: &[Figure], order: &[Figure]) -> bool {
    if current.len() != order.len() {
        return false;
    }
    let mut current_ids: Vec<&FigureId> = current.iter().map(|f| &f.id).collect();
    let mut order_ids: Vec<&FigureId> = order.iter().map(|f| &f.id).collect();
    current_ids.sort();
    order_ids.sort();
    if current_ids != order_ids {
        return false;
    }
    // Equal sorted sequences with a duplicate would mask an id collision.
    current_ids.windows(2).all(|w| w[0] != w[1])
}
