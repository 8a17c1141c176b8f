//! Multi-item selection across the kanban, list, and tree views.
//!
//! Two granularities are tracked in one state object: whole tasks and
//! individual (task, figure) pairs. Selection is ephemeral view state and is
//! cleared whenever the view mode changes, since hit-test geometry differs
//! between views.

use std::collections::BTreeSet;

use tracing::debug;

use crate::geometry::{Rect, rects_intersect};
use crate::model::{FigureId, TaskId};

/// The view currently presenting the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Kanban,
    List,
    Tree,
}

/// A selectable element as laid out by the active view.
#[derive(Debug, Clone)]
pub struct HitTarget {
    pub rect: Rect,
    pub target: SelectTarget,
}

#[derive(Debug, Clone)]
pub enum SelectTarget {
    Task(TaskId),
    Figure(TaskId, FigureId),
}

/// Current selection: task ids plus (task, figure) pairs.
#[derive(Debug, Default)]
pub struct Selection {
    tasks: BTreeSet<TaskId>,
    figures: BTreeSet<(TaskId, FigureId)>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &BTreeSet<TaskId> {
        &self.tasks
    }

    pub fn figures(&self) -> &BTreeSet<(TaskId, FigureId)> {
        &self.figures
    }

    /// Total selected item count. The bulk-action toolbar is visible iff
    /// this is non-zero.
    pub fn count(&self) -> usize {
        self.tasks.len() + self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.figures.is_empty()
    }

    /// Flip a task's membership. Figure selection is untouched.
    pub fn toggle_task(&mut self, task: TaskId) {
        if !self.tasks.remove(&task) {
            self.tasks.insert(task);
        }
    }

    /// Flip a (task, figure) pair's membership.
    pub fn toggle_figure(&mut self, task: TaskId, figure: FigureId) {
        let key = (task, figure);
        if !self.figures.remove(&key) {
            self.figures.insert(key);
        }
    }

    /// Recompute the whole selection from a drag box.
    ///
    /// Replace semantics, not additive: a fresh drag always starts a new
    /// selection. Elements whose rect merely touches the box edge are not
    /// selected (strict-inequality intersection).
    pub fn drag_select(&mut self, elements: &[HitTarget], drag_box: &Rect) {
        self.tasks.clear();
        self.figures.clear();

        for element in elements {
            if !rects_intersect(&element.rect, drag_box) {
                continue;
            }
            match &element.target {
                SelectTarget::Task(task) => {
                    self.tasks.insert(task.clone());
                }
                SelectTarget::Figure(task, figure) => {
                    self.figures.insert((task.clone(), figure.clone()));
                }
            }
        }

        debug!(tasks = self.tasks.len(), figures = self.figures.len(), "drag select");
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
        self.figures.clear();
    }
}

/// Selection scoped to a view mode: switching views clears it.
#[derive(Debug)]
pub struct ViewSelection {
    view: ViewMode,
    pub selection: Selection,
}

impl ViewSelection {
    pub fn new(view: ViewMode) -> Self {
        ViewSelection {
            view,
            selection: Selection::new(),
        }
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    /// Switch the active view. Selections are not meaningful across views
    /// with different hit-test geometry, so any change clears them.
    pub fn set_view(&mut self, view: ViewMode) {
        if self.view != view {
            debug!(?view, "view mode changed, selection cleared");
            self.view = view;
            self.selection.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn task_target(id: &str, rect: Rect) -> HitTarget {
        HitTarget {
            rect,
            target: SelectTarget::Task(TaskId::from(id)),
        }
    }

    #[test]
    fn test_toggle_task_flips_membership() {
        let mut sel = Selection::new();
        sel.toggle_task(TaskId::from("t1"));
        assert_eq!(sel.count(), 1);
        sel.toggle_task(TaskId::from("t1"));
        assert!(sel.is_empty());
    }

    #[test]
    fn test_drag_select_boundary_exclusive() {
        let elements = vec![
            task_target("a", Rect::new(0.0, 0.0, 10.0, 10.0)),
            task_target("b", Rect::new(20.0, 20.0, 10.0, 10.0)),
        ];
        let mut sel = Selection::new();
        sel.drag_select(&elements, &Rect::new(0.0, 0.0, 15.0, 15.0));

        assert!(sel.tasks().contains(&TaskId::from("a")));
        assert!(!sel.tasks().contains(&TaskId::from("b")));
        assert_eq!(sel.count(), 1);
    }

    #[test]
    fn test_drag_select_replaces_previous_selection() {
        let elements = vec![
            task_target("a", Rect::new(0.0, 0.0, 10.0, 10.0)),
            task_target("b", Rect::new(100.0, 100.0, 10.0, 10.0)),
        ];
        let mut sel = Selection::new();
        sel.drag_select(&elements, &Rect::new(0.0, 0.0, 15.0, 15.0));
        assert!(sel.tasks().contains(&TaskId::from("a")));

        sel.drag_select(&elements, &Rect::new(95.0, 95.0, 20.0, 20.0));
        assert!(!sel.tasks().contains(&TaskId::from("a")), "drag replaces, never unions");
        assert!(sel.tasks().contains(&TaskId::from("b")));
    }

    #[test]
    fn test_view_change_clears_selection() {
        let mut view_sel = ViewSelection::new(ViewMode::Tree);
        view_sel.selection.toggle_task(TaskId::from("a"));
        view_sel.set_view(ViewMode::Kanban);
        assert!(view_sel.selection.is_empty());
    }

    #[test]
    fn test_same_view_keeps_selection() {
        let mut view_sel = ViewSelection::new(ViewMode::List);
        view_sel.selection.toggle_task(TaskId::from("a"));
        view_sel.set_view(ViewMode::List);
        assert_eq!(view_sel.selection.count(), 1);
    }
}
