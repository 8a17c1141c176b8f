//! Read-only report projection: tasks grouped by stage with stable
//! navigation anchors.

use crate::model::{Figure, FigureId, Project, Stage, Task, TaskId};

/// Tasks of one stage, in their original relative order.
#[derive(Debug)]
pub struct StageGroup<'a> {
    pub stage: Stage,
    pub tasks: Vec<&'a Task>,
}

/// Group tasks by stage in pipeline order.
///
/// Grouping is stable: within a group, tasks keep the relative order they
/// have in the project. Stages with no tasks are absent from the result.
pub fn group_by_stage(tasks: &[Task]) -> Vec<StageGroup<'_>> {
    Stage::ALL
        .iter()
        .filter_map(|&stage| {
            let tasks: Vec<&Task> = tasks.iter().filter(|t| t.stage == stage).collect();
            if tasks.is_empty() {
                None
            } else {
                Some(StageGroup { stage, tasks })
            }
        })
        .collect()
}

/// Anchor id of a rendered task element.
pub fn task_anchor(id: &TaskId) -> String {
    format!("task-{id}")
}

/// Anchor id of a rendered figure element.
pub fn figure_anchor(id: &FigureId) -> String {
    format!("figure-{id}")
}

/// The element a navigation anchor points at.
#[derive(Debug)]
pub enum AnchorTarget<'a> {
    Task(&'a Task),
    Figure(&'a Task, &'a Figure),
}

/// Resolve an anchor id back to the single element it names.
///
/// Supports the sidebar scroll-to-target pattern: every rendered task and
/// figure has exactly one anchor, so resolution is deterministic.
pub fn resolve_anchor<'a>(project: &'a Project, anchor: &str) -> Option<AnchorTarget<'a>> {
    if let Some(id) = anchor.strip_prefix("task-") {
        let task = project.tasks.iter().find(|t| t.id.as_str() == id)?;
        return Some(AnchorTarget::Task(task));
    }
    if let Some(id) = anchor.strip_prefix("figure-") {
        for task in &project.tasks {
            if let Some(figure) = task.figures.iter().find(|f| f.id.as_str() == id) {
                return Some(AnchorTarget::Figure(task, figure));
            }
        }
    }
    None
}

/// Render the project as a plain-text report, grouped by stage.
pub fn render_text(project: &Project) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n", project.name));
    if !project.description.is_empty() {
        out.push_str(&format!("{}\n", project.description));
    }

    for group in group_by_stage(&project.tasks) {
        out.push_str(&format!("\n## {}\n", group.stage.display_name()));
        for task in group.tasks {
            out.push_str(&format!("- [{}] {}\n", task_anchor(&task.id), task.title));
            for figure in &task.figures {
                out.push_str(&format!(
                    "    - [{}] {}\n",
                    figure_anchor(&figure.id),
                    figure.title
                ));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Task;

    #[test]
    fn test_group_by_stage_omits_empty_stages() {
        let tasks = vec![Task::new("a", Stage::Dev), Task::new("b", Stage::Dev)];
        let groups = group_by_stage(&tasks);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].stage, Stage::Dev);
        assert_eq!(groups[0].tasks.len(), 2);
    }

    #[test]
    fn test_group_by_stage_preserves_relative_order() {
        let tasks = vec![
            Task::new("first", Stage::Design),
            Task::new("other", Stage::Testing),
            Task::new("second", Stage::Design),
        ];
        let groups = group_by_stage(&tasks);
        assert_eq!(groups[0].tasks[0].title, "first");
        assert_eq!(groups[0].tasks[1].title, "second");
    }

    #[test]
    fn test_anchor_formats() {
        assert_eq!(task_anchor(&TaskId::from("t1")), "task-t1");
        assert_eq!(figure_anchor(&FigureId::from("f1")), "figure-f1");
    }
}
