//! Phase and project models.
//!
//! A project is an ordered list of phases; a phase is an ordered list of
//! tasks. Phases own their tasks by value, so reusing one phase template
//! in several projects never aliases task data between them.

use serde::{Deserialize, Serialize};

use super::{Tag, Task, TaskDependency};

/// An ordered group of tasks within a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    /// Phase identifier.
    pub id: u32,
    /// Tasks in listed order.
    pub tasks: Vec<Task>,
    /// Dependencies declared between tasks of this phase.
    ///
    /// Resolved by the graph builder but only active when
    /// `SchedulerConfig::honor_declared_dependencies` is set.
    #[serde(default)]
    pub dependencies: Vec<TaskDependency>,
}

impl Phase {
    /// Creates an empty phase.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            tasks: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Appends a task.
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Appends several tasks.
    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = Task>) -> Self {
        self.tasks.extend(tasks);
        self
    }

    /// Declares a dependency between two tasks of this phase.
    pub fn with_dependency(mut self, dependency: TaskDependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Number of tasks.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Position of the first task with the given id.
    pub fn position_of(&self, task_id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }
}

/// An ordered sequence of phases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Project identifier.
    pub id: u32,
    /// Phases in execution order.
    pub phases: Vec<Phase>,
    /// Direct project tags. Carried for catalog completeness; scheduling
    /// ignores them.
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Project {
    /// Creates a project with no phases.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            phases: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Appends a phase.
    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phases.push(phase);
        self
    }

    /// Adds a project tag.
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Total number of tasks across all phases.
    pub fn task_count(&self) -> usize {
        self.phases.iter().map(Phase::task_count).sum()
    }

    /// All tasks in phase order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.phases.iter().flat_map(|p| p.tasks.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str) -> Task {
        Task::new(id, Tag::WebDeveloper)
    }

    #[test]
    fn test_phase_builder() {
        let phase = Phase::new(1)
            .with_task(task("A"))
            .with_tasks([task("B"), task("C")])
            .with_dependency(TaskDependency::new("C", "A"));

        assert_eq!(phase.task_count(), 3);
        assert_eq!(phase.position_of("B"), Some(1));
        assert_eq!(phase.position_of("Z"), None);
        assert_eq!(phase.dependencies.len(), 1);
    }

    #[test]
    fn test_project_tasks_in_phase_order() {
        let project = Project::new(7)
            .with_phase(Phase::new(1).with_tasks([task("A"), task("B")]))
            .with_phase(Phase::new(2).with_task(task("C")))
            .with_tag(Tag::WebDesigner);

        assert_eq!(project.task_count(), 3);
        let ids: Vec<&str> = project.tasks().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert_eq!(project.tags, vec![Tag::WebDesigner]);
    }

    #[test]
    fn test_phase_reuse_is_independent() {
        let template = Phase::new(1).with_task(task("A"));
        let mut p1 = Project::new(1).with_phase(template.clone());
        let p2 = Project::new(2).with_phase(template);

        p1.phases[0].tasks[0].fixed_hour_price = 99.0;
        assert_eq!(p2.phases[0].tasks[0].fixed_hour_price, 0.0);
    }
}
