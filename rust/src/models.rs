//! Core data types for the scheduling system.

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Abstract time unit used for durations, start and finish times.
pub type Time = u64;

/// Errors raised while constructing tasks and jobs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("task ID cannot be empty")]
    EmptyTaskId,
    #[error("task '{task}': duration must be positive, got {duration}")]
    NonPositiveDuration { task: String, duration: i64 },
    #[error("duplicate task ID: '{0}'")]
    DuplicateTask(String),
}

/// A single unit of work occupying one worker for its whole duration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub duration: Time,
    /// IDs of tasks that must finish before this one starts, in declared order.
    pub dependencies: Vec<String>,
}

impl Task {
    /// Create a task, rejecting an empty ID or a zero duration.
    pub fn new(
        id: impl Into<String>,
        duration: Time,
        dependencies: Vec<String>,
    ) -> Result<Self, ModelError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ModelError::EmptyTaskId);
        }
        if duration == 0 {
            return Err(ModelError::NonPositiveDuration {
                task: id,
                duration: 0,
            });
        }
        Ok(Self {
            id,
            duration,
            dependencies,
        })
    }

    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }

    pub fn depends_on(&self, task_id: &str) -> bool {
        self.dependencies.iter().any(|d| d == task_id)
    }
}

/// A named collection of tasks forming a dependency graph.
///
/// Tasks are kept in a `BTreeMap` so every traversal is in ascending ID order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Job {
    pub name: String,
    pub tasks: BTreeMap<String, Task>,
}

impl Job {
    /// Create an empty job. An empty name falls back to `"Job"`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let name = if name.trim().is_empty() {
            "Job".to_string()
        } else {
            name
        };
        Self {
            name,
            tasks: BTreeMap::new(),
        }
    }

    /// Insert a task. Duplicate IDs are rejected.
    pub fn add_task(&mut self, task: Task) -> Result<(), ModelError> {
        if self.tasks.contains_key(&task.id) {
            return Err(ModelError::DuplicateTask(task.id));
        }
        self.tasks.insert(task.id.clone(), task);
        Ok(())
    }

    /// Builder-style variant of [`Job::add_task`].
    pub fn with_task(mut self, task: Task) -> Result<Self, ModelError> {
        self.add_task(task)?;
        Ok(self)
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// All tasks in ascending ID order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// Tasks without dependencies, in ascending ID order.
    pub fn independent_tasks(&self) -> Vec<&Task> {
        self.tasks().filter(|t| !t.has_dependencies()).collect()
    }

    /// Sum of all task durations, saturating at `Time::MAX`.
    pub fn total_work(&self) -> Time {
        self.tasks().fold(0, |acc: Time, t| acc.saturating_add(t.duration))
    }

    /// Sum of all task durations, or `None` if it does not fit in [`Time`].
    ///
    /// No start or finish time can exceed this sum, so a job whose total
    /// fits can be scheduled without overflow.
    pub fn checked_total_work(&self) -> Option<Time> {
        self.tasks().try_fold(0, |acc: Time, t| acc.checked_add(t.duration))
    }
}

/// Which algorithm produced a schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleMode {
    /// Critical Path Method, enough workers for every task.
    Unconstrained,
    /// Discrete-event simulation with a limited worker pool.
    Constrained,
}

/// Computed timing for a single task.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TaskSchedule {
    pub task_id: String,
    pub start: Time,
    pub finish: Time,
    /// Total float; only known when the critical path method ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slack: Option<Time>,
}

impl TaskSchedule {
    pub fn duration(&self) -> Time {
        self.finish - self.start
    }
}

/// Full output of one scheduling invocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScheduleResult {
    pub job_name: String,
    pub workers: usize,
    pub mode: ScheduleMode,
    pub completion_time: Time,
    pub total_work: Time,
    /// Sorted by start time, ties by task ID.
    pub task_schedules: Vec<TaskSchedule>,
    /// Task IDs in the same order as `task_schedules`.
    pub execution_order: Vec<String>,
    /// Empty in constrained mode.
    pub critical_path: Vec<String>,
}

impl ScheduleResult {
    pub fn schedule_for(&self, task_id: &str) -> Option<&TaskSchedule> {
        self.task_schedules.iter().find(|s| s.task_id == task_id)
    }

    /// Fraction of worker capacity kept busy over the whole run.
    pub fn utilization(&self) -> f64 {
        if self.completion_time == 0 || self.workers == 0 {
            return 0.0;
        }
        self.total_work as f64 / (self.workers as f64 * self.completion_time as f64)
    }

    /// Sum of durations along the critical path.
    pub fn critical_path_length(&self) -> Time {
        self.critical_path
            .iter()
            .filter_map(|id| self.schedule_for(id))
            .map(TaskSchedule::duration)
            .sum()
    }
}

/// Order schedules by start time, ties broken by ascending ID.
pub(crate) fn sort_schedules(schedules: &mut [TaskSchedule]) {
    schedules.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then_with(|| a.task_id.cmp(&b.task_id))
    });
}
