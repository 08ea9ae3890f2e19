//! Structural validation of a job before it is scheduled.
//!
//! This checks:
//! - the job has at least one task
//! - every task has a non-empty ID matching its key and a positive duration
//! - no task depends on itself, lists a dependency twice, or depends on an
//!   undefined task
//! - the total duration fits in [`Time`](crate::models::Time)
//! - the dependency graph has no cycles
//!
//! Tasks are checked in ascending ID order and the first problem is returned,
//! so the same job always produces the same error.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::graph::{GraphError, TaskGraph};
use crate::models::{Job, Time};
use crate::topology::{topological_order, CycleError};

/// Why a job cannot be scheduled.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("[job.tasks] job has no tasks")]
    EmptyJob,
    #[error("[job.tasks] task ID cannot be empty")]
    EmptyTaskId,
    #[error("[task.{key}.id] task is stored under '{key}' but has ID '{id}'")]
    KeyMismatch { key: String, id: String },
    #[error("[task.{task}.duration] duration must be positive, got {duration}")]
    NonPositiveDuration { task: String, duration: i64 },
    #[error("[task.{task}.dependencies] task '{task}' cannot depend on itself")]
    SelfDependency { task: String },
    #[error("[task.{task}.dependencies] task '{task}' lists dependency '{dependency}' more than once")]
    DuplicateDependency { task: String, dependency: String },
    #[error("[task.{task}.dependencies] task '{task}' depends on undefined task '{dependency}'")]
    UndefinedDependency { task: String, dependency: String },
    #[error("[job.tasks] total duration of all tasks exceeds {}", Time::MAX)]
    DurationOverflow,
    #[error(transparent)]
    Cycle(#[from] CycleError),
}

impl ValidationError {
    /// Dotted path of the offending field, or `None` for a cycle.
    pub fn field(&self) -> Option<String> {
        match self {
            Self::EmptyJob | Self::EmptyTaskId | Self::DurationOverflow => {
                Some("job.tasks".to_string())
            }
            Self::KeyMismatch { key, .. } => Some(format!("task.{key}.id")),
            Self::NonPositiveDuration { task, .. } => Some(format!("task.{task}.duration")),
            Self::SelfDependency { task }
            | Self::DuplicateDependency { task, .. }
            | Self::UndefinedDependency { task, .. } => Some(format!("task.{task}.dependencies")),
            Self::Cycle(_) => None,
        }
    }

    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::Cycle(_))
    }
}

/// Run every check against `job`, returning the first failure.
pub fn validate_job(job: &Job) -> Result<(), ValidationError> {
    if job.is_empty() {
        return Err(ValidationError::EmptyJob);
    }

    for (key, task) in &job.tasks {
        if key.is_empty() || task.id.is_empty() {
            return Err(ValidationError::EmptyTaskId);
        }
        if task.duration == 0 {
            return Err(ValidationError::NonPositiveDuration {
                task: key.clone(),
                duration: 0,
            });
        }
        if *key != task.id {
            return Err(ValidationError::KeyMismatch {
                key: key.clone(),
                id: task.id.clone(),
            });
        }

        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for dep in &task.dependencies {
            if dep == key {
                return Err(ValidationError::SelfDependency { task: key.clone() });
            }
            if !seen.insert(dep.as_str()) {
                return Err(ValidationError::DuplicateDependency {
                    task: key.clone(),
                    dependency: dep.clone(),
                });
            }
            if !job.tasks.contains_key(dep) {
                return Err(ValidationError::UndefinedDependency {
                    task: key.clone(),
                    dependency: dep.clone(),
                });
            }
        }
    }

    if job.checked_total_work().is_none() {
        return Err(ValidationError::DurationOverflow);
    }

    validate_dag(job)
}

fn validate_dag(job: &Job) -> Result<(), ValidationError> {
    let graph = TaskGraph::from_job(job).map_err(|e| match e {
        GraphError::UnknownDependency { task, dependency } => {
            ValidationError::UndefinedDependency { task, dependency }
        }
    })?;
    topological_order(&graph)?;
    Ok(())
}
