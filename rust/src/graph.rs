//! Index-based, read-only view of a job's dependency graph.

use thiserror::Error;

use crate::interner::{TaskId, TaskIndex};
use crate::models::{Job, Time};

/// Structural problems found while building the graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("task '{task}' depends on undefined task '{dependency}'")]
    UnknownDependency { task: String, dependency: String },
}

/// Pre-computed task data shared by the orderer, the CPM engine and the simulator.
///
/// Built once per scheduling invocation and never mutated afterwards. All
/// lookups are direct vector indexing by [`TaskId`].
#[derive(Debug, Clone)]
pub struct TaskGraph {
    pub index: TaskIndex,
    pub durations: Vec<Time>,
    /// Dependencies of each task, in declared order.
    pub deps: Vec<Vec<TaskId>>,
    /// Tasks that depend on each task, ascending.
    pub dependents: Vec<Vec<TaskId>>,
}

impl TaskGraph {
    pub fn from_job(job: &Job) -> Result<Self, GraphError> {
        let index = TaskIndex::from_ids(job.tasks.keys().cloned());
        let n = index.len();

        let mut durations = vec![0; n];
        let mut deps: Vec<Vec<TaskId>> = vec![Vec::new(); n];
        let mut dependents: Vec<Vec<TaskId>> = vec![Vec::new(); n];

        for (task_id, task) in &job.tasks {
            let Some(id) = index.get_id(task_id) else {
                continue;
            };
            let idx = id as usize;
            durations[idx] = task.duration;

            for dep in &task.dependencies {
                let dep_id = index
                    .get_id(dep)
                    .ok_or_else(|| GraphError::UnknownDependency {
                        task: task_id.clone(),
                        dependency: dep.clone(),
                    })?;
                deps[idx].push(dep_id);
                dependents[dep_id as usize].push(id);
            }
        }

        // Tasks are visited in ascending ID order, so each dependents list is
        // already sorted.
        Ok(Self {
            index,
            durations,
            deps,
            dependents,
        })
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn name(&self, id: TaskId) -> &str {
        self.index.name(id)
    }

    pub fn duration(&self, id: TaskId) -> Time {
        self.durations[id as usize]
    }
}
