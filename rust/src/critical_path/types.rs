//! Types for critical path calculation.

use crate::interner::TaskId;
use crate::models::Time;

/// Per-task timing information for critical path calculation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskTiming {
    /// Earliest possible start time (from forward pass).
    pub earliest_start: Time,
    /// Earliest possible finish time (from forward pass).
    pub earliest_finish: Time,
    /// Latest allowable start time (from backward pass).
    pub latest_start: Time,
    /// Latest allowable finish time (from backward pass).
    pub latest_finish: Time,
    /// Slack = latest_start - earliest_start.
    pub slack: Time,
}

impl TaskTiming {
    pub fn is_critical(&self) -> bool {
        self.slack == 0
    }
}

/// Result of the forward/backward pass over a whole job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CriticalPathResult {
    /// Timing for each task, indexed by [`TaskId`].
    pub timings: Vec<TaskTiming>,
    /// Minimum completion time (makespan) with unlimited workers.
    pub completion_time: Time,
    /// Critical path from a task without dependencies to the last-finishing task.
    pub critical_path: Vec<TaskId>,
}

impl CriticalPathResult {
    pub fn timing(&self, id: TaskId) -> &TaskTiming {
        &self.timings[id as usize]
    }
}
