//! Mutable state of the worker-constrained simulation.

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap};

use crate::graph::TaskGraph;
use crate::interner::TaskId;
use crate::models::Time;

/// Snapshot of one simulation run.
///
/// Owned by a single simulation and dropped when it returns.
#[derive(Clone, Debug)]
pub struct SimulationState {
    /// Current simulated time.
    pub clock: Time,
    /// Tasks whose dependencies have all finished but that have not started.
    /// Ordered by TaskId, i.e. lexicographically.
    pub ready: BTreeSet<TaskId>,
    /// Occupied workers as (scheduled finish, task), earliest finish on top.
    pub running: BinaryHeap<Reverse<(Time, TaskId)>>,
    /// Dependencies not yet finished, per task.
    pub remaining_deps: Vec<usize>,
    pub start_times: Vec<Option<Time>>,
    pub finish_times: Vec<Option<Time>>,
    /// Task IDs in the order they were started.
    pub dispatch_order: Vec<TaskId>,
}

impl SimulationState {
    /// Seed the state with every task that has no dependencies.
    pub fn new(graph: &TaskGraph) -> Self {
        let n = graph.len();
        let remaining_deps: Vec<usize> = graph.deps.iter().map(Vec::len).collect();
        let ready = graph
            .index
            .ids()
            .filter(|&id| remaining_deps[id as usize] == 0)
            .collect();

        Self {
            clock: 0,
            ready,
            running: BinaryHeap::with_capacity(n),
            remaining_deps,
            start_times: vec![None; n],
            finish_times: vec![None; n],
            dispatch_order: Vec::with_capacity(n),
        }
    }

    pub fn busy_workers(&self) -> usize {
        self.running.len()
    }

    /// Start a task on a free worker at the current clock value.
    ///
    /// Returns the finish time, or `None` (leaving the state untouched) if it
    /// would overflow [`Time`].
    pub fn start(&mut self, task: TaskId, duration: Time) -> Option<Time> {
        let finish = self.clock.checked_add(duration)?;
        self.start_times[task as usize] = Some(self.clock);
        self.running.push(Reverse((finish, task)));
        self.dispatch_order.push(task);
        Some(finish)
    }

    /// Time of the next completion event, if any task is running.
    pub fn next_event_time(&self) -> Option<Time> {
        self.running.peek().map(|Reverse((finish, _))| *finish)
    }

    /// Remove and return the next running task if it finishes exactly at `time`.
    pub fn pop_finished_at(&mut self, time: Time) -> Option<TaskId> {
        match self.running.peek() {
            Some(&Reverse((finish, task))) if finish == time => {
                self.running.pop();
                Some(task)
            }
            _ => None,
        }
    }

    /// Record a completion and release dependents whose last dependency this was.
    ///
    /// Returns the newly ready tasks.
    pub fn complete(&mut self, task: TaskId, graph: &TaskGraph) -> Vec<TaskId> {
        self.finish_times[task as usize] = Some(self.clock);

        let mut released = Vec::new();
        for &dependent in &graph.dependents[task as usize] {
            let remaining = &mut self.remaining_deps[dependent as usize];
            *remaining -= 1;
            if *remaining == 0 {
                self.ready.insert(dependent);
                released.push(dependent);
            }
        }
        released
    }

    /// Tasks that never started, ascending.
    pub fn unstarted(&self) -> Vec<TaskId> {
        self.start_times
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_none())
            .map(|(i, _)| i as TaskId)
            .collect()
    }
}
