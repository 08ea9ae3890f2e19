//! Discrete-event simulation of a job on a fixed pool of workers.
//!
//! Each task occupies one worker from start to finish with no preemption.
//! The clock jumps from one completion event to the next. Whenever workers
//! are free, ready tasks are started smallest ID first. This greedy rule is
//! deterministic and easy to test; it does not claim to minimise the
//! completion time.

use crate::graph::TaskGraph;
use crate::interner::TaskId;
use crate::models::Time;
use crate::{log_changes, log_checks, log_debug};

use super::core::SchedulerError;
use super::state::SimulationState;

/// Outcome of a simulation, still in interned IDs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationOutcome {
    pub start_times: Vec<Time>,
    pub finish_times: Vec<Time>,
    /// Final clock value, i.e. the last finish time.
    pub completion_time: Time,
    pub dispatch_order: Vec<TaskId>,
}

/// Simulate execution of `graph` with `workers` workers.
///
/// The graph must be acyclic. A task that never becomes ready is reported as
/// [`SchedulerError::FailedToSchedule`] instead of looping.
pub fn simulate(
    graph: &TaskGraph,
    workers: usize,
    verbosity: u8,
) -> Result<SimulationOutcome, SchedulerError> {
    if workers == 0 {
        return Err(SchedulerError::InvalidWorkerCount(0));
    }

    let mut state = SimulationState::new(graph);

    // Every pass through the loop completes at least one task, so n + 1
    // passes are enough for any schedulable graph.
    let max_events = graph.len() + 1;

    for _event in 0..max_events {
        // Dispatch
        while state.busy_workers() < workers {
            let Some(task) = state.ready.pop_first() else {
                break;
            };
            let finish = state
                .start(task, graph.duration(task))
                .ok_or(SchedulerError::TimeOverflow)?;
            log_changes!(
                verbosity,
                "t={}: started {} (finishes at {}, {}/{} workers busy)",
                state.clock,
                graph.name(task),
                finish,
                state.busy_workers(),
                workers
            );
        }

        if !state.ready.is_empty() {
            log_checks!(
                verbosity,
                "t={}: {} ready task(s) waiting for a worker",
                state.clock,
                state.ready.len()
            );
        }

        // Termination: nothing running means nothing can ever become ready.
        let Some(next_time) = state.next_event_time() else {
            break;
        };

        log_debug!(verbosity, "advancing clock {} -> {}", state.clock, next_time);
        state.clock = next_time;

        // Completion
        while let Some(task) = state.pop_finished_at(next_time) {
            let released = state.complete(task, graph);
            log_changes!(verbosity, "t={}: finished {}", next_time, graph.name(task));
            for dependent in released {
                log_checks!(
                    verbosity,
                    "t={}: {} is ready (all dependencies finished)",
                    next_time,
                    graph.name(dependent)
                );
            }
        }
    }

    let unstarted = state.unstarted();
    if !unstarted.is_empty() || state.busy_workers() > 0 {
        let mut stuck: Vec<String> = unstarted
            .into_iter()
            .chain(state.running.iter().map(|r| (r.0).1))
            .map(|id| graph.name(id).to_string())
            .collect();
        stuck.sort();
        return Err(SchedulerError::FailedToSchedule(stuck));
    }

    // Every task started and nothing is running, so every task finished.
    let start_times = state.start_times.into_iter().map(|t| t.unwrap_or(0)).collect();
    let finish_times = state.finish_times.into_iter().map(|t| t.unwrap_or(0)).collect();

    Ok(SimulationOutcome {
        start_times,
        finish_times,
        completion_time: state.clock,
        dispatch_order: state.dispatch_order,
    })
}
