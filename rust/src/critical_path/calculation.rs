//! Critical path calculation using forward and backward passes.

use crate::graph::TaskGraph;
use crate::interner::TaskId;
use crate::models::Time;

use super::types::{CriticalPathResult, TaskTiming};

/// Run the Critical Path Method over the whole graph.
///
/// `topo_order` must be a valid topological order of `graph` (see
/// [`crate::topology::topological_order`]). The graph is only read. Times
/// saturate at `Time::MAX` instead of wrapping; [`crate::scheduler::JobScheduler`]
/// rejects jobs whose total duration does not fit before getting here.
///
/// # Returns
/// * Timings per task, the minimum completion time and one critical path.
///   When several tasks finish last, the path ends at the smallest ID; when
///   several dependencies could precede a path task, the first one in declared
///   order is taken.
pub fn calculate_critical_path(graph: &TaskGraph, topo_order: &[TaskId]) -> CriticalPathResult {
    let n = graph.len();
    let mut timings = vec![TaskTiming::default(); n];

    // Forward pass
    for &task in topo_order {
        let idx = task as usize;
        let earliest_start = graph.deps[idx]
            .iter()
            .map(|&dep| timings[dep as usize].earliest_finish)
            .max()
            .unwrap_or(0);

        timings[idx].earliest_start = earliest_start;
        timings[idx].earliest_finish = earliest_start.saturating_add(graph.durations[idx]);
    }

    let completion_time = timings
        .iter()
        .map(|t| t.earliest_finish)
        .max()
        .unwrap_or(0);

    // Backward pass
    for &task in topo_order.iter().rev() {
        let idx = task as usize;
        let latest_finish = graph.dependents[idx]
            .iter()
            .map(|&d| timings[d as usize].latest_start)
            .min()
            .unwrap_or(completion_time);

        let timing = &mut timings[idx];
        timing.latest_finish = latest_finish;
        timing.latest_start = latest_finish.saturating_sub(graph.durations[idx]);
        timing.slack = timing.latest_start.saturating_sub(timing.earliest_start);
    }

    let critical_path = trace_critical_path(graph, &timings, completion_time);

    CriticalPathResult {
        timings,
        completion_time,
        critical_path,
    }
}

/// Walk backwards from the last-finishing task along tight dependencies.
fn trace_critical_path(graph: &TaskGraph, timings: &[TaskTiming], completion_time: Time) -> Vec<TaskId> {
    // ids() is ascending, so the first match is the smallest ID
    let Some(end) = graph
        .index
        .ids()
        .find(|&id| timings[id as usize].earliest_finish == completion_time)
    else {
        return Vec::new();
    };

    let mut path = vec![end];
    let mut current = end;

    // Each step moves to a strictly earlier finish time, so at most n steps.
    loop {
        let start = timings[current as usize].earliest_start;
        let next = graph.deps[current as usize]
            .iter()
            .copied()
            .find(|&dep| timings[dep as usize].earliest_finish == start);

        match next {
            Some(dep) => {
                path.push(dep);
                current = dep;
            }
            None => break,
        }
    }

    path.reverse();
    path
}
