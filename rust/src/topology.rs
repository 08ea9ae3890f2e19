//! Deterministic topological ordering (Kahn's algorithm).

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use thiserror::Error;

use crate::graph::TaskGraph;
use crate::interner::TaskId;

/// The dependency graph contains a cycle, so no valid order exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("dependency graph contains a cycle, job cannot be scheduled (unordered tasks: {})", .remaining.join(", "))]
pub struct CycleError {
    /// Tasks that could not be ordered, ascending. Every cycle lies within
    /// this set, along with anything downstream of one.
    pub remaining: Vec<String>,
}

/// Order tasks so that every dependency precedes its dependents.
///
/// Whenever several tasks are eligible, the lexicographically smallest ID is
/// taken first, so identical input always yields the identical order. Runs in
/// O((V + E) log V) and always terminates; a cycle shows up as tasks whose
/// in-degree never reaches zero.
pub fn topological_order(graph: &TaskGraph) -> Result<Vec<TaskId>, CycleError> {
    let n = graph.len();

    let mut in_degree: Vec<usize> = graph.deps.iter().map(Vec::len).collect();

    // Min-heap on TaskId == min-heap on lexicographic ID.
    let mut frontier: BinaryHeap<Reverse<TaskId>> = graph
        .index
        .ids()
        .filter(|&id| in_degree[id as usize] == 0)
        .map(Reverse)
        .collect();

    let mut order: Vec<TaskId> = Vec::with_capacity(n);

    while let Some(Reverse(task)) = frontier.pop() {
        order.push(task);

        for &dependent in &graph.dependents[task as usize] {
            let degree = &mut in_degree[dependent as usize];
            *degree -= 1;
            if *degree == 0 {
                frontier.push(Reverse(dependent));
            }
        }
    }

    if order.len() != n {
        let remaining = graph
            .index
            .ids()
            .filter(|&id| in_degree[id as usize] > 0)
            .map(|id| graph.name(id).to_string())
            .collect();
        return Err(CycleError { remaining });
    }

    Ok(order)
}

/// Same as [`topological_order`], resolved to task ID strings.
pub fn topological_order_names(graph: &TaskGraph) -> Result<Vec<String>, CycleError> {
    Ok(topological_order(graph)?
        .into_iter()
        .map(|id| graph.name(id).to_string())
        .collect())
}
