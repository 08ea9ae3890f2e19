//! Critical Path Method for unconstrained parallelism.
//!
//! A forward pass computes earliest start/finish per task, a backward pass
//! computes latest start/finish and slack, and a backward trace from the
//! last-finishing task extracts one critical path.

mod calculation;
mod types;

pub use calculation::calculate_critical_path;
pub use types::{CriticalPathResult, TaskTiming};
