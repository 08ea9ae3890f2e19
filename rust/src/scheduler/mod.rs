//! Job scheduling with a fixed number of workers.
//!
//! With at least one worker per task the critical path method gives the
//! minimum completion time directly. With fewer workers a discrete-event
//! simulation assigns ready tasks to free workers as time advances. Both
//! paths produce the same [`ScheduleResult`](crate::models::ScheduleResult).

mod core;
mod simulation;
mod state;

pub use self::core::{schedule, schedule_with_config, JobScheduler, SchedulerError};
pub use simulation::{simulate, SimulationOutcome};
pub use state::SimulationState;
