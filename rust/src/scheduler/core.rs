//! Scheduler front door: validates inputs, picks a mode, assembles the result.

use thiserror::Error;

use crate::config::{SchedulingConfig, Strategy};
use crate::critical_path::calculate_critical_path;
use crate::graph::{GraphError, TaskGraph};
use crate::interner::TaskId;
use crate::models::{sort_schedules, Job, ScheduleMode, ScheduleResult, TaskSchedule, Time};
use crate::topology::{topological_order, CycleError};
use crate::log_checks;

use super::simulation::simulate;

/// Errors that can occur during scheduling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("workers must be positive, got {0}")]
    InvalidWorkerCount(usize),
    #[error(transparent)]
    Cycle(#[from] CycleError),
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("failed to schedule tasks: {}", .0.join(", "))]
    FailedToSchedule(Vec<String>),
    #[error("total task duration exceeds the representable time range ({})", Time::MAX)]
    TimeOverflow,
}

/// Computes a schedule for one job and worker count.
///
/// Construction does all the checks that need no scheduling work (worker
/// count, dependency resolution, total duration within [`Time`]);
/// [`JobScheduler::schedule`] then orders the tasks and runs either the
/// critical path method or the simulation.
pub struct JobScheduler<'a> {
    job: &'a Job,
    graph: TaskGraph,
    workers: usize,
    config: SchedulingConfig,
}

impl<'a> JobScheduler<'a> {
    pub fn new(job: &'a Job, workers: usize, config: SchedulingConfig) -> Result<Self, SchedulerError> {
        if workers == 0 {
            return Err(SchedulerError::InvalidWorkerCount(workers));
        }
        let graph = TaskGraph::from_job(job)?;
        if job.checked_total_work().is_none() {
            return Err(SchedulerError::TimeOverflow);
        }
        Ok(Self {
            job,
            graph,
            workers,
            config,
        })
    }

    /// The mode [`JobScheduler::schedule`] will run.
    pub fn mode(&self) -> ScheduleMode {
        match self.config.strategy {
            Strategy::Auto if self.workers >= self.graph.len() => ScheduleMode::Unconstrained,
            _ => ScheduleMode::Constrained,
        }
    }

    /// Run the scheduling algorithm. Calling it again returns an identical result.
    pub fn schedule(&self) -> Result<ScheduleResult, SchedulerError> {
        let order = topological_order(&self.graph)?;
        let mode = self.mode();

        tracing::debug!(
            job = %self.job.name,
            tasks = self.graph.len(),
            workers = self.workers,
            strategy = %self.config.strategy,
            ?mode,
            "scheduling job"
        );
        log_checks!(
            self.config.verbosity,
            "{} task(s), {} worker(s): using {:?} mode",
            self.graph.len(),
            self.workers,
            mode
        );

        match mode {
            ScheduleMode::Unconstrained => Ok(self.schedule_unconstrained(&order)),
            ScheduleMode::Constrained => self.schedule_constrained(),
        }
    }

    fn schedule_unconstrained(&self, order: &[TaskId]) -> ScheduleResult {
        let cpm = calculate_critical_path(&self.graph, order);

        let schedules = self
            .graph
            .index
            .ids()
            .map(|id| {
                let timing = cpm.timing(id);
                TaskSchedule {
                    task_id: self.graph.name(id).to_string(),
                    start: timing.earliest_start,
                    finish: timing.earliest_finish,
                    slack: Some(timing.slack),
                }
            })
            .collect();

        let critical_path = cpm
            .critical_path
            .iter()
            .map(|&id| self.graph.name(id).to_string())
            .collect();

        self.assemble(ScheduleMode::Unconstrained, cpm.completion_time, schedules, critical_path)
    }

    fn schedule_constrained(&self) -> Result<ScheduleResult, SchedulerError> {
        let outcome = simulate(&self.graph, self.workers, self.config.verbosity)?;

        let schedules = self
            .graph
            .index
            .ids()
            .map(|id| TaskSchedule {
                task_id: self.graph.name(id).to_string(),
                start: outcome.start_times[id as usize],
                finish: outcome.finish_times[id as usize],
                slack: None,
            })
            .collect();

        // A critical path is not well defined once workers delay tasks.
        Ok(self.assemble(ScheduleMode::Constrained, outcome.completion_time, schedules, Vec::new()))
    }

    fn assemble(
        &self,
        mode: ScheduleMode,
        completion_time: Time,
        mut task_schedules: Vec<TaskSchedule>,
        critical_path: Vec<String>,
    ) -> ScheduleResult {
        sort_schedules(&mut task_schedules);
        let execution_order = task_schedules.iter().map(|s| s.task_id.clone()).collect();

        ScheduleResult {
            job_name: self.job.name.clone(),
            workers: self.workers,
            mode,
            completion_time,
            total_work: self.job.total_work(),
            task_schedules,
            execution_order,
            critical_path,
        }
    }
}

/// Schedule `job` on `workers` workers with the default configuration.
pub fn schedule(job: &Job, workers: usize) -> Result<ScheduleResult, SchedulerError> {
    schedule_with_config(job, workers, SchedulingConfig::default())
}

/// Schedule `job` on `workers` workers.
pub fn schedule_with_config(
    job: &Job,
    workers: usize,
    config: SchedulingConfig,
) -> Result<ScheduleResult, SchedulerError> {
    JobScheduler::new(job, workers, config)?.schedule()
}
