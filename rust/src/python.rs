//! Python bindings, built with the `python` feature.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::{SchedulingConfig, Strategy};
use crate::models::{Job, ScheduleMode, ScheduleResult, Task, TaskSchedule};
use crate::scheduler::schedule_with_config;
use crate::validation::validate_job;

/// Start and finish of one task (PyO3 wrapper).
#[pyclass(name = "TaskSchedule", frozen)]
#[derive(Clone, Debug)]
pub struct PyTaskSchedule {
    #[pyo3(get)]
    pub task_id: String,
    #[pyo3(get)]
    pub start: u64,
    #[pyo3(get)]
    pub finish: u64,
    #[pyo3(get)]
    pub slack: Option<u64>,
}

#[pymethods]
impl PyTaskSchedule {
    fn __repr__(&self) -> String {
        format!(
            "TaskSchedule(task_id='{}', start={}, finish={}, slack={:?})",
            self.task_id, self.start, self.finish, self.slack
        )
    }
}

impl From<TaskSchedule> for PyTaskSchedule {
    fn from(s: TaskSchedule) -> Self {
        Self {
            task_id: s.task_id,
            start: s.start,
            finish: s.finish,
            slack: s.slack,
        }
    }
}

/// Result of a scheduling run (PyO3 wrapper).
#[pyclass(name = "ScheduleResult", frozen)]
#[derive(Clone, Debug)]
pub struct PyScheduleResult {
    #[pyo3(get)]
    pub job_name: String,
    #[pyo3(get)]
    pub workers: usize,
    /// "unconstrained" or "constrained".
    #[pyo3(get)]
    pub mode: String,
    #[pyo3(get)]
    pub completion_time: u64,
    #[pyo3(get)]
    pub task_schedules: Vec<PyTaskSchedule>,
    #[pyo3(get)]
    pub execution_order: Vec<String>,
    #[pyo3(get)]
    pub critical_path: Vec<String>,
}

#[pymethods]
impl PyScheduleResult {
    fn __repr__(&self) -> String {
        format!(
            "ScheduleResult(job_name='{}', mode='{}', completion_time={})",
            self.job_name, self.mode, self.completion_time
        )
    }
}

impl From<ScheduleResult> for PyScheduleResult {
    fn from(r: ScheduleResult) -> Self {
        let mode = match r.mode {
            ScheduleMode::Unconstrained => "unconstrained",
            ScheduleMode::Constrained => "constrained",
        };
        Self {
            job_name: r.job_name,
            workers: r.workers,
            mode: mode.to_string(),
            completion_time: r.completion_time,
            task_schedules: r.task_schedules.into_iter().map(Into::into).collect(),
            execution_order: r.execution_order,
            critical_path: r.critical_path,
        }
    }
}

/// Schedule a job given as `(id, duration, dependencies)` tuples.
///
/// # Raises
/// * ValueError if the job is invalid, has a cycle, or `workers` is zero
#[pyfunction]
#[pyo3(signature = (tasks, workers, name="Job", strategy="auto"))]
fn schedule(
    tasks: Vec<(String, u64, Vec<String>)>,
    workers: usize,
    name: &str,
    strategy: &str,
) -> PyResult<PyScheduleResult> {
    let strategy: Strategy = strategy.parse().map_err(PyValueError::new_err)?;

    let mut job = Job::new(name);
    for (id, duration, deps) in tasks {
        let task = Task::new(id, duration, deps).map_err(|e| PyValueError::new_err(e.to_string()))?;
        job.add_task(task)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
    }
    validate_job(&job).map_err(|e| PyValueError::new_err(e.to_string()))?;

    let config = SchedulingConfig::default().with_strategy(strategy);
    match schedule_with_config(&job, workers, config) {
        Ok(result) => Ok(result.into()),
        Err(e) => Err(PyValueError::new_err(e.to_string())),
    }
}

/// The jobsched Python module.
#[pymodule]
fn jobsched(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTaskSchedule>()?;
    m.add_class::<PyScheduleResult>()?;
    m.add_function(wrap_pyfunction!(schedule, m)?)?;
    Ok(())
}
