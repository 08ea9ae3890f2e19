//! Job definition files.
//!
//! A job file is TOML (or JSON, chosen by a `.json` extension):
//!
//! ```toml
//! name = "J"
//! workers = 2
//!
//! [scheduler]
//! strategy = "auto"
//! verbosity = 1
//!
//! [tasks.A]
//! duration = 3
//!
//! [tasks.D]
//! duration = 5
//! after = ["A"]
//! ```
//!
//! Everything except `[tasks.*].duration` is optional.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::SchedulingConfig;
use crate::models::{Job, ModelError, Task};
use crate::validation::{validate_job, ValidationError};

/// Errors raised while reading a job file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("reading job file at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing TOML job file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("parsing JSON job file: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("invalid job: {0}")]
    Validation(#[from] ValidationError),
    #[error("workers must be positive, got {0}")]
    InvalidWorkers(usize),
}

/// Top-level job file as read from disk.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobFile {
    #[serde(default)]
    pub name: Option<String>,

    /// Worker count; may also be given on the command line.
    #[serde(default)]
    pub workers: Option<usize>,

    #[serde(default)]
    pub scheduler: SchedulingConfig,

    /// Keys are the task IDs.
    #[serde(default)]
    pub tasks: BTreeMap<String, TaskSpec>,
}

/// One `[tasks.<id>]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskSpec {
    /// Signed so that `0` and negative values reach validation instead of
    /// failing as a parse error.
    pub duration: i64,

    /// IDs of tasks that must finish first.
    #[serde(default, alias = "dependencies")]
    pub after: Vec<String>,
}

/// A job file converted to domain types and validated.
#[derive(Debug, Clone)]
pub struct LoadedJob {
    pub job: Job,
    pub workers: Option<usize>,
    pub config: SchedulingConfig,
}

impl JobFile {
    pub fn from_toml_str(s: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Convert to a [`Job`] without running graph validation.
    pub fn to_job(&self) -> Result<Job, LoadError> {
        let mut job = Job::new(self.name.clone().unwrap_or_default());

        for (id, spec) in &self.tasks {
            if id.is_empty() {
                return Err(ModelError::EmptyTaskId.into());
            }
            let duration = u64::try_from(spec.duration)
                .ok()
                .filter(|&d| d > 0)
                .ok_or_else(|| ValidationError::NonPositiveDuration {
                    task: id.clone(),
                    duration: spec.duration,
                })?;
            job.add_task(Task::new(id.clone(), duration, spec.after.clone())?)?;
        }

        Ok(job)
    }
}

/// Read and parse a job file. No semantic validation is done.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<JobFile, LoadError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        JobFile::from_json_str(&contents)
    } else {
        JobFile::from_toml_str(&contents)
    }
}

/// Read a job file, convert it and validate the resulting job.
///
/// This is the entry point the command line uses.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<LoadedJob, LoadError> {
    let file = load_from_path(path)?;
    into_loaded(file)
}

/// Convert and validate an already parsed job file.
pub fn into_loaded(file: JobFile) -> Result<LoadedJob, LoadError> {
    if file.workers == Some(0) {
        return Err(LoadError::InvalidWorkers(0));
    }
    let job = file.to_job()?;
    validate_job(&job)?;
    Ok(LoadedJob {
        job,
        workers: file.workers,
        config: file.scheduler,
    })
}
