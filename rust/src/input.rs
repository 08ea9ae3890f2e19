//! Interactive job entry on a terminal.

use std::io::{self, BufRead, Write};
use thiserror::Error;

use crate::models::{Job, ModelError, Task};

#[derive(Error, Debug)]
pub enum InputError {
    #[error("read error: {0}")]
    Io(#[from] io::Error),
    #[error("unexpected end of input (EOF)")]
    UnexpectedEof,
    #[error("invalid number: '{0}' (integer expected)")]
    InvalidNumber(String),
    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: i64 },
    #[error("task {index}: {source}")]
    Task {
        index: usize,
        #[source]
        source: ModelError,
    },
}

/// A job and worker count entered by the user.
#[derive(Debug, Clone)]
pub struct JobInput {
    pub job: Job,
    pub workers: usize,
}

/// Prompts for a job on `output` and reads answers line by line from `input`.
pub struct JobPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> JobPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask for job name, tasks and worker count.
    pub fn read_job(&mut self) -> Result<JobInput, InputError> {
        let name = self.prompt_string("Enter job name (e.g. J)")?;
        let mut job = Job::new(name);

        let task_count = self.prompt_positive("How many tasks?", "task count")?;
        for index in 1..=task_count {
            let task = self.read_task(index)?;
            job.add_task(task)
                .map_err(|source| InputError::Task { index, source })?;
        }

        let workers = self.prompt_positive("How many workers?", "worker count")?;
        Ok(JobInput { job, workers })
    }

    fn read_task(&mut self, index: usize) -> Result<Task, InputError> {
        writeln!(self.output, "\n--- Task {index} ---")?;

        let id = self.prompt_string("Task ID (e.g. A)")?;
        if id.is_empty() {
            return Err(InputError::Task {
                index,
                source: ModelError::EmptyTaskId,
            });
        }

        let duration = self.prompt_int(&format!("Duration for task '{id}' (positive integer)"))?;
        let deps = self.prompt_string(&format!(
            "Dependencies for task '{id}' (comma-separated, or leave empty)"
        ))?;
        let dependencies = parse_dependencies(&deps, &id);

        let duration = u64::try_from(duration)
            .ok()
            .filter(|&d| d > 0)
            .ok_or_else(|| InputError::Task {
                index,
                source: ModelError::NonPositiveDuration {
                    task: id.clone(),
                    duration,
                },
            })?;

        Task::new(id, duration, dependencies).map_err(|source| InputError::Task { index, source })
    }

    fn prompt_string(&mut self, message: &str) -> Result<String, InputError> {
        write!(self.output, "{message}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputError::UnexpectedEof);
        }
        Ok(line.trim().to_string())
    }

    fn prompt_int(&mut self, message: &str) -> Result<i64, InputError> {
        let s = self.prompt_string(message)?;
        s.parse().map_err(|_| InputError::InvalidNumber(s))
    }

    fn prompt_positive(&mut self, message: &str, what: &'static str) -> Result<usize, InputError> {
        let value = self.prompt_int(message)?;
        usize::try_from(value)
            .ok()
            .filter(|&v| v > 0)
            .ok_or(InputError::NonPositive { what, value })
    }
}

/// Split a comma-separated dependency list.
///
/// Blank entries, references to `self_id` and repeats are dropped; the
/// first-seen order is kept.
pub fn parse_dependencies(input: &str, self_id: &str) -> Vec<String> {
    let mut deps: Vec<String> = Vec::new();
    for dep in input.split(',').map(str::trim) {
        if dep.is_empty() || dep == self_id || deps.iter().any(|d| d == dep) {
            continue;
        }
        deps.push(dep.to_string());
    }
    deps
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(script: &str) -> (Result<JobInput, InputError>, String) {
        let mut output = Vec::new();
        let result = JobPrompt::new(Cursor::new(script.as_bytes()), &mut output).read_job();
        (result, String::from_utf8_lossy(&output).into_owned())
    }

    #[test]
    fn test_parse_dependencies() {
        assert_eq!(parse_dependencies("", "A"), Vec::<String>::new());
        assert_eq!(parse_dependencies(" B, C ,B,,A", "A"), vec!["B", "C"]);
    }

    #[test]
    fn test_read_reference_job() {
        let script = "J\n6\nA\n3\n\nB\n2\n\nC\n4\n\nD\n5\nA\nE\n2\nB, C\nF\n3\nD,E\n2\n";
        let (result, prompts) = run(script);
        let input = result.unwrap();

        assert_eq!(input.job.name, "J");
        assert_eq!(input.workers, 2);
        assert_eq!(input.job.task_count(), 6);
        assert_eq!(
            input.job.get("F").unwrap().dependencies,
            vec!["D".to_string(), "E".to_string()]
        );
        assert!(prompts.contains("--- Task 6 ---"));
        assert!(prompts.contains("How many workers?"));
    }

    #[test]
    fn test_blank_name_uses_default() {
        let (result, _) = run("\n1\nA\n1\n\n1\n");
        assert_eq!(result.unwrap().job.name, "Job");
    }

    #[test]
    fn test_eof() {
        let (result, _) = run("J\n2\nA\n1\n");
        assert!(matches!(result, Err(InputError::UnexpectedEof)));
    }

    #[test]
    fn test_invalid_number() {
        let (result, _) = run("J\nmany\n");
        match result {
            Err(InputError::InvalidNumber(s)) => assert_eq!(s, "many"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_zero_workers() {
        let (result, _) = run("J\n1\nA\n1\n\n0\n");
        assert!(matches!(
            result,
            Err(InputError::NonPositive { what: "worker count", value: 0 })
        ));
    }

    #[test]
    fn test_negative_duration() {
        let (result, _) = run("J\n1\nA\n-2\n\n1\n");
        assert!(matches!(
            result,
            Err(InputError::Task {
                index: 1,
                source: ModelError::NonPositiveDuration { duration: -2, .. }
            })
        ));
    }

    #[test]
    fn test_duplicate_task_id() {
        let (result, _) = run("J\n2\nA\n1\n\nA\n2\n\n1\n");
        assert!(matches!(
            result,
            Err(InputError::Task {
                index: 2,
                source: ModelError::DuplicateTask(_)
            })
        ));
    }
}
