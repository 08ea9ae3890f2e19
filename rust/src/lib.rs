//! Minimum completion time scheduling for jobs made of dependent tasks.
//!
//! With at least as many workers as tasks the schedule comes from the
//! critical path method; otherwise a discrete-event simulation assigns ready
//! tasks to free workers in lexicographic ID order.

use anyhow::{bail, Context, Result};
use std::io::{self, BufWriter, Write};

pub mod cli;
pub mod config;
pub mod critical_path;
pub mod graph;
pub mod input;
pub mod interner;
pub mod loader;
pub mod logging;
pub mod models;
pub mod render;
pub mod scheduler;
pub mod topology;
pub mod validation;

#[cfg(feature = "python")]
mod python;

pub use config::{SchedulingConfig, Strategy};
pub use models::{Job, ModelError, ScheduleMode, ScheduleResult, Task, TaskSchedule, Time};
pub use scheduler::{schedule, schedule_with_config, JobScheduler, SchedulerError};
pub use topology::CycleError;
pub use validation::{validate_job, ValidationError};

use cli::{CliArgs, OutputFormat};
use input::JobPrompt;

/// Run the command line front end with parsed arguments.
pub fn run(args: CliArgs) -> Result<()> {
    let (job, job_workers, mut config) = match (&args.job, args.interactive) {
        (Some(path), _) => {
            let loaded = loader::load_and_validate(path)
                .with_context(|| format!("loading job from {}", path.display()))?;
            (loaded.job, loaded.workers, loaded.config)
        }
        (None, false) => bail!("no job given; pass --job <PATH> or --interactive"),
        (None, true) => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            {
                let mut out = stdout.lock();
                writeln!(out, "Job scheduler: minimum completion time")?;
                writeln!(out, "Enter the job definition below.")?;
            }
            let entered = JobPrompt::new(stdin.lock(), stdout.lock())
                .read_job()
                .context("input error")?;
            validate_job(&entered.job).context("validation error")?;
            (entered.job, Some(entered.workers), SchedulingConfig::default())
        }
    };

    let workers = match args.workers.or(job_workers) {
        Some(0) => bail!("worker count must be positive"),
        Some(n) => n,
        None => bail!("no worker count given; pass --workers or set `workers` in the job file"),
    };

    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    config.verbosity = config.verbosity.max(args.verbose);

    crate::log_changes!(
        config.verbosity,
        "Scheduling job '{}' ({} tasks, {} workers, strategy {})",
        job.name,
        job.task_count(),
        workers,
        config.strategy
    );

    let result = schedule_with_config(&job, workers, config).context("scheduling error")?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match args.format {
        OutputFormat::Text => render::render_text(&result, &mut out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &result)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
