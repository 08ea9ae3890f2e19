//! Human-readable rendering of a schedule.

use std::io::{self, Write};

use crate::models::{ScheduleMode, ScheduleResult};

const WIDTH: usize = 60;

/// Write the summary, the task table and the execution order.
pub fn render_text<W: Write>(result: &ScheduleResult, w: &mut W) -> io::Result<()> {
    let line = "=".repeat(WIDTH);
    let dash = "-".repeat(WIDTH);
    let show_slack = result.task_schedules.iter().any(|s| s.slack.is_some());

    writeln!(w)?;
    writeln!(w, "{line}")?;
    writeln!(w, "  Job: {}", result.job_name)?;
    writeln!(w, "{line}")?;

    let label = match result.mode {
        ScheduleMode::Unconstrained => "Minimum completion time",
        ScheduleMode::Constrained => "Completion time",
    };
    writeln!(w, "  {label:<24}: {} unit(s)", result.completion_time)?;
    writeln!(w, "  {:<24}: {}", "Workers", result.workers)?;
    writeln!(w, "  {:<24}: {:.0}%", "Utilization", result.utilization() * 100.0)?;
    if !result.critical_path.is_empty() {
        writeln!(w, "  {:<24}: {}", "Critical path", result.critical_path.join(" -> "))?;
    }

    writeln!(w, "{dash}")?;
    match result.mode {
        ScheduleMode::Unconstrained => {
            writeln!(w, "  Execution Plan (unlimited parallelism):")?
        }
        ScheduleMode::Constrained => writeln!(
            w,
            "  Execution Plan ({} worker{}):",
            result.workers,
            if result.workers == 1 { "" } else { "s" }
        )?,
    }
    writeln!(w, "{dash}")?;

    if show_slack {
        writeln!(w, "  {:<8} {:>10} {:>10} {:>10} {:>10}", "Task", "Start", "Finish", "Duration", "Slack")?;
    } else {
        writeln!(w, "  {:<8} {:>10} {:>10} {:>10}", "Task", "Start", "Finish", "Duration")?;
    }
    writeln!(w, "{dash}")?;

    for ts in &result.task_schedules {
        write!(w, "  {:<8} {:>10} {:>10} {:>10}", ts.task_id, ts.start, ts.finish, ts.duration())?;
        match ts.slack {
            Some(slack) if show_slack => writeln!(w, " {slack:>10}")?,
            _ => writeln!(w)?,
        }
    }

    writeln!(w, "{dash}")?;
    writeln!(w, "  Execution order: [{}]", result.execution_order.join(", "))?;
    writeln!(w, "{line}")?;
    Ok(())
}

/// Render into a `String`.
pub fn render_to_string(result: &ScheduleResult) -> io::Result<String> {
    let mut buf = Vec::new();
    render_text(result, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
