#![allow(dead_code)]

use jobsched::{Job, Task, Time};

/// Build a job from `(id, duration, dependencies)` triples.
pub fn make_job(name: &str, specs: &[(&str, Time, &[&str])]) -> Job {
    let mut job = Job::new(name);
    for (id, duration, deps) in specs {
        let deps = deps.iter().map(|d| d.to_string()).collect();
        job.add_task(Task::new(*id, *duration, deps).unwrap())
            .unwrap();
    }
    job
}

/// The six-task job used throughout the tests.
///
/// Critical path A -> D -> F, minimum completion time 11.
pub fn reference_job() -> Job {
    make_job(
        "J",
        &[
            ("A", 3, &[]),
            ("B", 2, &[]),
            ("C", 4, &[]),
            ("D", 5, &["A"]),
            ("E", 2, &["B", "C"]),
            ("F", 3, &["D", "E"]),
        ],
    )
}

pub const REFERENCE_TOML: &str = r#"
name = "J"
workers = 2

[tasks.A]
duration = 3

[tasks.B]
duration = 2

[tasks.C]
duration = 4

[tasks.D]
duration = 5
after = ["A"]

[tasks.E]
duration = 2
after = ["B", "C"]

[tasks.F]
duration = 3
after = ["D", "E"]
"#;
