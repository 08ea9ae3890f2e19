mod common;

use common::{make_job, reference_job};
use jobsched::{schedule, schedule_with_config, ScheduleMode, SchedulingConfig, Strategy};

fn times(result: &jobsched::ScheduleResult, id: &str) -> (u64, u64) {
    let s = result.schedule_for(id).unwrap();
    (s.start, s.finish)
}

#[test]
fn test_unlimited_workers() {
    let result = schedule(&reference_job(), 6).unwrap();

    assert_eq!(result.mode, ScheduleMode::Unconstrained);
    assert_eq!(result.completion_time, 11);
    assert_eq!(result.critical_path, vec!["A", "D", "F"]);
    assert_eq!(result.critical_path_length(), 11);

    let slack: Vec<(String, Option<u64>)> = result
        .task_schedules
        .iter()
        .map(|s| (s.task_id.clone(), s.slack))
        .collect();
    assert!(slack.contains(&("A".to_string(), Some(0))));
    assert!(slack.contains(&("B".to_string(), Some(4))));
    assert!(slack.contains(&("C".to_string(), Some(2))));
    assert!(slack.contains(&("E".to_string(), Some(2))));
    assert!(slack.contains(&("F".to_string(), Some(0))));
}

#[test]
fn test_two_workers() {
    let result = schedule(&reference_job(), 2).unwrap();

    assert_eq!(result.mode, ScheduleMode::Constrained);
    assert_eq!(result.completion_time, 11);
    assert!(result.critical_path.is_empty());
    assert_eq!(times(&result, "A"), (0, 3));
    assert_eq!(times(&result, "B"), (0, 2));
    assert_eq!(times(&result, "C"), (2, 6));
    assert_eq!(times(&result, "D"), (3, 8));
    assert_eq!(times(&result, "E"), (6, 8));
    assert_eq!(times(&result, "F"), (8, 11));
    assert_eq!(result.execution_order, vec!["A", "B", "C", "D", "E", "F"]);
}

#[test]
fn test_single_worker_runs_serially() {
    let result = schedule(&reference_job(), 1).unwrap();

    assert_eq!(result.completion_time, 19);
    assert_eq!(result.completion_time, result.total_work);
    assert_eq!(times(&result, "D"), (9, 14));
    assert_eq!(times(&result, "E"), (14, 16));
    assert_eq!(times(&result, "F"), (16, 19));
    assert!((result.utilization() - 1.0).abs() < f64::EPSILON);
}

// Greedy list scheduling is not monotonic in general (see below); for this job it is.
#[test]
fn test_completion_over_worker_counts() {
    let expected = [(1, 19), (2, 11), (3, 11), (4, 11), (5, 11), (6, 11)];
    for (workers, completion) in expected {
        let result = schedule(&reference_job(), workers).unwrap();
        assert_eq!(result.completion_time, completion, "workers = {workers}");
    }
}

#[test]
fn test_simulation_matches_cpm_with_enough_workers() {
    let job = reference_job();
    let cpm = schedule(&job, 6).unwrap();
    let config = SchedulingConfig::default().with_strategy(Strategy::Simulation);
    let sim = schedule_with_config(&job, 6, config).unwrap();

    assert_eq!(sim.mode, ScheduleMode::Constrained);
    assert_eq!(sim.completion_time, cpm.completion_time);
    for s in &cpm.task_schedules {
        assert_eq!(times(&sim, &s.task_id), (s.start, s.finish));
    }
}

#[test]
fn test_verbose_run_matches_quiet_run() {
    let job = reference_job();
    let quiet = schedule(&job, 2).unwrap();
    let loud = schedule_with_config(&job, 2, SchedulingConfig::default().with_verbosity(3)).unwrap();
    assert_eq!(quiet, loud);
}

// Dispatching smallest ID first lets short independent tasks take the third
// worker, which pushes t3 (on the critical chain t0 -> t3 -> t4 -> t8) back.
#[test]
fn test_extra_worker_can_delay_completion() {
    let job = make_job(
        "anomaly",
        &[
            ("t0", 9, &[]),
            ("t1", 3, &["t0"]),
            ("t2", 8, &[]),
            ("t3", 5, &["t0"]),
            ("t4", 9, &["t0", "t1", "t3"]),
            ("t5", 1, &[]),
            ("t6", 6, &[]),
            ("t7", 5, &[]),
            ("t8", 4, &["t4"]),
            ("t9", 6, &[]),
        ],
    );

    let two = schedule(&job, 2).unwrap();
    let three = schedule(&job, 3).unwrap();
    assert_eq!(two.completion_time, 29);
    assert_eq!(three.completion_time, 30);
    assert_eq!(times(&two, "t3"), (9, 14));
    assert_eq!(times(&three, "t3"), (12, 17));

    let unlimited = schedule(&job, 10).unwrap();
    assert_eq!(unlimited.completion_time, 27);
    assert_eq!(unlimited.critical_path, vec!["t0", "t3", "t4", "t8"]);
}
