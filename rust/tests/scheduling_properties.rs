use std::collections::{BTreeSet, HashMap};

use jobsched::config::Strategy as SchedulingStrategy;
use jobsched::graph::TaskGraph;
use jobsched::topology::topological_order_names;
use jobsched::{schedule, schedule_with_config, Job, ScheduleResult, SchedulerError, SchedulingConfig, Task};
use proptest::prelude::*;

fn task_name(i: usize) -> String {
    format!("t{i:02}")
}

// Acyclic by construction: task N may only depend on tasks 0..N-1.
fn dag_strategy(max_tasks: usize) -> impl Strategy<Value = Job> {
    (1..=max_tasks).prop_flat_map(|num_tasks| {
        let durations = proptest::collection::vec(1u64..10, num_tasks);
        let deps = proptest::collection::vec(
            proptest::collection::vec(any::<usize>(), 0..num_tasks),
            num_tasks,
        );

        (durations, deps).prop_map(move |(durations, raw_deps)| {
            let mut job = Job::new("prop");
            for (i, (duration, potential)) in durations.into_iter().zip(raw_deps).enumerate() {
                let mut deps: Vec<String> = Vec::new();
                if i > 0 {
                    for idx in potential {
                        let dep = task_name(idx % i);
                        if !deps.contains(&dep) {
                            deps.push(dep);
                        }
                    }
                }
                job.add_task(Task::new(task_name(i), duration, deps).unwrap())
                    .unwrap();
            }
            job
        })
    })
}

fn simulate_only(job: &Job, workers: usize) -> ScheduleResult {
    let config = SchedulingConfig::default().with_strategy(SchedulingStrategy::Simulation);
    schedule_with_config(job, workers, config).unwrap()
}

fn finish_of(result: &ScheduleResult) -> HashMap<&str, u64> {
    result
        .task_schedules
        .iter()
        .map(|s| (s.task_id.as_str(), s.finish))
        .collect()
}

fn assert_dependencies_respected(job: &Job, result: &ScheduleResult) -> Result<(), TestCaseError> {
    let finish = finish_of(result);
    for task in job.tasks() {
        let start = result.schedule_for(&task.id).unwrap().start;
        for dep in &task.dependencies {
            prop_assert!(finish[dep.as_str()] <= start, "{} starts before {} finishes", task.id, dep);
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn test_topological_order_is_valid(job in dag_strategy(12)) {
        let graph = TaskGraph::from_job(&job).unwrap();
        let order = topological_order_names(&graph).unwrap();

        let unique: BTreeSet<&String> = order.iter().collect();
        prop_assert_eq!(order.len(), job.task_count());
        prop_assert_eq!(unique.len(), job.task_count());

        let position: HashMap<&str, usize> =
            order.iter().enumerate().map(|(i, id)| (id.as_str(), i)).collect();
        for task in job.tasks() {
            for dep in &task.dependencies {
                prop_assert!(position[dep.as_str()] < position[task.id.as_str()]);
            }
        }
    }

    #[test]
    fn test_scheduling_is_deterministic(job in dag_strategy(10), workers in 1usize..12) {
        prop_assert_eq!(schedule(&job, workers).unwrap(), schedule(&job, workers).unwrap());
    }

    #[test]
    fn test_unconstrained_schedule(job in dag_strategy(12)) {
        let result = schedule(&job, job.task_count()).unwrap();
        assert_dependencies_respected(&job, &result)?;

        let finish = finish_of(&result);
        let makespan = finish.values().copied().max().unwrap_or(0);
        prop_assert_eq!(result.completion_time, makespan);

        // Every task starts as early as its dependencies allow.
        for task in job.tasks() {
            let earliest = task.dependencies.iter().map(|d| finish[d.as_str()]).max().unwrap_or(0);
            prop_assert_eq!(result.schedule_for(&task.id).unwrap().start, earliest);
        }

        let path = &result.critical_path;
        prop_assert!(!path.is_empty());
        prop_assert_eq!(result.critical_path_length(), result.completion_time);
        prop_assert_eq!(result.schedule_for(&path[0]).unwrap().start, 0);
        for pair in path.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            prop_assert!(job.get(next).unwrap().depends_on(prev));
            prop_assert_eq!(
                result.schedule_for(prev).unwrap().finish,
                result.schedule_for(next).unwrap().start
            );
        }
        for id in path {
            prop_assert_eq!(result.schedule_for(id).unwrap().slack, Some(0));
        }
    }

    #[test]
    fn test_simulation_with_enough_workers_matches_cpm(job in dag_strategy(10)) {
        let n = job.task_count();
        let cpm = schedule(&job, n).unwrap();
        let sim = simulate_only(&job, n);

        prop_assert_eq!(sim.completion_time, cpm.completion_time);
        for s in &cpm.task_schedules {
            let other = sim.schedule_for(&s.task_id).unwrap();
            prop_assert_eq!((other.start, other.finish), (s.start, s.finish));
        }
    }

    #[test]
    fn test_constrained_bounds(job in dag_strategy(12), workers in 1usize..6) {
        let cpm = schedule(&job, job.task_count()).unwrap();
        let result = simulate_only(&job, workers);
        assert_dependencies_respected(&job, &result)?;

        let total = job.total_work();
        let lower = total.div_ceil(workers as u64);
        prop_assert!(result.completion_time >= cpm.completion_time);
        prop_assert!(result.completion_time >= lower);
        prop_assert!(result.completion_time <= total);

        for s in &result.task_schedules {
            prop_assert_eq!(s.duration(), job.get(&s.task_id).unwrap().duration);
            let running = result
                .task_schedules
                .iter()
                .filter(|o| o.start <= s.start && s.start < o.finish)
                .count();
            prop_assert!(running <= workers, "{} tasks running at {}", running, s.start);
        }
    }

    #[test]
    fn test_single_worker_completion_is_total_work(job in dag_strategy(10)) {
        let result = schedule(&job, 1).unwrap();
        prop_assert_eq!(result.completion_time, job.total_work());
    }

    #[test]
    fn test_cycle_is_rejected(job in dag_strategy(10), workers in 1usize..12) {
        prop_assume!(job.task_count() >= 2);
        let mut tasks: Vec<Task> = job.tasks().cloned().collect();
        let (first, second) = (tasks[0].id.clone(), tasks[1].id.clone());
        if !tasks[1].depends_on(&first) {
            tasks[1].dependencies.push(first);
        }
        tasks[0].dependencies.push(second);

        let mut cyclic = Job::new("cyclic");
        for task in tasks {
            cyclic.add_task(task).unwrap();
        }

        let err = schedule(&cyclic, workers).unwrap_err();
        prop_assert!(matches!(err, SchedulerError::Cycle(_)));
    }
}
