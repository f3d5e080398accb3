use chrono::NaiveDate;
use cpm_core::{DependencyEdge, ScheduleEngine, ScheduleOptions, ScheduleWarning, Task};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn engine() -> ScheduleEngine {
    ScheduleEngine::new(ScheduleOptions {
        default_start: Some(d(2025, 1, 6)),
        target_finish: None,
    })
}

fn task(id: i32, duration: i64, preds: &[i32]) -> Task {
    let mut t = Task::new(id, format!("T{id}"), duration);
    t.predecessors = preds
        .iter()
        .map(|&p| DependencyEdge::finish_to_start(p))
        .collect();
    t
}

// A(2d) -> B(3d) -> C(1d), all finish-to-start with no lag.
fn chain() -> Vec<Task> {
    vec![task(1, 2, &[]), task(2, 3, &[1]), task(3, 1, &[2])]
}

#[test]
fn chain_with_anchor_at_finish_is_fully_critical() {
    let result = engine().analyze_critical_path(&chain()).unwrap();

    let mut m = std::collections::HashMap::new();
    for t in &result.tasks {
        m.insert(
            t.id,
            (
                t.start_date.unwrap(),
                t.end_date.unwrap(),
                t.total_float.unwrap(),
                t.is_critical.unwrap(),
            ),
        );
    }

    // A [01-06, 01-07], B [01-08, 01-10], C [01-11, 01-11]
    assert_eq!(m.get(&1).copied(), Some((d(2025, 1, 6), d(2025, 1, 7), 0, true)));
    assert_eq!(m.get(&2).copied(), Some((d(2025, 1, 8), d(2025, 1, 10), 0, true)));
    assert_eq!(m.get(&3).copied(), Some((d(2025, 1, 11), d(2025, 1, 11), 0, true)));

    assert_eq!(result.critical_ids, vec![1, 2, 3]);
    assert_eq!(result.project_finish, Some(d(2025, 1, 11)));
    assert!(result.warnings.is_empty());
}

#[test]
fn default_anchor_leaves_no_negative_float_and_some_zero_float() {
    let tasks = vec![
        task(1, 4, &[]),
        task(2, 2, &[1]),
        task(3, 6, &[1]),
        task(4, 1, &[2, 3]),
    ];
    let result = engine().analyze_critical_path(&tasks).unwrap();

    assert!(result.warnings.is_empty());
    for t in &result.tasks {
        assert!(t.total_float.unwrap() >= 0, "task {}", t.id);
    }
    assert!(!result.critical_ids.is_empty());
    // The short branch has exactly the long branch's slack.
    let t2 = result.tasks.iter().find(|t| t.id == 2).unwrap();
    assert_eq!(t2.total_float, Some(4));
    assert_eq!(t2.is_critical, Some(false));
}

#[test]
fn missed_target_date_warns_per_task_and_clamps_float() {
    let engine = ScheduleEngine::new(ScheduleOptions {
        default_start: Some(d(2025, 1, 6)),
        // Two days before the earliest possible finish of 01-11.
        target_finish: Some(d(2025, 1, 9)),
    });
    let result = engine.analyze_critical_path(&chain()).unwrap();

    assert_eq!(
        result.warnings,
        vec![
            ScheduleWarning::InfeasibleAnchor {
                task_id: 1,
                float_days: -2,
            },
            ScheduleWarning::InfeasibleAnchor {
                task_id: 2,
                float_days: -2,
            },
            ScheduleWarning::InfeasibleAnchor {
                task_id: 3,
                float_days: -2,
            },
        ]
    );
    for t in &result.tasks {
        assert_eq!(t.total_float, Some(0));
        assert_eq!(t.is_critical, Some(true));
    }
}

#[test]
fn analysis_is_idempotent() {
    let engine = engine();
    let tasks = vec![
        task(1, 2, &[]),
        task(2, 3, &[1]),
        task(3, 1, &[1]),
        task(4, 2, &[2, 3]),
    ];

    let first = engine.analyze_critical_path(&tasks).unwrap();
    let second = engine.analyze_critical_path(&tasks).unwrap();
    assert_eq!(first.tasks, second.tasks);
    assert_eq!(first.critical_ids, second.critical_ids);
    assert_eq!(first.warnings, second.warnings);

    // Feeding the annotated output back through produces the same schedule.
    let again = engine.analyze_critical_path(&first.tasks).unwrap();
    assert_eq!(again.tasks, first.tasks);
    assert_eq!(again.critical_ids, first.critical_ids);
}

#[test]
fn summary_line_matches_refresh_format() {
    let result = engine().analyze_critical_path(&chain()).unwrap();
    assert_eq!(
        result.to_cli_summary(),
        "tasks=3, critical=3, finish=2025-01-11, crit_path=1->2->3"
    );
}

#[test]
fn critical_ids_are_ordered_by_earliest_start() {
    // Two parallel critical chains; ids deliberately out of start order.
    let tasks = vec![task(9, 3, &[]), task(1, 3, &[9]), task(5, 6, &[])];
    let result = engine().analyze_critical_path(&tasks).unwrap();
    assert_eq!(result.critical_ids, vec![5, 9, 1]);
}
