use crate::graph::cycle;
use crate::task::Task;
use std::collections::HashSet;
use std::fmt;

/// Structural problems that make a task batch unschedulable. All variants are
/// fatal: no pass runs until the caller fixes the underlying records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateTaskId {
        id: i32,
    },
    DanglingReference {
        task_id: i32,
        missing_predecessor_id: i32,
    },
    InvalidDateRange {
        task_id: i32,
    },
    CyclicDependency {
        cycle: Vec<i32>,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateTaskId { id } => {
                write!(f, "duplicate task id {id}")
            }
            ValidationError::DanglingReference {
                task_id,
                missing_predecessor_id,
            } => write!(
                f,
                "task {task_id} references predecessor {missing_predecessor_id} which is not in the batch"
            ),
            ValidationError::InvalidDateRange { task_id } => {
                write!(f, "task {task_id} has a start date after its end date")
            }
            ValidationError::CyclicDependency { cycle } => {
                let chain = cycle
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("->");
                write!(f, "cyclic dependency detected: {chain}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

fn validate_task(task: &Task) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (task.start_date, task.end_date) {
        if start > end {
            return Err(ValidationError::InvalidDateRange { task_id: task.id });
        }
    }
    if let (Some(start), Some(finish)) = (task.baseline_start, task.baseline_finish) {
        if start > finish {
            return Err(ValidationError::InvalidDateRange { task_id: task.id });
        }
    }
    Ok(())
}

/// Structural gate run before any scheduling pass: duplicate ids, inverted
/// date ranges, unresolved predecessor references, then the cycle check.
/// Dangling references are reported before cycles so the detector only ever
/// walks edges that resolve.
pub fn validate_tasks(tasks: &[Task]) -> Result<(), ValidationError> {
    let mut seen_ids = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !seen_ids.insert(task.id) {
            return Err(ValidationError::DuplicateTaskId { id: task.id });
        }
        validate_task(task)?;
    }

    for task in tasks {
        for edge in &task.predecessors {
            if !seen_ids.contains(&edge.predecessor_id) {
                return Err(ValidationError::DanglingReference {
                    task_id: task.id,
                    missing_predecessor_id: edge.predecessor_id,
                });
            }
        }
    }

    if let Some(cycle) = cycle::find_cycle(tasks) {
        return Err(ValidationError::CyclicDependency { cycle });
    }

    Ok(())
}
