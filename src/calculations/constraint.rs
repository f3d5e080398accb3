//! Per-edge date arithmetic shared by the forward and backward passes.
//!
//! All ranges are inclusive: a task occupying `[start, finish]` works on both
//! boundary days, so a finish-to-start successor begins the day after the
//! predecessor's finish. Lag is a signed calendar-day offset; negative values
//! are lead time.

use crate::task::{DependencyEdge, DependencyType};
use chrono::{Duration, NaiveDate};

/// The inclusive date range a task occupies in one pass.
#[derive(Debug, Clone, Copy)]
pub struct TaskDates {
    pub start: NaiveDate,
    pub finish: NaiveDate,
}

/// Earliest start the edge permits for the dependent task, given the
/// predecessor's (already final) earliest dates.
///
/// Finish-anchored types constrain the dependent's finish and convert to a
/// start bound by backing off the dependent's own duration.
pub fn earliest_start(
    edge: &DependencyEdge,
    predecessor: TaskDates,
    dependent_duration: i64,
) -> NaiveDate {
    let lag = Duration::days(edge.lag_days);
    match edge.dependency_type {
        DependencyType::FinishToStart => predecessor.finish + lag + Duration::days(1),
        DependencyType::StartToStart => predecessor.start + lag,
        DependencyType::FinishToFinish => {
            predecessor.finish + lag - Duration::days(dependent_duration - 1)
        }
        DependencyType::StartToFinish => {
            predecessor.start + lag - Duration::days(dependent_duration - 1)
        }
    }
}

/// Latest finish the edge permits for the predecessor, given the successor's
/// (already final) latest dates. The mirror of [`earliest_start`]: lag is
/// subtracted and the constrained endpoint swaps sides.
pub fn latest_finish(
    edge: &DependencyEdge,
    successor: TaskDates,
    predecessor_duration: i64,
) -> NaiveDate {
    let lag = Duration::days(edge.lag_days);
    match edge.dependency_type {
        DependencyType::FinishToStart => successor.start - lag - Duration::days(1),
        DependencyType::StartToStart => {
            successor.start - lag + Duration::days(predecessor_duration - 1)
        }
        DependencyType::FinishToFinish => successor.finish - lag,
        DependencyType::StartToFinish => {
            successor.finish - lag + Duration::days(predecessor_duration - 1)
        }
    }
}
