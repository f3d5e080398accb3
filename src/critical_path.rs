use crate::engine::ScheduleError;
use crate::task::Task;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-fatal findings from the critical-path analysis. Scheduling completes;
/// the caller decides how to surface these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleWarning {
    /// The task cannot meet the anchor date. `float_days` is the raw
    /// (negative) float before it is clamped to zero on the task record, so
    /// "target date already missed" stays detectable.
    InfeasibleAnchor { task_id: i32, float_days: i64 },
}

impl fmt::Display for ScheduleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleWarning::InfeasibleAnchor {
                task_id,
                float_days,
            } => write!(
                f,
                "task {task_id} misses the project anchor by {} day(s)",
                -float_days
            ),
        }
    }
}

/// Output of a full scheduling run: the annotated batch, the critical chain,
/// and any anchor-feasibility warnings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriticalPathResult {
    pub tasks: Vec<Task>,
    /// Zero-float task ids, ordered by earliest start then id.
    pub critical_ids: Vec<i32>,
    pub warnings: Vec<ScheduleWarning>,
    /// Latest earliest-finish across the batch; `None` for an empty batch.
    pub project_finish: Option<NaiveDate>,
}

impl CriticalPathResult {
    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("tasks={}", self.tasks.len()));
        parts.push(format!("critical={}", self.critical_ids.len()));
        if let Some(date) = self.project_finish {
            parts.push(format!("finish={}", date));
        }
        if !self.warnings.is_empty() {
            parts.push(format!("behind={}", self.warnings.len()));
        }
        if !self.critical_ids.is_empty() {
            let chain = self
                .critical_ids
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("->");
            parts.push(format!("crit_path={}", chain));
        }
        parts.join(", ")
    }
}

/// Derives float and critical flags from a batch that has been through both
/// passes. Float is `late_start - start_date`; a negative value means the
/// anchor is infeasible for that task and is reported as a warning, then
/// clamped to zero on the record. A task is critical iff its clamped float
/// is zero.
pub fn analyze(mut tasks: Vec<Task>) -> Result<CriticalPathResult, ScheduleError> {
    let mut warnings = Vec::new();
    let mut critical: Vec<(NaiveDate, i32)> = Vec::new();
    let mut project_finish: Option<NaiveDate> = None;

    for task in &mut tasks {
        let start = task
            .start_date
            .ok_or(ScheduleError::MissingForwardResults { task_id: task.id })?;
        let late_start = task
            .late_start
            .ok_or(ScheduleError::MissingBackwardResults { task_id: task.id })?;

        if let Some(finish) = task.end_date {
            project_finish = Some(match project_finish {
                Some(current) if current >= finish => current,
                _ => finish,
            });
        }

        let raw_float = (late_start - start).num_days();
        if raw_float < 0 {
            warnings.push(ScheduleWarning::InfeasibleAnchor {
                task_id: task.id,
                float_days: raw_float,
            });
        }

        let float = raw_float.max(0);
        task.total_float = Some(float);
        task.is_critical = Some(float == 0);
        if float == 0 {
            critical.push((start, task.id));
        }
    }

    critical.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    let critical_ids = critical.into_iter().map(|(_, id)| id).collect();

    Ok(CriticalPathResult {
        tasks,
        critical_ids,
        warnings,
        project_finish,
    })
}
