use crate::calculations::{BackwardPass, ForwardPass};
use crate::critical_path::{self, CriticalPathResult};
use crate::graph::{ScheduleDag, cycle};
use crate::task::Task;
use crate::task_validation::{self, ValidationError};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    Validation(ValidationError),
    MissingForwardResults { task_id: i32 },
    MissingBackwardResults { task_id: i32 },
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::Validation(err) => write!(f, "{err}"),
            ScheduleError::MissingForwardResults { task_id } => write!(
                f,
                "task {task_id} has no forward-pass dates; run the forward pass first"
            ),
            ScheduleError::MissingBackwardResults { task_id } => write!(
                f,
                "task {task_id} has no backward-pass dates; run the backward pass first"
            ),
        }
    }
}

impl std::error::Error for ScheduleError {}

impl From<ValidationError> for ScheduleError {
    fn from(value: ValidationError) -> Self {
        ScheduleError::Validation(value)
    }
}

impl ScheduleError {
    // Fallback for a toposort failure inside a pass invoked without the
    // validation gate; recovers the cycle path for the report.
    pub(crate) fn cycle_in(tasks: &[Task]) -> Self {
        let cycle = cycle::find_cycle(tasks).unwrap_or_default();
        ScheduleError::Validation(ValidationError::CyclicDependency { cycle })
    }
}

/// Caller policy knobs. Both are optional; unset fields fall back to the
/// documented defaults at run time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleOptions {
    /// Start date for rootless tasks that carry no stored date.
    /// Defaults to the current local date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_start: Option<NaiveDate>,
    /// Project-end anchor for the backward pass when the call site does not
    /// pass one. Defaults to the latest forward-pass finish.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_finish: Option<NaiveDate>,
}

/// Stateless scheduling engine: every operation takes a full task batch and
/// returns annotated copies, never retaining state or mutating its input.
/// Identical input produces identical output, so independent batches can be
/// scheduled concurrently by the host without coordination.
#[derive(Debug, Clone, Default)]
pub struct ScheduleEngine {
    options: ScheduleOptions,
}

impl ScheduleEngine {
    pub fn new(options: ScheduleOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ScheduleOptions {
        &self.options
    }

    /// Structural gate: cycles, dangling references, inverted date ranges,
    /// duplicate ids. Computes no dates.
    pub fn validate(&self, tasks: &[Task]) -> Result<(), ValidationError> {
        task_validation::validate_tasks(tasks)
    }

    /// Runs the forward pass and returns copies carrying earliest dates in
    /// `start_date`/`end_date`, with `duration_days` normalized. Output order
    /// matches input order.
    pub fn schedule_forward(&self, tasks: &[Task]) -> Result<Vec<Task>, ScheduleError> {
        self.validate(tasks)?;
        if tasks.is_empty() {
            return Ok(Vec::new());
        }

        let dag = ScheduleDag::build(tasks);
        let results = ForwardPass::new(&dag, tasks).execute(self.default_start())?;

        let mut scheduled = tasks.to_vec();
        for task in &mut scheduled {
            let &(early_start, early_finish) = results
                .get(&task.id)
                .expect("forward pass covers every task in the batch");
            task.duration_days = Some(dag.durations[&task.id]);
            task.start_date = Some(early_start);
            task.end_date = Some(early_finish);
        }
        Ok(scheduled)
    }

    /// Runs the backward pass against `anchor` and returns copies carrying
    /// latest dates in `late_start`/`late_finish`. Requires forward-pass
    /// dates on every task. Anchor resolution: explicit argument, then the
    /// engine's `target_finish` option, then the latest forward-pass finish.
    pub fn schedule_backward(
        &self,
        tasks: &[Task],
        anchor: Option<NaiveDate>,
    ) -> Result<Vec<Task>, ScheduleError> {
        self.validate(tasks)?;
        if tasks.is_empty() {
            return Ok(Vec::new());
        }

        let mut project_finish: Option<NaiveDate> = None;
        for task in tasks {
            if task.start_date.is_none() {
                return Err(ScheduleError::MissingForwardResults { task_id: task.id });
            }
            let Some(finish) = task.end_date else {
                return Err(ScheduleError::MissingForwardResults { task_id: task.id });
            };
            project_finish = Some(match project_finish {
                Some(current) if current >= finish => current,
                _ => finish,
            });
        }

        let anchor = anchor
            .or(self.options.target_finish)
            .or(project_finish)
            .expect("non-empty batch has a forward-pass finish");

        let dag = ScheduleDag::build(tasks);
        let results = BackwardPass::new(&dag, tasks).execute(anchor)?;

        let mut scheduled = tasks.to_vec();
        for task in &mut scheduled {
            let &(late_start, late_finish) = results
                .get(&task.id)
                .expect("backward pass covers every task in the batch");
            task.late_start = Some(late_start);
            task.late_finish = Some(late_finish);
        }
        Ok(scheduled)
    }

    /// The one call a host needs: validate, both passes, then float and
    /// critical flags. The anchor comes from `target_finish` when set,
    /// otherwise the forward-pass project finish.
    pub fn analyze_critical_path(
        &self,
        tasks: &[Task],
    ) -> Result<CriticalPathResult, ScheduleError> {
        if tasks.is_empty() {
            self.validate(tasks)?;
            return Ok(CriticalPathResult {
                tasks: Vec::new(),
                critical_ids: Vec::new(),
                warnings: Vec::new(),
                project_finish: None,
            });
        }
        let forward = self.schedule_forward(tasks)?;
        let backward = self.schedule_backward(&forward, None)?;
        critical_path::analyze(backward)
    }

    fn default_start(&self) -> NaiveDate {
        self.options
            .default_start
            .unwrap_or_else(|| Local::now().date_naive())
    }
}
