use crate::calculations::constraint::{self, TaskDates};
use crate::engine::ScheduleError;
use crate::graph::ScheduleDag;
use crate::task::Task;
use chrono::{Duration, NaiveDate};
use petgraph::Direction;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// Propagates earliest start/finish dates from roots to leaves.
///
/// Tasks are processed in topological order so every predecessor's dates are
/// final before a dependent reads them. A task's earliest start is the latest
/// of its stored start date and every incoming edge's bound; edges only ever
/// push a task later. Rootless tasks without a stored date take
/// `default_start`.
pub struct ForwardPass<'a> {
    dag: &'a ScheduleDag,
    tasks: &'a [Task],
}

impl<'a> ForwardPass<'a> {
    pub fn new(dag: &'a ScheduleDag, tasks: &'a [Task]) -> Self {
        Self { dag, tasks }
    }

    pub fn execute(
        &self,
        default_start: NaiveDate,
    ) -> Result<HashMap<i32, (NaiveDate, NaiveDate)>, ScheduleError> {
        let order = self
            .dag
            .topological_order()
            .ok_or_else(|| ScheduleError::cycle_in(self.tasks))?;

        let tasks_by_id: HashMap<i32, &Task> =
            self.tasks.iter().map(|task| (task.id, task)).collect();

        let mut results: HashMap<i32, (NaiveDate, NaiveDate)> =
            HashMap::with_capacity(self.tasks.len());

        for node_ix in order {
            let task_id = self.dag.graph[node_ix];
            let task = tasks_by_id
                .get(&task_id)
                .expect("dag nodes come from the task batch");
            let duration = self.dag.durations[&task_id];

            let mut early_start = task.start_date;
            for edge in self.dag.graph.edges_directed(node_ix, Direction::Incoming) {
                let pred_id = self.dag.graph[edge.source()];
                let &(pred_start, pred_finish) = results
                    .get(&pred_id)
                    .expect("predecessor precedes dependent in topological order");
                let bound = constraint::earliest_start(
                    edge.weight(),
                    TaskDates {
                        start: pred_start,
                        finish: pred_finish,
                    },
                    duration,
                );
                early_start = Some(match early_start {
                    Some(current) if current >= bound => current,
                    _ => bound,
                });
            }

            let early_start = early_start.unwrap_or(default_start);
            let early_finish = early_start + Duration::days(duration - 1);
            results.insert(task_id, (early_start, early_finish));
        }

        Ok(results)
    }
}
