use crate::calculations::constraint::{self, TaskDates};
use crate::engine::ScheduleError;
use crate::graph::ScheduleDag;
use crate::task::Task;
use chrono::{Duration, NaiveDate};
use petgraph::Direction;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// Propagates latest start/finish dates from leaves to roots against a
/// project-end anchor, in reverse topological order.
///
/// Every task's latest finish starts at the anchor and is pulled earlier by
/// each outgoing edge's bound, so no task is ever scheduled to finish past
/// the anchor, start-anchored edge types included.
pub struct BackwardPass<'a> {
    dag: &'a ScheduleDag,
    tasks: &'a [Task],
}

impl<'a> BackwardPass<'a> {
    pub fn new(dag: &'a ScheduleDag, tasks: &'a [Task]) -> Self {
        Self { dag, tasks }
    }

    pub fn execute(
        &self,
        anchor: NaiveDate,
    ) -> Result<HashMap<i32, (NaiveDate, NaiveDate)>, ScheduleError> {
        let mut order = self
            .dag
            .topological_order()
            .ok_or_else(|| ScheduleError::cycle_in(self.tasks))?;
        order.reverse();

        let mut results: HashMap<i32, (NaiveDate, NaiveDate)> =
            HashMap::with_capacity(self.tasks.len());

        for node_ix in order {
            let task_id = self.dag.graph[node_ix];
            let duration = self.dag.durations[&task_id];

            let mut late_finish = anchor;
            for edge in self.dag.graph.edges_directed(node_ix, Direction::Outgoing) {
                let succ_id = self.dag.graph[edge.target()];
                let &(succ_start, succ_finish) = results
                    .get(&succ_id)
                    .expect("successor precedes task in reverse topological order");
                let bound = constraint::latest_finish(
                    edge.weight(),
                    TaskDates {
                        start: succ_start,
                        finish: succ_finish,
                    },
                    duration,
                );
                if bound < late_finish {
                    late_finish = bound;
                }
            }

            let late_start = late_finish - Duration::days(duration - 1);
            results.insert(task_id, (late_start, late_finish));
        }

        Ok(results)
    }
}
