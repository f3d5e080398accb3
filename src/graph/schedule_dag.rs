use crate::task::{DependencyEdge, Task};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Adjacency view over a task batch: one node per task id, one edge per
/// dependency, directed predecessor -> dependent and weighted with the typed
/// edge. Durations are normalized once at build time.
pub struct ScheduleDag {
    pub graph: DiGraph<i32, DependencyEdge>,
    pub id_to_index: HashMap<i32, NodeIndex>,
    pub durations: HashMap<i32, i64>,
}

impl ScheduleDag {
    pub fn build(tasks: &[Task]) -> Self {
        let mut graph: DiGraph<i32, DependencyEdge> = DiGraph::new();
        let mut id_to_index: HashMap<i32, NodeIndex> = HashMap::new();
        let mut durations: HashMap<i32, i64> = HashMap::new();

        // Add nodes first
        for task in tasks {
            let node_ix = graph.add_node(task.id);
            id_to_index.insert(task.id, node_ix);
            durations.insert(task.id, task.normalized_duration());
        }

        // Add edges: pred -> task. Unresolvable predecessor ids are skipped;
        // validation reports them before any consumer of this graph runs.
        for task in tasks {
            for edge in &task.predecessors {
                if let (Some(&u), Some(&v)) = (
                    id_to_index.get(&edge.predecessor_id),
                    id_to_index.get(&task.id),
                ) {
                    graph.add_edge(u, v, *edge);
                }
            }
        }

        Self {
            graph,
            id_to_index,
            durations,
        }
    }

    /// Task ids in an order where every task follows all of its predecessors.
    /// `None` when the graph has a cycle; the validation gate reports those
    /// with the full cycle path before the passes get here.
    pub fn topological_order(&self) -> Option<Vec<NodeIndex>> {
        toposort(&self.graph, None).ok()
    }
}
