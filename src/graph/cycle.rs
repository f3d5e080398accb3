//! Cycle detection over the predecessor relation.
//!
//! Depth-first with an explicit frame stack rather than recursion, so a long
//! dependency chain cannot exhaust the call stack. Nodes are colored
//! not-visited / on-stack / done; re-entering an on-stack node closes a cycle
//! and the on-stack segment from that node to the current one is the report.

use crate::task::Task;
use std::collections::HashMap;

#[derive(Clone, Copy, PartialEq)]
enum Visit {
    Unvisited,
    OnStack,
    Done,
}

/// Returns the first cycle found in the batch's dependency relation, as the
/// ordered list of task ids on it, or `None` when the relation is acyclic.
///
/// Every task is tried as a traversal root in batch order and fully-visited
/// nodes are skipped, so detection does not depend on which task happens to
/// be listed first. A task naming itself as predecessor is a cycle of length
/// one. Edges to ids outside the batch are skipped here; the validation layer
/// reports those as dangling references before this runs.
pub fn find_cycle(tasks: &[Task]) -> Option<Vec<i32>> {
    let mut predecessors: HashMap<i32, Vec<i32>> = HashMap::with_capacity(tasks.len());
    for task in tasks {
        let preds = task
            .predecessors
            .iter()
            .map(|edge| edge.predecessor_id)
            .collect();
        predecessors.insert(task.id, preds);
    }

    let mut state: HashMap<i32, Visit> = tasks
        .iter()
        .map(|task| (task.id, Visit::Unvisited))
        .collect();

    for root in tasks {
        if state[&root.id] != Visit::Unvisited {
            continue;
        }

        // Each frame is (task id, index of the next predecessor edge to walk).
        let mut stack: Vec<(i32, usize)> = vec![(root.id, 0)];
        state.insert(root.id, Visit::OnStack);

        while let Some(&(id, edge_idx)) = stack.last() {
            let preds = predecessors.get(&id).map(Vec::as_slice).unwrap_or(&[]);
            if edge_idx >= preds.len() {
                state.insert(id, Visit::Done);
                stack.pop();
                continue;
            }
            stack.last_mut().expect("frame just read").1 += 1;

            let next = preds[edge_idx];
            match state.get(&next) {
                Some(Visit::Unvisited) => {
                    state.insert(next, Visit::OnStack);
                    stack.push((next, 0));
                }
                Some(Visit::OnStack) => {
                    let entry = stack
                        .iter()
                        .position(|&(on_stack, _)| on_stack == next)
                        .expect("on-stack node must be in the frame stack");
                    return Some(stack[entry..].iter().map(|&(task_id, _)| task_id).collect());
                }
                Some(Visit::Done) | None => {}
            }
        }
    }

    None
}
