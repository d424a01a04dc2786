//! Downward traversal in display order.
//!
//! # Responsibility
//! - Order children the way a task list shows them without reordering the
//!   registry's link-order child lists.
//! - Yield tasks at and beneath a node, post-order.
//!
//! # Invariants
//! - Display order: tasks by `child_order`, then sections by `section_order`,
//!   then subprojects by `child_order`; ties keep link order.
//! - Every node is yielded at most once per walk, so cyclic links terminate.

use super::node::{Node, NodeIndex};
use super::registry::Registry;
use crate::model::record::{Record, Task};
use std::collections::HashSet;

fn display_rank(record: &Record) -> (u8, i64) {
    match record {
        Record::Task(task) => (1, task.child_order),
        Record::Section(section) => (2, section.section_order),
        Record::Project(project) => (3, project.child_order),
    }
}

/// Children of `index` in display order.
pub fn ordered_children(registry: &Registry, index: NodeIndex) -> Vec<NodeIndex> {
    let mut children = registry.node(index).children().to_vec();
    children.sort_by_key(|child| display_rank(registry.node(*child).record()));
    children
}

/// Post-order walk from one start node.
pub struct PostOrder<'a> {
    registry: &'a Registry,
    stack: Vec<(NodeIndex, bool)>,
    visited: HashSet<NodeIndex>,
}

impl<'a> PostOrder<'a> {
    pub fn new(registry: &'a Registry, start: NodeIndex) -> Self {
        Self {
            registry,
            stack: vec![(start, false)],
            visited: HashSet::from([start]),
        }
    }
}

impl<'a> Iterator for PostOrder<'a> {
    type Item = (NodeIndex, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, expanded)) = self.stack.pop() {
            if expanded {
                return Some((index, self.registry.node(index)));
            }
            self.stack.push((index, true));
            for child in ordered_children(self.registry, index).into_iter().rev() {
                if self.visited.insert(child) {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}

/// Every task at and beneath `start`.
pub fn iter_tasks(registry: &Registry, start: NodeIndex) -> impl Iterator<Item = &Task> + '_ {
    PostOrder::new(registry, start).filter_map(|(_, node)| node.record().as_task())
}

/// Tasks with no children at and beneath `start`.
pub fn iter_childless_tasks(
    registry: &Registry,
    start: NodeIndex,
) -> impl Iterator<Item = &Task> + '_ {
    PostOrder::new(registry, start)
        .filter(|(_, node)| !node.has_children())
        .filter_map(|(_, node)| node.record().as_task())
}

/// Depth-first outline of the subtree under `start`, children in display
/// order. Depth is zero for `start`.
pub fn outline(registry: &Registry, start: NodeIndex) -> Vec<(usize, &Node)> {
    let mut lines = Vec::new();
    let mut stack = vec![(start, 0)];
    let mut visited = HashSet::from([start]);
    while let Some((index, depth)) = stack.pop() {
        lines.push((depth, registry.node(index)));
        for child in ordered_children(registry, index).into_iter().rev() {
            if visited.insert(child) {
                stack.push((child, depth + 1));
            }
        }
    }
    lines
}
