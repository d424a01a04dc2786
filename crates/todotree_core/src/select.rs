//! Task selection under suffix-marked records.
//!
//! # Responsibility
//! - Find projects, sections and tasks whose name ends with a marker suffix.
//! - Pick tasks at or beneath each marked record (serial, parallel, all).
//!
//! # Invariants
//! - Selected tasks are unique by id and keep first-selected order.
//! - Rejected tasks are every input task not selected, in input order.

use crate::model::record::{ChangeSet, FlatRecord, Task};
use crate::tree::walk::{iter_childless_tasks, iter_tasks};
use crate::tree::{NodeIndex, Registry};
use std::collections::HashSet;

/// Which tasks beneath a marked record are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectMode {
    /// Next childless task only.
    Serial,
    /// Every childless task.
    Parallel,
    /// Every task, including tasks with subtasks.
    All,
}

/// Outcome of one selection pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection<'a> {
    pub selected: Vec<&'a Task>,
    pub rejected: Vec<&'a Task>,
}

/// Returns whether the trimmed name of `record` ends with `suffix`.
pub fn has_suffix(record: &dyn FlatRecord, suffix: &str) -> bool {
    record.display_name().trim().ends_with(suffix)
}

/// Selects tasks at or beneath records marked by `suffix`.
///
/// `registry` must be built and linked from `change_set`. Marked records
/// shadowed by a later duplicate id are ignored.
pub fn select<'a>(
    mode: SelectMode,
    change_set: &'a ChangeSet,
    registry: &'a Registry,
    suffix: &str,
) -> Selection<'a> {
    let mut selected = Vec::new();
    let mut seen = HashSet::new();

    for start in marked_nodes(change_set, registry, suffix) {
        let picked: Vec<&'a Task> = match mode {
            SelectMode::Serial => iter_childless_tasks(registry, start).take(1).collect(),
            SelectMode::Parallel => iter_childless_tasks(registry, start).collect(),
            SelectMode::All => iter_tasks(registry, start).collect(),
        };
        for task in picked {
            if let Some(id) = task.id.as_ref() {
                if seen.insert(id.as_str()) {
                    selected.push(task);
                }
            }
        }
    }

    let rejected = change_set
        .tasks
        .iter()
        .filter(|task| {
            task.id
                .as_ref()
                .map_or(true, |id| !seen.contains(id.as_str()))
        })
        .collect();

    Selection { selected, rejected }
}

/// Next childless task under each marked record.
pub fn select_serial<'a>(
    change_set: &'a ChangeSet,
    registry: &'a Registry,
    suffix: &str,
) -> Selection<'a> {
    select(SelectMode::Serial, change_set, registry, suffix)
}

/// Every childless task under each marked record.
pub fn select_parallel<'a>(
    change_set: &'a ChangeSet,
    registry: &'a Registry,
    suffix: &str,
) -> Selection<'a> {
    select(SelectMode::Parallel, change_set, registry, suffix)
}

/// Every task under each marked record.
pub fn select_all<'a>(
    change_set: &'a ChangeSet,
    registry: &'a Registry,
    suffix: &str,
) -> Selection<'a> {
    select(SelectMode::All, change_set, registry, suffix)
}

fn marked_nodes(change_set: &ChangeSet, registry: &Registry, suffix: &str) -> Vec<NodeIndex> {
    change_set
        .records()
        .filter(|(_, record)| has_suffix(*record, suffix))
        .filter_map(|(origin, record)| {
            let index = registry.index_of(record.id()?.as_str())?;
            (registry.node(index).origin() == origin).then_some(index)
        })
        .collect()
}
