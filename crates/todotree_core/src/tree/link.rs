//! Parent/child linking pass.
//!
//! # Responsibility
//! - Append each node to the child list of the parent its record declares.
//!
//! # Invariants
//! - Records are visited in processing order, so a parent's children keep
//!   input order across collections (projects, sections, tasks).
//! - A parent id that is not in the registry leaves the child unlinked.
//! - Records shadowed by a later duplicate id are not linked.
//! - Linking the same registry twice appends every child twice; build a fresh
//!   registry per pass.

use super::registry::{required_id, Registry};
use super::{TreeError, TreeResult};
use crate::model::record::ChangeSet;
use log::{debug, info};

/// Counters collected while linking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Children appended to a parent.
    pub linked: usize,
    /// Records declaring no parent.
    pub roots: usize,
    /// Records whose parent id is not in the registry.
    pub dangling: usize,
    /// Records replaced by a later duplicate id.
    pub shadowed: usize,
}

/// Links every node in `registry` under its declared parent.
///
/// `change_set` must be the one `registry` was built from.
///
/// # Errors
/// - `TreeError::MissingId` when a record has no id.
/// - `TreeError::UnregisteredRecord` when a record id is not in `registry`.
pub fn link(registry: &mut Registry, change_set: &ChangeSet) -> TreeResult<LinkStats> {
    let mut stats = LinkStats::default();

    for (origin, record) in change_set.records() {
        let id = required_id(origin, record)?;
        let index = registry
            .index_of(id.as_str())
            .ok_or_else(|| TreeError::UnregisteredRecord {
                kind: origin.kind,
                id: id.clone(),
            })?;
        if registry.node(index).origin() != origin {
            stats.shadowed += 1;
            continue;
        }

        let Some(parent_id) = record.parent_id() else {
            stats.roots += 1;
            continue;
        };
        match registry.index_of(parent_id.as_str()) {
            Some(parent) => {
                registry.node_mut(parent).push_child(index);
                stats.linked += 1;
            }
            None => {
                debug!(
                    "event=dangling_parent module=tree kind={} id={} parent_id={}",
                    origin.kind, id, parent_id
                );
                stats.dangling += 1;
            }
        }
    }

    info!(
        "event=registry_link module=tree status=ok linked={} roots={} dangling={} shadowed={}",
        stats.linked, stats.roots, stats.dangling, stats.shadowed
    );
    Ok(stats)
}

/// Builds and links a registry in one call.
///
/// Every project, section and task becomes reachable by id; nodes with
/// children can be searched downward. There is no single root.
pub fn map_id_to_branch(change_set: &ChangeSet) -> TreeResult<Registry> {
    let mut registry = Registry::build(change_set)?;
    link(&mut registry, change_set)?;
    Ok(registry)
}
