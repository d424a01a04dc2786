//! Identifier-to-node registry and its builder.
//!
//! # Responsibility
//! - Wrap every flat record in a node with an empty child list.
//! - Answer id lookups, root and orphan queries over the built nodes.
//!
//! # Invariants
//! - Exactly one node per distinct id across all three collections.
//! - Duplicate ids resolve last-write-wins in processing order; the winner
//!   replaces the earlier node in its arena slot.
//! - Nodes are never removed once built.

use super::node::{Node, NodeIndex};
use super::{TreeError, TreeResult};
use crate::model::record::{ChangeSet, FlatRecord, RecordId, RecordOrigin};
use log::{debug, info};
use std::collections::HashMap;

/// Counters collected while building a registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Records read across all collections.
    pub records: usize,
    /// Distinct nodes kept.
    pub nodes: usize,
    /// Records that replaced an earlier record with the same id.
    pub duplicates: usize,
}

/// Flat map from record id to node. Nodes live in an arena addressed by
/// `NodeIndex`; child lists hold indices into the same arena.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    nodes: Vec<Node>,
    by_id: HashMap<RecordId, NodeIndex>,
}

impl Registry {
    /// Builds unlinked nodes for every record in `change_set`.
    ///
    /// # Errors
    /// - `TreeError::MissingId` when any record has an absent or null id.
    pub fn build(change_set: &ChangeSet) -> TreeResult<Self> {
        Self::build_with_stats(change_set).map(|(registry, _)| registry)
    }

    /// Same as [`Registry::build`], also returning build counters.
    pub fn build_with_stats(change_set: &ChangeSet) -> TreeResult<(Self, BuildStats)> {
        let mut registry = Self {
            nodes: Vec::with_capacity(change_set.record_count()),
            by_id: HashMap::with_capacity(change_set.record_count()),
        };
        let mut stats = BuildStats::default();

        for (origin, record) in change_set.records() {
            stats.records += 1;
            let id = required_id(origin, record)?;
            let node = Node::new(record.to_record(), origin);
            match registry.by_id.get(id).copied() {
                Some(index) => {
                    let shadowed = registry.nodes[index.as_usize()].origin();
                    debug!(
                        "event=duplicate_id module=tree id={} kept={}:{} dropped={}:{}",
                        id, origin.kind, origin.position, shadowed.kind, shadowed.position
                    );
                    registry.nodes[index.as_usize()] = node;
                    stats.duplicates += 1;
                }
                None => {
                    let index = NodeIndex::new(registry.nodes.len());
                    registry.nodes.push(node);
                    registry.by_id.insert(id.clone(), index);
                }
            }
        }

        stats.nodes = registry.nodes.len();
        info!(
            "event=registry_build module=tree status=ok records={} nodes={} duplicates={}",
            stats.records, stats.nodes, stats.duplicates
        );
        Ok((registry, stats))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Looks up one node by record id.
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.index_of(id).map(|index| self.node(index))
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.by_id.get(id).copied()
    }

    /// Returns the node at `index`.
    ///
    /// # Panics
    /// - When `index` was not produced by this registry.
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.as_usize()]
    }

    pub(crate) fn node_mut(&mut self, index: NodeIndex) -> &mut Node {
        &mut self.nodes[index.as_usize()]
    }

    /// Children of `index` in link order.
    pub fn child_nodes(&self, index: NodeIndex) -> impl Iterator<Item = &Node> + '_ {
        self.node(index)
            .children()
            .iter()
            .map(move |child| self.node(*child))
    }

    /// Children of the node with `id`, or `None` when the id is unknown.
    pub fn children_of(&self, id: &str) -> Option<Vec<&Node>> {
        let index = self.index_of(id)?;
        Some(self.child_nodes(index).collect())
    }

    /// All ids, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &RecordId> + '_ {
        self.by_id.keys()
    }

    /// All nodes with their indices, in first-seen processing order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(slot, node)| (NodeIndex::new(slot), node))
    }

    /// Nodes whose record declares no parent.
    pub fn roots(&self) -> impl Iterator<Item = (NodeIndex, &Node)> + '_ {
        self.iter()
            .filter(|(_, node)| node.record().parent_id().is_none())
    }

    /// Nodes whose declared parent is not in the registry.
    pub fn orphans(&self) -> impl Iterator<Item = (NodeIndex, &Node)> + '_ {
        self.iter().filter(move |(_, node)| {
            node.record()
                .parent_id()
                .is_some_and(|parent_id| !self.contains(parent_id.as_str()))
        })
    }
}

// Any present id is a valid key, including an empty string.
pub(crate) fn required_id(origin: RecordOrigin, record: &dyn FlatRecord) -> TreeResult<&RecordId> {
    record.id().ok_or(TreeError::MissingId {
        kind: origin.kind,
        position: origin.position,
    })
}
