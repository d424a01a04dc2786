//! Registry node wrapping one flat record.

use crate::model::record::{FlatRecord, Record, RecordId, RecordOrigin};

/// Arena slot of one node inside a `Registry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub(crate) fn new(slot: usize) -> Self {
        Self(slot)
    }

    pub fn as_usize(self) -> usize {
        self.0
    }
}

/// One record plus its linked children.
///
/// A node holds no parent pointer; parents are discoverable only top-down.
#[derive(Debug, Clone)]
pub struct Node {
    record: Record,
    origin: RecordOrigin,
    children: Vec<NodeIndex>,
}

impl Node {
    pub(crate) fn new(record: Record, origin: RecordOrigin) -> Self {
        Self {
            record,
            origin,
            children: Vec::new(),
        }
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Input position of the wrapped record.
    pub fn origin(&self) -> RecordOrigin {
        self.origin
    }

    pub fn id(&self) -> Option<&RecordId> {
        self.record.id()
    }

    /// Children in link order.
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub(crate) fn push_child(&mut self, child: NodeIndex) {
        self.children.push(child);
    }
}

// Children are arena indices and may loop back; compare payload only.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.record == other.record
    }
}
