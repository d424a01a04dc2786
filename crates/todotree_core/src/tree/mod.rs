//! Hierarchy reconstruction over flat change-sets.
//!
//! # Responsibility
//! - Build an identifier-to-node registry from projects, sections and tasks.
//! - Link every node under the parent its record declares.
//! - Walk the resulting forest in display order.
//!
//! # Invariants
//! - There is no synthetic root; every parentless node is its own root.
//! - Construction is one build pass plus one link pass and always terminates,
//!   even when the declared parent edges form a cycle.
//! - Dangling parent references and duplicate ids never fail construction.

use crate::model::record::{RecordId, RecordKind};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod link;
pub mod node;
pub mod registry;
pub mod walk;

pub use link::{link, map_id_to_branch, LinkStats};
pub use node::{Node, NodeIndex};
pub use registry::{BuildStats, Registry};

/// Result type used by tree construction.
pub type TreeResult<T> = Result<T, TreeError>;

/// Errors from registry build and link passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Record carries no usable identifier.
    MissingId { kind: RecordKind, position: usize },
    /// Linker saw a record the registry was not built from.
    UnregisteredRecord { kind: RecordKind, id: RecordId },
}

impl Display for TreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingId { kind, position } => {
                write!(f, "{kind} at position {position} has no id")
            }
            Self::UnregisteredRecord { kind, id } => {
                write!(f, "{kind} {id} is not in the registry; build before linking")
            }
        }
    }
}

impl Error for TreeError {}
