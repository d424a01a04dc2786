//! Hierarchy reconstruction for task-manager sync data.
//! Turns flat project/section/task change-sets into an id-to-node forest.

pub mod logging;
pub mod model;
pub mod select;
pub mod sync;
pub mod tree;

pub use logging::{default_log_level, init_logging, logging_status, LogConfig, LoggingError};
pub use model::record::{
    ChangeSet, FlatRecord, Label, Project, Record, RecordId, RecordKind, RecordOrigin, Section,
    Task,
};
pub use select::{select, select_all, select_parallel, select_serial, SelectMode, Selection};
pub use sync::{
    read_changes, FileSyncSource, SyncError, SyncOutcome, SyncRequest, SyncResponse, SyncResult,
    SyncSource,
};
pub use tree::{
    link, map_id_to_branch, BuildStats, LinkStats, Node, NodeIndex, Registry, TreeError,
    TreeResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
