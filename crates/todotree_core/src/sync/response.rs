//! Sync request and response payloads.
//!
//! # Invariants
//! - Only the resource types in `RESOURCE_TYPES` are requested.
//! - The token `"*"` asks for a full, non-incremental sync.

use super::{SyncError, SyncResult};
use crate::model::record::{ChangeSet, Label, Project, Section, Task};
use serde::{Deserialize, Serialize};

/// Token requesting every resource instead of an increment.
pub const FULL_SYNC_TOKEN: &str = "*";

/// Resource types read from the sync endpoint.
pub const RESOURCE_TYPES: [&str; 4] = ["items", "labels", "projects", "sections"];

/// Body of one sync request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncRequest {
    pub sync_token: String,
    pub resource_types: Vec<String>,
}

impl SyncRequest {
    pub fn new(sync_token: impl Into<String>) -> Self {
        Self {
            sync_token: sync_token.into(),
            resource_types: RESOURCE_TYPES.iter().map(|value| value.to_string()).collect(),
        }
    }

    /// Request for all data.
    pub fn full() -> Self {
        Self::new(FULL_SYNC_TOKEN)
    }

    pub fn is_full(&self) -> bool {
        self.sync_token == FULL_SYNC_TOKEN
    }
}

/// Decoded sync response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncResponse {
    #[serde(default)]
    pub full_sync: bool,
    pub sync_token: String,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Tasks, named `items` on the wire.
    #[serde(default)]
    pub items: Vec<Task>,
}

impl SyncResponse {
    pub fn from_json_str(value: &str) -> SyncResult<Self> {
        serde_json::from_str(value).map_err(SyncError::Decode)
    }

    pub fn from_slice(value: &[u8]) -> SyncResult<Self> {
        serde_json::from_slice(value).map_err(SyncError::Decode)
    }

    /// Returns whether any requested resource carries records.
    pub fn has_changes(&self) -> bool {
        !(self.labels.is_empty()
            && self.projects.is_empty()
            && self.sections.is_empty()
            && self.items.is_empty())
    }

    pub fn into_change_set(self) -> ChangeSet {
        ChangeSet {
            sync_token: Some(self.sync_token),
            full_sync: self.full_sync,
            labels: self.labels,
            projects: self.projects,
            sections: self.sections,
            tasks: self.items,
        }
    }
}
