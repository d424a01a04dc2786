//! Boundary to the remote sync API.
//!
//! # Responsibility
//! - Describe the request/response shapes exchanged with the sync endpoint.
//! - Turn one sync round into either "no changes" or a full change-set.
//!
//! # Invariants
//! - "No changes" is an outcome, never an error.
//! - Any change triggers a full re-read, so callers always get complete data.
//! - Transport, authentication and retry policy belong to `SyncSource`
//!   implementations, not to this module.

use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use crate::model::record::ChangeSet;

pub mod file_source;
pub mod response;

pub use file_source::FileSyncSource;
pub use response::{SyncRequest, SyncResponse, FULL_SYNC_TOKEN, RESOURCE_TYPES};

/// Result type used by sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors from reading a sync response.
#[derive(Debug)]
pub enum SyncError {
    /// Saved response could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Response body is not a valid sync payload.
    Decode(serde_json::Error),
    /// Source-specific failure (transport, auth, server status).
    Source(String),
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read sync response `{}`: {source}", path.display())
            }
            Self::Decode(err) => write!(f, "invalid sync response: {err}"),
            Self::Source(message) => write!(f, "sync source failed: {message}"),
        }
    }
}

impl Error for SyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Decode(err) => Some(err),
            Self::Source(_) => None,
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

/// Something that answers sync requests.
pub trait SyncSource {
    fn fetch(&self, request: &SyncRequest) -> SyncResult<SyncResponse>;
}

/// Result of one sync round.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// Nothing changed since `sync_token`.
    NoChanges,
    /// Complete data, fetched because something changed.
    Changes(ChangeSet),
}

/// Reads changes since `sync_token`.
///
/// An incremental response with any records is followed by one full read,
/// so the returned change-set always holds all data.
///
/// # Errors
/// - Propagates any `SyncError` raised by `source`.
pub fn read_changes<S>(source: &S, sync_token: &str) -> SyncResult<SyncOutcome>
where
    S: SyncSource + ?Sized,
{
    let request = SyncRequest::new(sync_token);
    let response = source.fetch(&request)?;
    if !response.has_changes() {
        info!("event=sync_read module=sync status=no_changes");
        return Ok(SyncOutcome::NoChanges);
    }

    let response = if response.full_sync || request.is_full() {
        response
    } else {
        info!("event=sync_read module=sync status=partial action=full_refresh");
        source.fetch(&SyncRequest::full())?
    };
    if !response.has_changes() {
        return Ok(SyncOutcome::NoChanges);
    }

    info!(
        "event=sync_read module=sync status=changes projects={} sections={} tasks={} labels={}",
        response.projects.len(),
        response.sections.len(),
        response.items.len(),
        response.labels.len()
    );
    Ok(SyncOutcome::Changes(response.into_change_set()))
}
