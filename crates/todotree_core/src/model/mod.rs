//! Flat record model for sync change-sets.
//!
//! # Responsibility
//! - Define the project/section/task/label records delivered by a sync.
//! - Expose the identifier and effective parent of each record kind.
//!
//! # Invariants
//! - Record identifiers are opaque; they are only hashed and compared.
//! - Domain attributes not modelled here are kept as pass-through payload.

pub mod record;
