//! Snapshot store and query facade.
//!
//! - **Immutable snapshots**: an index/registry pair is never mutated after
//!   construction; readers hold an `Arc` and need no locking
//! - **Single-writer replace**: a new snapshot becomes visible with one map
//!   insert once fully built; the last swap wins
//! - **Parse seam**: parsing is delegated to a [`ParseCollaborator`] and is the
//!   only suspension point

pub mod parse;
pub mod service;
pub mod store;

pub use parse::ParseCollaborator;
pub use service::{LanguageService, Session};
pub use store::{DocumentSnapshot, DocumentStore};
