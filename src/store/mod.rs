//! In-memory state document and its durable snapshot.
//!
//! All application data lives in one [`AppData`] document behind a single
//! async lock; the snapshot store serializes it to disk periodically, after
//! each mutation, and once on shutdown.

pub mod snapshot;
pub mod state;

pub use snapshot::{spawn_autosave, SnapshotStore, Store};
pub use state::AppData;
