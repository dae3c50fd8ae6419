//! Realtime watch protocol.
//!
//! A [`Watch`] keeps one listen stream open for one target and turns the
//! backend's change notifications into consistent, diffed [`QuerySnapshot`]s.
//!
//! # Architecture
//!
//! ```text
//! ListenTransport ──responses──> WatchWorker ──┬─ ChangeMap    (pending changes)
//!        ^                           │         └─ DocumentSet  (last emitted version)
//!        └──── add target ───────────┘
//!                                    │ on a caught-up, consistent read time
//!                                    ▼
//!                             apply_changes ──> SnapshotDispatcher ──> EventListener
//! ```
//!
//! # Guarantees
//!
//! - A listener sees snapshots only, or snapshots followed by exactly one
//!   error, or nothing more after its registration is removed.
//! - Transient stream failures are retried with exponential backoff and never
//!   reach the listener.
//! - Changes received on a broken stream are never merged with changes from
//!   the next one.
mod change_map;
mod dispatcher;
mod query_watch;
mod snapshot;
mod state;
mod target;
mod worker;

pub(crate) use change_map::*;
pub use dispatcher::EventListener;
pub use dispatcher::WatchEvent;
pub(crate) use dispatcher::SnapshotDispatcher;
pub use query_watch::*;
pub use snapshot::ChangeType;
pub use snapshot::DocumentChange;
pub use snapshot::QuerySnapshot;
pub(crate) use snapshot::apply_changes;
pub use state::WatchState;
pub(crate) use state::WatchShared;
pub use target::*;
pub(crate) use worker::WatchWorker;

#[cfg(test)]
mod change_map_test;
