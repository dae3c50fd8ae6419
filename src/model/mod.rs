//! Result-set model shared by the watch state machine and its snapshots.
//!
//! Everything here is immutable per version: mutating a [`DocumentSet`]
//! returns a new set that structurally shares storage with the previous one,
//! so a snapshot already handed to a listener stays valid.
mod document;
mod document_set;
mod path;

pub use document::*;
pub use document_set::*;
pub use path::*;

#[cfg(test)]
mod document_set_test;
#[cfg(test)]
mod path_test;
