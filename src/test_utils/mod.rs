//! Shared helpers for unit tests: a tracing initializer, protobuf builders for
//! listen responses and an in-memory listen server.
mod common;
mod mock;

pub use common::*;
pub use mock::*;
