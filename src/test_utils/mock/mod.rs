//! In-memory stand-ins for the listen transport and the listener.
//!
//! [`FakeListenServer`] receives every stream the watch opens, together with
//! the add-target request it was opened with, and lets a test script the
//! backend's responses. [`EventProbe`] records what the listener observed.
mod fake_listen;
pub use fake_listen::*;
