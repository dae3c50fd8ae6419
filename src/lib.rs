//! # docwatch
//!
//! Client side of a realtime document watch protocol. A [`Watch`] keeps a
//! single bidirectional Listen stream open against a document database and
//! turns the backend's change notifications into ordered, diffed
//! [`QuerySnapshot`]s delivered to an [`EventListener`].
//!
//! ## Modules
//!
//! - [`watch`] - the watch state machine, snapshots and listener plumbing
//! - [`model`] - document paths, document versions and the persistent sorted
//!   [`DocumentSet`]
//! - [`proto`] - protobuf messages of the Listen call
//! - [`ListenTransport`] - the stream abstraction, with a tonic implementation
//!   in [`GrpcListenTransport`]
//!
//! ## Quick start
//!
//! ```ignore
//! let config = WatchConfig::new()?.validate()?;
//! let transport = Arc::new(GrpcListenTransport::new(&config.listen.database, &config.network)?);
//! let path = DocumentPath::resolve(&config.listen.database, "rooms/lobby");
//! let watch = Watch::for_document(transport, path, config);
//! let registration = watch.start(&Handle::current(), |event: WatchEvent| {
//!     if let Ok(snapshot) = event {
//!         println!("{} changes", snapshot.changes().len());
//!     }
//! })?;
//! ```

mod config;
mod constants;
mod errors;
pub mod model;
mod network;
pub mod proto;
pub(crate) mod utils;
pub mod watch;

pub use config::*;
pub use errors::*;
pub use model::*;
pub use network::grpc::*;
pub use network::*;
pub use watch::*;


#[cfg(test)]
pub(crate) mod test_utils;
