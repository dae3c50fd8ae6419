//! gRPC implementation of [`ListenTransport`](crate::ListenTransport) on top of
//! a lazily connected tonic channel.
mod listen_transport;
pub use listen_transport::*;
