//! Transport abstraction for the bidirectional Listen call.
//!
//! A watch only needs to open a stream, push requests into it and read
//! responses until it ends. [`ListenTransport`] captures exactly that, so the
//! state machine runs unchanged against the gRPC channel in [`grpc`] or an
//! in-memory server in tests.
pub mod grpc;

use futures::stream::BoxStream;
#[cfg(test)]
use mockall::automock;
use tokio_stream::wrappers::ReceiverStream;
use tonic::async_trait;

use crate::proto::ListenRequest;
use crate::proto::ListenResponse;
use crate::StreamError;

/// Responses of one listen stream. The stream ending is a completion, an
/// `Err` item is a stream failure.
pub type ListenResponseStream = BoxStream<'static, std::result::Result<ListenResponse, StreamError>>;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ListenTransport: Send + Sync + 'static {
    /// Opens a new listen stream.
    ///
    /// # Arguments
    /// * `requests` - Outbound half of the stream. The transport forwards every
    ///   request pushed into the channel until the sender is dropped.
    ///
    /// # Errors
    /// Failures to establish the stream are returned as [`StreamError`] and are
    /// classified exactly like failures read from an open stream.
    async fn open(
        &self,
        requests: ReceiverStream<ListenRequest>,
    ) -> std::result::Result<ListenResponseStream, StreamError>;
}
