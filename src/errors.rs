//! Watch Protocol Error Hierarchy
//!
//! Errors are split by who observes them: [`Error`] is returned to callers of
//! the public API (configuration, channel setup, lifecycle misuse), while
//! [`WatchError`] is the terminal failure handed to a snapshot listener.

use config::ConfigError;
use tonic::Code;
use tonic::Status;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

/// Failure surfaced by a listen stream, either while opening it or while
/// reading from it. Classification looks for a [`tonic::Status`] anywhere in
/// the source chain.
pub type StreamError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Infrastructure-level failures (network, channel setup)
    #[error(transparent)]
    System(#[from] SystemError),

    /// Configuration loading or validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Terminal listen protocol failures
    #[error(transparent)]
    Watch(#[from] WatchError),

    /// Illegal watch lifecycle transitions
    #[error(transparent)]
    StateTransition(#[from] StateTransitionError),

    /// Unrecoverable failures requiring process termination
    #[error("Fatal error: {0}")]
    Fatal(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
}

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// Malformed endpoint addresses
    #[error("Invalid URI format: {0}")]
    InvalidURI(String),

    /// Header values that cannot travel as gRPC metadata
    #[error("Invalid metadata value for {key}")]
    InvalidMetadata { key: &'static str },

    /// gRPC transport layer errors
    #[error(transparent)]
    TonicError(#[from] Box<tonic::transport::Error>),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StateTransitionError {
    /// A watch is activated at most once, even after it was stopped
    #[error("Can't restart an already active watch")]
    AlreadyStarted,
}

/// Terminal failure delivered to a listener. Transient stream failures never
/// show up here; they are absorbed by reconnecting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WatchError {
    /// The backend sent a message the listen protocol does not allow
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The backend removed the listen target
    #[error("{message} ({code:?})")]
    ServerRejection { code: Code, message: String },

    /// The stream failed with a status that is not worth retrying
    #[error("Listen stream failed with {code:?}: {message}")]
    Stream { code: Code, message: String },

    /// Existence filters kept disagreeing with the local result set
    #[error("Existence filter mismatched {attempts} times without a match in between")]
    FilterMismatch { attempts: u32 },
}

impl WatchError {
    /// The gRPC code that best classifies this failure
    pub fn code(&self) -> Code {
        match self {
            WatchError::InvalidArgument(_) => Code::InvalidArgument,
            WatchError::ServerRejection { code, .. } => *code,
            WatchError::Stream { code, .. } => *code,
            WatchError::FilterMismatch { .. } => Code::DataLoss,
        }
    }

    /// Builds the terminal error for a failed stream, preserving the status
    /// code and message when one can be extracted.
    pub(crate) fn from_stream_error(error: &StreamError) -> Self {
        match stream_status(error.as_ref()) {
            Some(status) => WatchError::Stream {
                code: status.code(),
                message: status.message().to_string(),
            },
            None => WatchError::Stream {
                code: Code::Unknown,
                message: error.to_string(),
            },
        }
    }
}

// ============== Stream error classification ============== //

/// Extracts the gRPC status from an error or any of its sources
pub(crate) fn stream_status<'a>(error: &'a (dyn std::error::Error + 'static)) -> Option<&'a Status> {
    let mut current = Some(error);
    while let Some(err) = current {
        if let Some(status) = err.downcast_ref::<Status>() {
            return Some(status);
        }
        current = err.source();
    }
    None
}

/// Whether a stream failure should stop the watch instead of reconnecting.
/// Failures without a status cannot be classified and are permanent.
pub(crate) fn is_permanent_error(error: &StreamError) -> bool {
    match stream_status(error.as_ref()) {
        None => true,
        Some(status) => !matches!(
            status.code(),
            Code::Cancelled
                | Code::Unknown
                | Code::DeadlineExceeded
                | Code::ResourceExhausted
                | Code::Internal
                | Code::Unavailable
                | Code::Unauthenticated
        ),
    }
}

/// Whether the backend asked for a longer backoff due to overload
pub(crate) fn is_resource_exhausted(error: &StreamError) -> bool {
    stream_status(error.as_ref()).is_some_and(|status| status.code() == Code::ResourceExhausted)
}

// ============== Conversion Implementations ============== //
impl From<NetworkError> for Error {
    fn from(e: NetworkError) -> Self {
        Error::System(SystemError::Network(e))
    }
}

impl From<tonic::transport::Error> for Error {
    fn from(err: tonic::transport::Error) -> Self {
        NetworkError::TonicError(Box::new(err)).into()
    }
}
