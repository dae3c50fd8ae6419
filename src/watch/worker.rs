//! Stream worker of a single watch.
//!
//! The worker is the only owner of the watch's mutable state (document set,
//! pending changes, resume token, backoff, stream handle). Its `select!` loop
//! multiplexes three inputs:
//!
//! ```text
//!   removal token ──┐
//!   reconnect timer ┼──> WatchWorker ──> SnapshotDispatcher ──> listener
//!   listen stream ──┘
//! ```

use std::future::pending;
use std::sync::Arc;

use futures::StreamExt;
use prost_types::Timestamp;
use tokio::sync::mpsc;
use tokio::time::sleep_until;
use tokio::time::Instant;
use tokio_stream::wrappers::ReceiverStream;
use tonic::Code;
use tonic::Status;
use tracing::debug;
use tracing::info;
use tracing::trace;
use tracing::warn;

use super::apply_changes;
use super::ChangeMap;
use super::ListenTarget;
use super::QuerySnapshot;
use super::SnapshotDispatcher;
use super::WatchShared;
use super::WatchState;
use crate::constants::WATCH_TARGET_ID;
use crate::errors::is_permanent_error;
use crate::errors::is_resource_exhausted;
use crate::model::DocumentComparator;
use crate::model::DocumentPath;
use crate::model::DocumentSet;
use crate::proto::listen_response::ResponseType;
use crate::proto::target_change::TargetChangeType;
use crate::proto::DocumentChange;
use crate::proto::ExistenceFilter;
use crate::proto::ListenRequest;
use crate::proto::ListenResponse;
use crate::proto::TargetChange;
use crate::utils::backoff::ExponentialBackoff;
use crate::ListenConfig;
use crate::ListenResponseStream;
use crate::ListenTransport;
use crate::StreamError;
use crate::WatchConfig;
use crate::WatchError;

/// An open listen stream: responses in, and the request sender that keeps
/// the outbound half alive.
struct OpenStream {
    responses: ListenResponseStream,
    _requests: mpsc::Sender<ListenRequest>,
}

pub(crate) struct WatchWorker<T>
where T: ListenTransport
{
    transport: Arc<T>,
    target: ListenTarget,
    listen: ListenConfig,
    shared: Arc<WatchShared>,
    dispatcher: SnapshotDispatcher,

    backoff: ExponentialBackoff,
    stream: Option<OpenStream>,
    next_connect: Option<Instant>,

    documents: DocumentSet,
    changes: ChangeMap,
    resume_token: Option<Vec<u8>>,
    /// Whether the backend reported the result set as caught up on this stream
    current: bool,
    has_pushed: bool,
    /// Mismatching existence filters since the last matching one. Restarts
    /// and snapshots in between do not reset it.
    filter_mismatches: u32,
}

impl<T> WatchWorker<T>
where T: ListenTransport
{
    pub(crate) fn new(
        transport: Arc<T>,
        target: ListenTarget,
        comparator: DocumentComparator,
        config: &WatchConfig,
        shared: Arc<WatchShared>,
        dispatcher: SnapshotDispatcher,
    ) -> Self {
        Self {
            transport,
            target,
            listen: config.listen.clone(),
            shared,
            dispatcher,
            backoff: ExponentialBackoff::new(config.backoff),
            stream: None,
            next_connect: None,
            documents: DocumentSet::empty(comparator),
            changes: ChangeMap::default(),
            resume_token: None,
            current: false,
            has_pushed: false,
            filter_mismatches: 0,
        }
    }

    pub(crate) async fn run(mut self) {
        let removed = self.shared.removed.clone();
        self.schedule_connect();

        loop {
            let next_connect = self.next_connect;
            tokio::select! {
                // Use biased to ensure branch order
                biased;
                // P0: listener removed
                _ = removed.cancelled() => {
                    debug!("watch stopped by caller");
                    self.stream = None;
                    break;
                }
                // P1: reconnect timer
                _ = wait_until(next_connect) => {
                    self.next_connect = None;
                    self.open_stream().await;
                }
                // P2: stream events
                item = next_response(&mut self.stream) => {
                    match item {
                        Some(Ok(response)) => self.on_response(response),
                        Some(Err(error)) => self.on_stream_error(error),
                        None => {
                            debug!("listen stream completed");
                            self.on_stream_error(Box::new(Status::unknown("listen stream completed")));
                        }
                    }
                }
            }

            if self.shared.state() == WatchState::Closed {
                break;
            }
        }

        trace!("watch worker finished");
    }

    // ============== Connection management ============== //

    /// Schedules the next connection after the randomized delay of the
    /// current backoff step, then advances the backoff.
    fn schedule_connect(&mut self) {
        let delay = self.backoff.randomized_delay();
        self.next_connect = Some(Instant::now() + delay);
        self.backoff.advance();
        debug!(
            target_id = WATCH_TARGET_ID,
            attempt = self.backoff.attempt(),
            delay_ms = delay.as_millis() as u64,
            "listen stream scheduled"
        );
    }

    async fn open_stream(&mut self) {
        self.current = false;
        let removed = self.shared.removed.clone();

        let target = self.target.to_proto(WATCH_TARGET_ID, self.resume_token.as_deref());
        let request = ListenRequest::add_target(self.listen.database.clone(), target);
        trace!(resuming = self.resume_token.is_some(), "sending add target request");

        let result = tokio::select! {
            biased;
            _ = removed.cancelled() => return,
            result = connect(self.transport.clone(), request, self.listen.request_buffer_size) => result,
        };

        match result {
            Ok(stream) => {
                self.stream = Some(stream);
                if self.shared.transition(WatchState::Streaming) {
                    info!(target_id = WATCH_TARGET_ID, "listen stream open");
                }
            }
            Err(error) => self.on_stream_error(error),
        }
    }

    /// Tears the stream down and reconnects with the current backoff
    fn reset_stream(&mut self) {
        self.stream = None;
        if self.shared.transition(WatchState::Reconnecting) {
            self.schedule_connect();
        }
    }

    /// Tears the stream down and, if the watch was still active, delivers
    /// `error` to the listener.
    fn close(
        &mut self,
        error: WatchError,
    ) {
        self.stream = None;
        self.next_connect = None;
        if self.shared.deactivate() {
            warn!(target_id = WATCH_TARGET_ID, %error, "closing watch");
            self.dispatcher.send_error(error);
        }
    }

    fn on_stream_error(
        &mut self,
        error: StreamError,
    ) {
        if is_permanent_error(&error) {
            self.close(WatchError::from_stream_error(&error));
            return;
        }

        if is_resource_exhausted(&error) {
            self.backoff.advance();
        }
        debug!(
            attempt = self.backoff.attempt(),
            %error,
            "listen stream failed, reconnecting"
        );
        self.changes.clear();
        self.reset_stream();
    }

    // ============== Listen responses ============== //

    fn on_response(
        &mut self,
        response: ListenResponse,
    ) {
        match response.response_type {
            Some(ResponseType::TargetChange(change)) => self.on_target_change(change),
            Some(ResponseType::DocumentChange(change)) => self.on_document_change(change),
            Some(ResponseType::DocumentDelete(delete)) => {
                trace!(document = %delete.document, "document deleted");
                self.changes.tombstone(DocumentPath::new(&delete.document));
            }
            Some(ResponseType::DocumentRemove(remove)) => {
                trace!(document = %remove.document, "document removed");
                self.changes.tombstone(DocumentPath::new(&remove.document));
            }
            Some(ResponseType::Filter(filter)) => self.on_filter(filter),
            None => self.close(WatchError::InvalidArgument(
                "Encountered invalid listen response type".to_string(),
            )),
        }
    }

    fn on_target_change(
        &mut self,
        change: TargetChange,
    ) {
        let Ok(change_type) = TargetChangeType::try_from(change.target_change_type) else {
            self.close(WatchError::InvalidArgument(format!(
                "Encountered invalid target change type: {}",
                change.target_change_type
            )));
            return;
        };
        trace!(?change_type, target_ids = ?change.target_ids, "target change");
        let confirms_progress =
            !change.resume_token.is_empty() && change.affects_target(WATCH_TARGET_ID);

        match change_type {
            TargetChangeType::NoChange => {
                if change.target_ids.is_empty() && self.current {
                    if let Some(read_time) = change.read_time {
                        self.push_snapshot(read_time, &change.resume_token);
                    }
                }
            }
            TargetChangeType::Add => {
                let acknowledged =
                    !change.target_ids.is_empty() && change.target_ids.iter().all(|id| *id == WATCH_TARGET_ID);
                if !acknowledged {
                    self.close(WatchError::InvalidArgument(format!(
                        "Target ID must be {WATCH_TARGET_ID:#04x}"
                    )));
                    return;
                }
            }
            TargetChangeType::Remove => {
                let (code, message) = match &change.cause {
                    Some(cause) => (Code::from_i32(cause.code), cause.message.as_str()),
                    None => (Code::Cancelled, ""),
                };
                self.close(WatchError::ServerRejection {
                    code,
                    message: format!("Backend ended Listen stream: {message}"),
                });
                return;
            }
            TargetChangeType::Current => self.current = true,
            TargetChangeType::Reset => self.reset_docs(),
        }

        if confirms_progress {
            trace!("backend confirmed progress, resetting backoff");
            self.backoff.reset();
        }
    }

    fn on_document_change(
        &mut self,
        change: DocumentChange,
    ) {
        let changed = change.target_ids.contains(&WATCH_TARGET_ID);
        let removed = change.removed_target_ids.contains(&WATCH_TARGET_ID);
        if !changed && !removed {
            return;
        }

        let Some(document) = change.document else {
            self.close(WatchError::InvalidArgument(
                "Document change without a document".to_string(),
            ));
            return;
        };

        if changed {
            trace!(document = %document.name, "document changed");
            self.changes.upsert(document);
        } else {
            trace!(document = %document.name, "document left target");
            self.changes.tombstone(DocumentPath::new(&document.name));
        }
    }

    fn on_filter(
        &mut self,
        filter: ExistenceFilter,
    ) {
        let current_size = self.changes.projected_size(&self.documents);
        if i64::from(filter.count) == current_size as i64 {
            self.filter_mismatches = 0;
            return;
        }

        self.filter_mismatches += 1;
        info!(
            filter_count = filter.count,
            current_size,
            mismatches = self.filter_mismatches,
            "filter: count mismatch"
        );

        let limit = self.listen.max_filter_mismatches;
        if limit > 0 && self.filter_mismatches >= limit {
            self.close(WatchError::FilterMismatch {
                attempts: self.filter_mismatches,
            });
            return;
        }

        self.reset_docs();
        self.reset_stream();
    }

    /// Marks every known document as deleted and forgets the resume token.
    /// Documents still in the result set are sent again by the backend.
    fn reset_docs(&mut self) {
        self.changes.clear();
        self.resume_token = None;
        for path in self.documents.paths() {
            self.changes.tombstone(path.clone());
        }
        self.current = false;
    }

    /// Materializes pending changes at `read_time` and emits a snapshot if
    /// this is the first one or anything changed.
    fn push_snapshot(
        &mut self,
        read_time: Timestamp,
        next_resume_token: &[u8],
    ) {
        let change_set = self.changes.extract_changes(&self.documents, Some(read_time));
        let (documents, diff) = apply_changes(&self.documents, change_set);
        self.documents = documents;

        if !self.has_pushed || !diff.is_empty() {
            debug!(
                documents = self.documents.len(),
                changes = diff.len(),
                "pushing snapshot"
            );
            self.dispatcher
                .send_snapshot(QuerySnapshot::new(read_time, self.documents.clone(), diff));
            self.has_pushed = true;
        }

        self.changes.clear();
        self.resume_token = (!next_resume_token.is_empty()).then(|| next_resume_token.to_vec());
    }
}

/// Opens a stream whose first request adds the watch target
async fn connect<T>(
    transport: Arc<T>,
    request: ListenRequest,
    buffer_size: usize,
) -> std::result::Result<OpenStream, StreamError>
where T: ListenTransport {
    let (tx, rx) = mpsc::channel(buffer_size.max(1));
    tx.send(request)
        .await
        .map_err(|_| Status::internal("listen request channel closed"))?;

    let responses = transport.open(ReceiverStream::new(rx)).await?;
    Ok(OpenStream {
        responses,
        _requests: tx,
    })
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => pending().await,
    }
}

async fn next_response(stream: &mut Option<OpenStream>) -> Option<std::result::Result<ListenResponse, StreamError>> {
    match stream {
        Some(stream) => stream.responses.next().await,
        None => pending().await,
    }
}
