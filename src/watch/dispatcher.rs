use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use super::QuerySnapshot;
use crate::WatchError;

/// What a listener receives: a snapshot, or the single terminal error
pub type WatchEvent = std::result::Result<QuerySnapshot, WatchError>;

/// Receiver of watch events.
///
/// Events arrive one at a time on a task of the runtime passed to
/// `Watch::start`, never on the task that reads the stream. Any
/// `FnMut(WatchEvent)` closure is a listener.
pub trait EventListener: Send + 'static {
    fn on_event(
        &mut self,
        event: WatchEvent,
    );
}

impl<F> EventListener for F
where F: FnMut(WatchEvent) + Send + 'static
{
    fn on_event(
        &mut self,
        event: WatchEvent,
    ) {
        self(event)
    }
}

/// Hands events from the watch worker to the listener task.
///
/// Snapshots still queued when the registration is removed are dropped. The
/// listener task ends once the worker drops the dispatcher and the queue is
/// drained.
pub(crate) struct SnapshotDispatcher {
    tx: mpsc::UnboundedSender<WatchEvent>,
}

impl SnapshotDispatcher {
    pub(crate) fn spawn<L>(
        executor: &Handle,
        mut listener: L,
        removed: CancellationToken,
    ) -> Self
    where L: EventListener {
        let (tx, mut rx) = mpsc::unbounded_channel::<WatchEvent>();
        executor.spawn(async move {
            while let Some(event) = rx.recv().await {
                if event.is_ok() && removed.is_cancelled() {
                    trace!("listener removed, dropping queued snapshot");
                    continue;
                }
                listener.on_event(event);
            }
            trace!("snapshot dispatcher finished");
        });
        Self { tx }
    }

    pub(crate) fn send_snapshot(
        &self,
        snapshot: QuerySnapshot,
    ) {
        if self.tx.send(Ok(snapshot)).is_err() {
            trace!("listener task gone, snapshot discarded");
        }
    }

    pub(crate) fn send_error(
        &self,
        error: WatchError,
    ) {
        if self.tx.send(Err(error)).is_err() {
            trace!("listener task gone, error discarded");
        }
    }
}
