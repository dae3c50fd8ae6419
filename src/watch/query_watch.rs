use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::debug;

use super::EventListener;
use super::ListenTarget;
use super::SnapshotDispatcher;
use super::WatchShared;
use super::WatchState;
use super::WatchWorker;
use crate::model::DocumentComparator;
use crate::model::DocumentPath;
use crate::ListenTransport;
use crate::Result;
use crate::StateTransitionError;
use crate::WatchConfig;

/// Realtime watch over one listen target.
///
/// A watch is started at most once. Its listener then receives a snapshot
/// every time the backend reports a consistent result set that differs from
/// the previous one, and at most one terminal error.
///
/// # Examples
/// ```ignore
/// let watch = Watch::for_document(transport, path, WatchConfig::new()?.validate()?);
/// let registration = watch.start(&Handle::current(), |event: WatchEvent| match event {
///     Ok(snapshot) => println!("{} documents", snapshot.len()),
///     Err(e) => eprintln!("watch failed: {e}"),
/// })?;
/// // later
/// registration.remove();
/// ```
pub struct Watch<T>
where T: ListenTransport
{
    transport: Arc<T>,
    target: ListenTarget,
    comparator: DocumentComparator,
    config: WatchConfig,
    shared: Arc<WatchShared>,
}

impl<T> Watch<T>
where T: ListenTransport
{
    /// Watches a single document. Snapshots contain zero or one document.
    pub fn for_document(
        transport: Arc<T>,
        path: DocumentPath,
        config: WatchConfig,
    ) -> Self {
        Self::new(
            transport,
            ListenTarget::Document(path),
            DocumentComparator::by_path(),
            config,
        )
    }

    /// Watches a query. `comparator` must order documents the way the query
    /// sorts them.
    pub fn for_query(
        transport: Arc<T>,
        parent: impl Into<String>,
        structured_query: Vec<u8>,
        comparator: DocumentComparator,
        config: WatchConfig,
    ) -> Self {
        Self::new(
            transport,
            ListenTarget::Query {
                parent: parent.into(),
                structured_query,
            },
            comparator,
            config,
        )
    }

    pub fn new(
        transport: Arc<T>,
        target: ListenTarget,
        comparator: DocumentComparator,
        config: WatchConfig,
    ) -> Self {
        Self {
            transport,
            target,
            comparator,
            config,
            shared: Arc::new(WatchShared::new()),
        }
    }

    pub fn target(&self) -> &ListenTarget {
        &self.target
    }

    pub fn state(&self) -> WatchState {
        self.shared.state()
    }

    /// Activates the watch and begins the first connection attempt.
    ///
    /// Both the stream worker and the listener task are spawned on
    /// `executor`; the listener is never invoked from the worker itself.
    ///
    /// # Errors
    /// [`StateTransitionError::AlreadyStarted`] if the watch was started
    /// before, even if it has been stopped since.
    pub fn start<L>(
        &self,
        executor: &Handle,
        listener: L,
    ) -> Result<ListenerRegistration>
    where L: EventListener {
        if !self.shared.activate() {
            return Err(StateTransitionError::AlreadyStarted.into());
        }
        debug!(listen_target = ?self.target, "starting watch");

        let dispatcher = SnapshotDispatcher::spawn(executor, listener, self.shared.removed.clone());
        let worker = WatchWorker::new(
            self.transport.clone(),
            self.target.clone(),
            self.comparator.clone(),
            &self.config,
            self.shared.clone(),
            dispatcher,
        );
        executor.spawn(worker.run());

        Ok(ListenerRegistration {
            shared: self.shared.clone(),
        })
    }
}

/// Handle returned by [`Watch::start`]. Cloning it is cheap; any clone may
/// stop the watch, including from inside the listener.
#[derive(Debug, Clone)]
pub struct ListenerRegistration {
    shared: Arc<WatchShared>,
}

impl ListenerRegistration {
    /// Stops the watch without notifying the listener. Idempotent.
    pub fn remove(&self) {
        if self.shared.deactivate() {
            debug!("listener removed");
        }
        self.shared.removed.cancel();
    }

    pub fn state(&self) -> WatchState {
        self.shared.state()
    }
}
