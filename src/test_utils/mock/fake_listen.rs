use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::time::timeout;
use tokio::time::Instant;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tonic::async_trait;
use tonic::Status;

use crate::proto::ListenRequest;
use crate::proto::ListenResponse;
use crate::EventListener;
use crate::ListenResponseStream;
use crate::ListenTransport;
use crate::QuerySnapshot;
use crate::StreamError;
use crate::WatchError;
use crate::WatchEvent;

const WAIT: Duration = Duration::from_secs(300);

/// Server side of one opened listen stream
pub struct FakeListenStream {
    pub request: ListenRequest,
    pub opened_at: Instant,
    responses: mpsc::UnboundedSender<Result<ListenResponse, StreamError>>,
}

impl FakeListenStream {
    pub fn send(
        &self,
        response: ListenResponse,
    ) {
        let _ = self.responses.send(Ok(response));
    }

    pub fn send_all(
        &self,
        responses: impl IntoIterator<Item = ListenResponse>,
    ) {
        for response in responses {
            self.send(response);
        }
    }

    pub fn fail(
        &self,
        status: Status,
    ) {
        let _ = self.responses.send(Err(Box::new(status)));
    }

    /// Ends the stream without an error
    pub fn complete(self) {}

    pub fn resume_token(&self) -> Option<Vec<u8>> {
        self.request
            .added_target()
            .and_then(|target| target.resume_token())
            .map(<[u8]>::to_vec)
    }

    /// True once the watch dropped its end of the stream
    pub fn is_closed(&self) -> bool {
        self.responses.is_closed()
    }
}

pub struct FakeListenTransport {
    opened: mpsc::UnboundedSender<FakeListenStream>,
    open_failures: Mutex<VecDeque<Status>>,
}

impl FakeListenTransport {
    /// Makes the next `open` call fail with `status`
    pub fn fail_next_open(
        &self,
        status: Status,
    ) {
        if let Ok(mut failures) = self.open_failures.lock() {
            failures.push_back(status);
        }
    }
}

#[async_trait]
impl ListenTransport for FakeListenTransport {
    async fn open(
        &self,
        mut requests: ReceiverStream<ListenRequest>,
    ) -> Result<ListenResponseStream, StreamError> {
        let request = requests
            .next()
            .await
            .ok_or_else(|| Status::internal("stream opened without a request"))?;

        let failure = self.open_failures.lock().ok().and_then(|mut f| f.pop_front());
        if let Some(status) = failure {
            return Err(Box::new(status));
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let _ = self.opened.send(FakeListenStream {
            request,
            opened_at: Instant::now(),
            responses: tx,
        });
        Ok(UnboundedReceiverStream::new(rx).boxed())
    }
}

pub struct FakeListenServer {
    opened: mpsc::UnboundedReceiver<FakeListenStream>,
}

impl FakeListenServer {
    /// Waits for the watch to open its next stream
    pub async fn next_stream(&mut self) -> FakeListenStream {
        timeout(WAIT, self.opened.recv())
            .await
            .expect("watch did not open a stream")
            .expect("transport dropped")
    }

    pub fn try_next_stream(&mut self) -> Option<FakeListenStream> {
        self.opened.try_recv().ok()
    }
}

pub fn fake_listen_transport() -> (Arc<FakeListenTransport>, FakeListenServer) {
    let (tx, rx) = mpsc::unbounded_channel();
    let transport = Arc::new(FakeListenTransport {
        opened: tx,
        open_failures: Mutex::new(VecDeque::new()),
    });
    (transport, FakeListenServer { opened: rx })
}

/// Listener side: every event the listener received, in order
pub struct EventProbe {
    events: mpsc::UnboundedReceiver<WatchEvent>,
}

pub fn event_probe() -> (impl EventListener, EventProbe) {
    let (tx, rx) = mpsc::unbounded_channel();
    let listener = move |event: WatchEvent| {
        let _ = tx.send(event);
    };
    (listener, EventProbe { events: rx })
}

impl EventProbe {
    pub async fn next_event(&mut self) -> WatchEvent {
        timeout(WAIT, self.events.recv())
            .await
            .expect("listener was not invoked")
            .expect("listener task finished")
    }

    pub async fn next_snapshot(&mut self) -> QuerySnapshot {
        match self.next_event().await {
            Ok(snapshot) => snapshot,
            Err(e) => panic!("expected a snapshot, got error: {e}"),
        }
    }

    pub async fn next_error(&mut self) -> WatchError {
        match self.next_event().await {
            Ok(snapshot) => panic!("expected an error, got snapshot: {snapshot:?}"),
            Err(e) => e,
        }
    }

    /// Asserts nothing is queued after letting spawned tasks run
    pub async fn assert_silent(&mut self) {
        settle().await;
        match self.events.try_recv() {
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => {}
            Ok(event) => panic!("unexpected event: {event:?}"),
        }
    }

    /// Resolves once the listener task has finished
    pub async fn closed(&mut self) -> bool {
        matches!(timeout(WAIT, self.events.recv()).await, Ok(None))
    }
}

/// Lets every ready task on the current runtime make progress
pub async fn settle() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}
