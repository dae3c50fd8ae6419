use std::sync::atomic::AtomicU8;
use std::sync::atomic::Ordering;

use tokio_util::sync::CancellationToken;

/// Lifecycle of a watch.
///
/// ```text
/// Idle -> Connecting -> Streaming <-> Reconnecting
///             |             |              |
///             +-------------+--------------+--> Closed
/// ```
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Idle = 0,
    Connecting = 1,
    Streaming = 2,
    Reconnecting = 3,
    Closed = 4,
}

impl WatchState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => WatchState::Idle,
            1 => WatchState::Connecting,
            2 => WatchState::Streaming,
            3 => WatchState::Reconnecting,
            _ => WatchState::Closed,
        }
    }

    pub fn is_active(self) -> bool {
        matches!(
            self,
            WatchState::Connecting | WatchState::Streaming | WatchState::Reconnecting
        )
    }
}

/// State read outside the worker: the lifecycle and the removal signal
#[derive(Debug)]
pub(crate) struct WatchShared {
    state: AtomicU8,
    /// Fired when the listener registration is removed
    pub(crate) removed: CancellationToken,
}

impl WatchShared {
    pub(crate) fn new() -> Self {
        Self {
            state: AtomicU8::new(WatchState::Idle as u8),
            removed: CancellationToken::new(),
        }
    }

    pub(crate) fn state(&self) -> WatchState {
        WatchState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Idle -> Connecting. Fails for any other state, including Closed.
    pub(crate) fn activate(&self) -> bool {
        self.state
            .compare_exchange(
                WatchState::Idle as u8,
                WatchState::Connecting as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Moves to `next` unless the watch is already closed
    pub(crate) fn transition(
        &self,
        next: WatchState,
    ) -> bool {
        self.state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                (current != WatchState::Closed as u8).then_some(next as u8)
            })
            .is_ok()
    }

    /// Closes the watch. Returns true for exactly one caller, and only when
    /// the watch was active at that moment.
    pub(crate) fn deactivate(&self) -> bool {
        let previous = WatchState::from_u8(self.state.swap(WatchState::Closed as u8, Ordering::AcqRel));
        previous.is_active()
    }
}
