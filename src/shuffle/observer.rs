// Optional debug sink for the shuffle allocator
// The allocator never logs on its own, callers decide what to do with events

use tracing::{debug, trace};

use super::TrackIndex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShuffleEvent<'a> {
    /// Pool strategy picked `index` for `slot`.
    Drawn { slot: u32, index: TrackIndex },
    /// Fill phase finished; slots may still hold duplicates.
    Filled { draws: &'a [TrackIndex] },
    /// A duplicate slot was moved to a free value.
    Repaired {
        slot: u32,
        from: TrackIndex,
        to: TrackIndex,
    },
    Completed { len: u32 },
}

pub trait ShuffleObserver {
    fn on_event(&mut self, event: ShuffleEvent<'_>);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ShuffleObserver for NoopObserver {
    fn on_event(&mut self, _event: ShuffleEvent<'_>) {}
}

/// Forwards every event to `tracing` at debug/trace level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ShuffleObserver for TracingObserver {
    fn on_event(&mut self, event: ShuffleEvent<'_>) {
        match event {
            ShuffleEvent::Drawn { slot, index } => trace!(slot, index, "shuffle draw"),
            ShuffleEvent::Filled { draws } => debug!(?draws, "fill phase complete"),
            ShuffleEvent::Repaired { slot, from, to } => {
                debug!(slot, from, to, "repaired duplicate slot")
            }
            ShuffleEvent::Completed { len } => debug!(len, "shuffle complete"),
        }
    }
}
