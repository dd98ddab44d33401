//! Bounded per-agent history of performed actions.
//!
//! Each tick, an agent that is acting records the kind of action it is doing.
//! Only the last `capacity` records are kept. Slots are `Option<A>` so a
//! fresh history reports nothing rather than `capacity` default actions.

use tracing::warn;

use crate::config::HistoryConfig;
use crate::ring_buffer::RingBuffer;

/// The last N actions an agent performed, most recent first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionHistory<A> {
    records: RingBuffer<Option<A>>,
}

impl<A> ActionHistory<A> {
    /// Create a history remembering `capacity` actions.
    ///
    /// A zero capacity is replaced by one, with a warning.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = if capacity == 0 {
            warn!("action history capacity of 0 requested, falling back to 1");
            1
        } else {
            capacity
        };
        Self {
            records: RingBuffer::new(capacity),
        }
    }

    /// Create a history sized from configuration.
    #[must_use]
    pub fn from_config(config: &HistoryConfig) -> Self {
        Self::new(config.capacity)
    }

    /// Record `action` as the most recent one, forgetting the oldest record
    /// once the history is full.
    pub fn record(&mut self, action: A) {
        self.records.push(Some(action));
    }

    /// Most recent action, if any was recorded.
    #[must_use]
    pub fn last(&self) -> Option<&A> {
        self.records.peek(0).as_ref()
    }

    /// The `n`-th most recent action, `0` being the latest.
    #[must_use]
    pub fn nth(&self, n: usize) -> Option<&A> {
        self.records.get(n).and_then(Option::as_ref)
    }

    /// Recorded actions from most recent to oldest.
    pub fn recent(&self) -> impl DoubleEndedIterator<Item = &A> + '_ {
        self.records.iter().filter_map(Option::as_ref)
    }

    /// Number of recorded actions still remembered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.filled()
    }

    /// `true` if nothing was recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.filled() == 0
    }

    /// Maximum number of remembered actions.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.records.capacity()
    }

    /// Forget every recorded action.
    pub fn clear(&mut self) {
        self.records.reset();
    }
}

impl<A: PartialEq> ActionHistory<A> {
    /// `true` if `action` is among the remembered actions.
    #[must_use]
    pub fn has_done(&self, action: &A) -> bool {
        self.recent().any(|done| done == action)
    }

    /// How many remembered records equal `action`.
    #[must_use]
    pub fn count(&self, action: &A) -> usize {
        self.recent().filter(|&done| done == action).count()
    }
}

impl<A> Default for ActionHistory<A> {
    fn default() -> Self {
        Self::from_config(&HistoryConfig::default())
    }
}
