//! Memory ledger for missed coupons.
//!
//! A memory-style event that misses stores an amount. The next memory-style
//! event that executes recovers everything stored since the last executed
//! event by walking predecessor links backwards:
//!
//! ```text
//! recover(e) = 0                                  if e executed or unobserved
//!            = stored(e) + recover(predecessor)   otherwise
//! ```
//!
//! Stopping at the first executed event means every stored amount is
//! recovered by exactly one later event.

use super::event::{EventState, IncomeBarrierEvent};

/// Read-only view of a sequence's events and their states.
#[derive(Debug, Clone, Copy)]
pub struct MemoryLedger<'a> {
    events: &'a [IncomeBarrierEvent],
    states: &'a [EventState],
}

impl<'a> MemoryLedger<'a> {
    /// Creates a ledger. `states[i]` is the state of `events[i]`; states may
    /// be shorter than events while a pass is in progress.
    pub fn new(events: &'a [IncomeBarrierEvent], states: &'a [EventState]) -> Self {
        Self { events, states }
    }

    /// Unclaimed memory recoverable from the event at `index` backwards.
    pub fn recover(&self, index: usize) -> f64 {
        let mut recovered = 0.0;
        let mut cursor = Some(index);

        while let Some(current) = cursor {
            match self.states.get(current).and_then(EventState::observation) {
                Some(observation) if !observation.executed => {
                    recovered += observation.stored_memory;
                    cursor = self.events.get(current).and_then(IncomeBarrierEvent::predecessor);
                }
                _ => break,
            }
        }

        recovered
    }
}
