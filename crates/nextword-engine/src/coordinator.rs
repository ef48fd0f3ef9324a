//! Debounce timing and in-flight request bookkeeping.
//!
//! Every trigger gets a fresh, strictly increasing [`RequestId`] and replaces
//! whatever was pending before it. The debounce timer and the network
//! response both come back tagged with the id they were issued for; anything
//! whose id is no longer the pending one is dropped. Correctness therefore
//! never depends on the order in which timers fire or responses arrive.

use crate::buffer::TextBufferState;
use crate::trigger;
use std::fmt;
use std::time::Duration;

/// Identifies one scheduled prediction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    /// The raw sequence number.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Snapshot of the trigger a request was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerKey {
    /// The request this trigger started.
    pub id: RequestId,
    /// Caret offset when the trigger fired.
    pub caret: usize,
    /// The word before the trailing space.
    pub word: String,
    /// Text sent to the prediction service (trimmed content).
    pub query: String,
}

/// Why a response was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleReason {
    /// A newer trigger replaced the request, or it was cancelled.
    Superseded,
    /// The caret left the trigger position while the request was in flight.
    Ineligible,
}

/// Outcome of matching a finished request against the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The response belongs to the live trigger and may be applied.
    Current(TriggerKey),
    /// The response must be discarded.
    Stale(StaleReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Debouncing,
    InFlight,
}

#[derive(Debug)]
struct PendingRequest {
    key: TriggerKey,
    phase: Phase,
}

/// Issues request ids and decides which timers and responses still count.
#[derive(Debug)]
pub struct RequestCoordinator {
    last_id: u64,
    pending: Option<PendingRequest>,
    delay: Duration,
}

impl RequestCoordinator {
    /// Create a coordinator with the given debounce delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            last_id: 0,
            pending: None,
            delay,
        }
    }

    /// The debounce delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Change the debounce delay. Applies to the next trigger.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Start (or restart) the debounce for `buffer`.
    ///
    /// Invalidates any pending request, timer or in-flight fetch alike, and
    /// returns the new id. Returns `None`, leaving everything untouched, when
    /// `buffer` is not a trigger position.
    pub fn schedule(&mut self, buffer: &TextBufferState) -> Option<RequestId> {
        let word = trigger::trigger_word(buffer.content())?;
        if !buffer.caret_at_end() {
            return None;
        }
        self.last_id += 1;
        let id = RequestId(self.last_id);
        let key = TriggerKey {
            id,
            caret: buffer.caret(),
            word: word.to_owned(),
            query: buffer.content().trim().to_owned(),
        };
        if let Some(prev) = self.pending.replace(PendingRequest {
            key,
            phase: Phase::Debouncing,
        }) {
            tracing::trace!(superseded = %prev.key.id, by = %id, "request superseded");
        }
        Some(id)
    }

    /// The debounce timer for `id` fired.
    ///
    /// Returns the query to send if `id` is still pending and not yet sent.
    /// Timers of superseded triggers return `None`, so their fetch never
    /// happens.
    pub fn dispatch(&mut self, id: RequestId) -> Option<String> {
        let pending = self.pending.as_mut()?;
        if pending.key.id != id || pending.phase != Phase::Debouncing {
            return None;
        }
        pending.phase = Phase::InFlight;
        Some(pending.key.query.clone())
    }

    /// A response for `id` arrived; `live` is the host buffer right now.
    ///
    /// A current response clears the pending slot. A response for the pending
    /// id whose caret has since moved off-trigger also clears it.
    pub fn resolve(&mut self, id: RequestId, live: &TextBufferState) -> Resolution {
        let is_current = self
            .pending
            .as_ref()
            .is_some_and(|p| p.key.id == id && p.phase == Phase::InFlight);
        if !is_current {
            return Resolution::Stale(StaleReason::Superseded);
        }
        let Some(pending) = self.pending.take() else {
            return Resolution::Stale(StaleReason::Superseded);
        };
        if trigger::is_eligible(live) {
            Resolution::Current(pending.key)
        } else {
            Resolution::Stale(StaleReason::Ineligible)
        }
    }

    /// Forget the pending request. Its timer and response become stale.
    pub fn cancel(&mut self) -> Option<RequestId> {
        self.pending.take().map(|p| p.key.id)
    }

    /// The id of the request that is allowed to complete, if any.
    pub fn pending_id(&self) -> Option<RequestId> {
        self.pending.as_ref().map(|p| p.key.id)
    }

    /// Whether the pending request has been sent and awaits its response.
    pub fn is_in_flight(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|p| p.phase == Phase::InFlight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn coordinator() -> RequestCoordinator {
        RequestCoordinator::new(Duration::from_millis(300))
    }

    #[test]
    fn ids_strictly_increase() {
        let mut c = coordinator();
        let buf = TextBufferState::at_end("xin chao ");
        let a = c.schedule(&buf).unwrap();
        let b = c.schedule(&buf).unwrap();
        assert!(b > a);
        assert_eq!(c.pending_id(), Some(b));
    }

    #[test]
    fn ineligible_buffer_is_not_scheduled() {
        let mut c = coordinator();
        assert_eq!(c.schedule(&TextBufferState::at_end("xin chao")), None);
        assert_eq!(c.schedule(&TextBufferState::new("xin chao ", 2)), None);
        assert_eq!(c.pending_id(), None);
    }

    #[test]
    fn only_the_last_timer_in_a_burst_dispatches() {
        let mut c = coordinator();
        let ids: Vec<_> = ["xin ", "xin chao ", "xin chao ban "]
            .into_iter()
            .map(|text| c.schedule(&TextBufferState::at_end(text)).unwrap())
            .collect();

        assert_eq!(c.dispatch(ids[0]), None);
        assert_eq!(c.dispatch(ids[1]), None);
        assert_eq!(c.dispatch(ids[2]).as_deref(), Some("xin chao ban"));
        // A timer can only dispatch once.
        assert_eq!(c.dispatch(ids[2]), None);
    }

    #[test]
    fn current_response_is_accepted_once() {
        let mut c = coordinator();
        let buf = TextBufferState::at_end("xin chao ");
        let id = c.schedule(&buf).unwrap();
        c.dispatch(id);

        match c.resolve(id, &buf) {
            Resolution::Current(key) => {
                assert_eq!(key.word, "chao");
                assert_eq!(key.caret, 9);
                assert_eq!(key.query, "xin chao");
            }
            other => panic!("expected current, got {other:?}"),
        }
        assert_eq!(c.pending_id(), None);
        assert_eq!(c.resolve(id, &buf), Resolution::Stale(StaleReason::Superseded));
    }

    #[test]
    fn older_response_is_stale() {
        let mut c = coordinator();
        let buf = TextBufferState::at_end("xin chao ");
        let old = c.schedule(&buf).unwrap();
        c.dispatch(old);
        let new = c.schedule(&buf).unwrap();
        c.dispatch(new);

        assert_eq!(c.resolve(old, &buf), Resolution::Stale(StaleReason::Superseded));
        assert_eq!(c.pending_id(), Some(new));
    }

    #[test]
    fn response_after_caret_moved_is_stale() {
        let mut c = coordinator();
        let id = c.schedule(&TextBufferState::at_end("xin chao ")).unwrap();
        c.dispatch(id);

        let moved = TextBufferState::at_end("xin chao b");
        assert_eq!(c.resolve(id, &moved), Resolution::Stale(StaleReason::Ineligible));
        assert_eq!(c.pending_id(), None);
    }

    #[test]
    fn cancel_invalidates_timer_and_response() {
        let mut c = coordinator();
        let buf = TextBufferState::at_end("xin chao ");
        let id = c.schedule(&buf).unwrap();
        assert_eq!(c.cancel(), Some(id));
        assert_eq!(c.dispatch(id), None);
        assert_eq!(c.resolve(id, &buf), Resolution::Stale(StaleReason::Superseded));
    }

    #[test]
    fn in_flight_only_after_dispatch() {
        let mut c = coordinator();
        let id = c.schedule(&TextBufferState::at_end("chao ")).unwrap();
        assert!(!c.is_in_flight());
        c.dispatch(id);
        assert!(c.is_in_flight());
    }
}
