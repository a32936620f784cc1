//! Per-entity coalescing state machine.
//!
//! A lane is pure: it consumes timestamps and updates and reports what to
//! emit, leaving delivery and locking to the hub. Invariant: at most one
//! update is buffered at a time, and a buffered update is always the latest
//! one submitted.

use crate::types::{Progress, SubmitOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LaneState {
    Idle {
        last_emit_ms: Option<u64>,
    },
    Pending {
        deadline_ms: u64,
        buffered: Progress,
    },
    Finished,
}

#[derive(Clone, Debug)]
pub(crate) struct Lane {
    state: LaneState,
}

impl Lane {
    pub(crate) fn new() -> Self {
        Self {
            state: LaneState::Idle { last_emit_ms: None },
        }
    }

    pub(crate) fn is_finished(&self) -> bool {
        matches!(self.state, LaneState::Finished)
    }

    /// Earliest time a buffered update becomes due, if any.
    pub(crate) fn deadline_ms(&self) -> Option<u64> {
        match self.state {
            LaneState::Pending { deadline_ms, .. } => Some(deadline_ms),
            _ => None,
        }
    }

    /// Feeds one progress update at time `now`. Returns the outcome and the
    /// update to emit immediately, if any.
    pub(crate) fn submit(
        &mut self,
        now_ms: u64,
        min_delay_ms: u64,
        update: Progress,
    ) -> (SubmitOutcome, Option<Progress>) {
        match &mut self.state {
            LaneState::Idle { last_emit_ms } => {
                let elapsed_ok = match *last_emit_ms {
                    None => true,
                    Some(last) => now_ms.saturating_sub(last) >= min_delay_ms,
                };
                if elapsed_ok {
                    self.state = LaneState::Idle {
                        last_emit_ms: Some(now_ms),
                    };
                    (SubmitOutcome::Emitted, Some(update))
                } else {
                    let last = last_emit_ms.unwrap_or(now_ms);
                    self.state = LaneState::Pending {
                        deadline_ms: last + min_delay_ms,
                        buffered: update,
                    };
                    (SubmitOutcome::Deferred, None)
                }
            }
            LaneState::Pending { buffered, .. } => {
                // Replace, do not rearm: the deadline stays anchored to the
                // previous emission.
                *buffered = update;
                (SubmitOutcome::Coalesced, None)
            }
            LaneState::Finished => (SubmitOutcome::Rejected, None),
        }
    }

    /// Emits the buffered update when its deadline has passed.
    pub(crate) fn poll(&mut self, now_ms: u64) -> Option<Progress> {
        match self.state {
            LaneState::Pending {
                deadline_ms,
                buffered,
            } if deadline_ms <= now_ms => {
                self.state = LaneState::Idle {
                    last_emit_ms: Some(now_ms),
                };
                Some(buffered)
            }
            _ => None,
        }
    }

    /// Immediate non-terminal emission (pause, resumable interruption).
    ///
    /// Any buffered progress is discarded: it is stale once the entity is no
    /// longer actively progressing. Returns false when the lane is finished.
    pub(crate) fn bypass(&mut self, now_ms: u64) -> bool {
        if self.is_finished() {
            return false;
        }
        self.state = LaneState::Idle {
            last_emit_ms: Some(now_ms),
        };
        true
    }

    /// Terminal transition. Returns the buffered update to flush before the
    /// terminal emission (`flush` = true), or `None` when the lane was
    /// already finished.
    pub(crate) fn finish(&mut self, flush: bool) -> Option<Option<Progress>> {
        match self.state {
            LaneState::Finished => None,
            LaneState::Pending { buffered, .. } => {
                self.state = LaneState::Finished;
                Some(flush.then_some(buffered))
            }
            LaneState::Idle { .. } => {
                self.state = LaneState::Finished;
                Some(None)
            }
        }
    }
}
