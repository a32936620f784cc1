use crate::clock::{Clock, SystemClock};
use crate::lane::Lane;
use crate::notifier::ProgressNotifier;
use crate::pump::PumpMsg;
use crate::types::{EntityId, NotifyError, NotifyResult, Progress, SubmitOutcome};
use anyhow::{anyhow, Result};
use crossbeam_channel::Sender;
use log::{debug, trace};
use parking_lot::Mutex;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

/// Default minimum interval between two progress emissions for one entity.
pub const DEFAULT_UPDATE_DELAY_MS: u64 = 1000;

enum Emission {
    Progress(EntityId, Progress),
    Paused(EntityId),
    Interrupted(EntityId, bool),
    Succeeded(EntityId),
    Failed(EntityId),
    Canceled(EntityId),
}

type Emissions = SmallVec<[Emission; 2]>;

/// Tracks every live entity's coalescing lane and drives the notifier.
///
/// Thread-safe: producers may submit from any thread; the lane map is a
/// single critical section so a buffer swap and its deadline bookkeeping are
/// atomic. Notifier callbacks run outside the lock on the submitting thread.
pub struct ProgressHub {
    notifier: Arc<dyn ProgressNotifier>,
    clock: Arc<dyn Clock>,
    min_delay_ms: u64,
    lanes: Mutex<HashMap<EntityId, Lane>>,
    waker: Mutex<Option<Sender<PumpMsg>>>,
}

impl ProgressHub {
    pub fn builder() -> ProgressHubBuilder {
        ProgressHubBuilder::new()
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Submits a progress reading for `id`, creating its lane on first use.
    pub fn submit_progress(&self, id: &EntityId, progress: Progress) -> SubmitOutcome {
        let now = self.clock.now_ms();
        let (outcome, emissions) = {
            let mut lanes = self.lanes.lock();
            let lane = lanes.entry(id.clone()).or_insert_with(Lane::new);
            let (outcome, emit) = lane.submit(now, self.min_delay_ms, progress);
            let mut emissions = Emissions::new();
            if let Some(update) = emit {
                emissions.push(Emission::Progress(id.clone(), update));
            }
            (outcome, emissions)
        };

        trace!("progress for {id:?} at t={now}: {outcome:?}");
        self.deliver(emissions);
        if outcome == SubmitOutcome::Deferred {
            self.wake_pump();
        }
        outcome
    }

    /// Immediate pause emission; buffered progress is discarded as stale.
    pub fn pause(&self, id: &EntityId) -> NotifyResult<()> {
        self.bypass(id, Emission::Paused(id.clone()))
    }

    /// An interruption is a pause when the transfer can resume, a terminal
    /// failure otherwise.
    pub fn interrupt(&self, id: &EntityId, resumable: bool) -> NotifyResult<()> {
        if resumable {
            self.bypass(id, Emission::Interrupted(id.clone(), true))
        } else {
            self.finish(id, true, Emission::Failed(id.clone()))
        }
    }

    /// Terminal success. Flushes a buffered progress update first so the last
    /// observed state is never silently dropped.
    pub fn complete(&self, id: &EntityId) -> NotifyResult<()> {
        self.finish(id, true, Emission::Succeeded(id.clone()))
    }

    /// Terminal failure, flushing buffered progress first.
    pub fn fail(&self, id: &EntityId) -> NotifyResult<()> {
        self.finish(id, true, Emission::Failed(id.clone()))
    }

    /// Terminal cancellation. Buffered progress is discarded, not flushed:
    /// the user abandoned the entity and stale progress would only flicker.
    pub fn cancel(&self, id: &EntityId) -> NotifyResult<()> {
        self.finish(id, false, Emission::Canceled(id.clone()))
    }

    /// Emits every buffered update whose deadline has passed. Returns the
    /// number of emissions.
    pub fn poll_due(&self) -> usize {
        let now = self.clock.now_ms();
        let emissions: Emissions = {
            let mut lanes = self.lanes.lock();
            lanes
                .iter_mut()
                .filter_map(|(id, lane)| {
                    lane.poll(now)
                        .map(|update| Emission::Progress(id.clone(), update))
                })
                .collect()
        };

        let count = emissions.len();
        if count > 0 {
            debug!("deadline pass at t={now} emitted {count} update(s)");
        }
        self.deliver(emissions);
        count
    }

    /// Earliest pending deadline across all lanes, for the pump loop.
    pub fn next_deadline(&self) -> Option<u64> {
        self.lanes.lock().values().filter_map(Lane::deadline_ms).min()
    }

    pub(crate) fn attach_waker(&self, waker: Sender<PumpMsg>) {
        *self.waker.lock() = Some(waker);
    }

    fn bypass(&self, id: &EntityId, emission: Emission) -> NotifyResult<()> {
        let now = self.clock.now_ms();
        let live = {
            let mut lanes = self.lanes.lock();
            let lane = lanes.entry(id.clone()).or_insert_with(Lane::new);
            lane.bypass(now)
        };
        if !live {
            return Err(NotifyError::AlreadyFinished(id.clone()));
        }
        self.deliver(SmallVec::from_iter([emission]));
        Ok(())
    }

    fn finish(&self, id: &EntityId, flush: bool, emission: Emission) -> NotifyResult<()> {
        let flushed = {
            let mut lanes = self.lanes.lock();
            let lane = lanes.entry(id.clone()).or_insert_with(Lane::new);
            lane.finish(flush)
        };
        let Some(flushed) = flushed else {
            return Err(NotifyError::AlreadyFinished(id.clone()));
        };

        let mut emissions = Emissions::new();
        if let Some(update) = flushed {
            emissions.push(Emission::Progress(id.clone(), update));
        }
        emissions.push(emission);
        self.deliver(emissions);
        Ok(())
    }

    fn deliver(&self, emissions: Emissions) {
        for emission in emissions {
            match emission {
                Emission::Progress(id, progress) => self.notifier.notify_progress(&id, progress),
                Emission::Paused(id) => self.notifier.notify_paused(&id),
                Emission::Interrupted(id, resumable) => {
                    self.notifier.notify_interrupted(&id, resumable)
                }
                Emission::Succeeded(id) => self.notifier.notify_succeeded(&id),
                Emission::Failed(id) => self.notifier.notify_failed(&id),
                Emission::Canceled(id) => self.notifier.notify_canceled(&id),
            }
        }
    }

    fn wake_pump(&self) {
        if let Some(waker) = self.waker.lock().as_ref() {
            // A full channel or a gone pump just means nobody is sleeping on
            // the old deadline.
            let _ = waker.try_send(PumpMsg::Wake);
        }
    }
}

pub struct ProgressHubBuilder {
    notifier: Option<Arc<dyn ProgressNotifier>>,
    clock: Option<Arc<dyn Clock>>,
    min_delay_ms: u64,
}

impl ProgressHubBuilder {
    pub fn new() -> Self {
        Self {
            notifier: None,
            clock: None,
            min_delay_ms: DEFAULT_UPDATE_DELAY_MS,
        }
    }

    pub fn notifier(mut self, notifier: Arc<dyn ProgressNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn min_delay_ms(mut self, delay: u64) -> Self {
        self.min_delay_ms = delay;
        self
    }

    pub fn build(self) -> Result<Arc<ProgressHub>> {
        Ok(Arc::new(ProgressHub {
            notifier: self.notifier.ok_or_else(|| anyhow!("missing notifier"))?,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock::new())),
            min_delay_ms: self.min_delay_ms,
            lanes: Mutex::new(HashMap::new()),
            waker: Mutex::new(None),
        }))
    }
}

impl Default for ProgressHubBuilder {
    fn default() -> Self {
        Self::new()
    }
}
