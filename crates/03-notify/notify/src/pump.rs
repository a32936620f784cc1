use crate::hub::ProgressHub;
use anyhow::{Context, Result};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

#[derive(Clone, Copy, Debug)]
pub(crate) enum PumpMsg {
    Wake,
    Shutdown,
}

/// Owns the deadline thread; dropping the handle shuts the thread down.
pub struct PumpHandle {
    tx: Sender<PumpMsg>,
    join: Option<JoinHandle<()>>,
}

impl PumpHandle {
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.tx.send(PumpMsg::Shutdown);
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

impl Drop for PumpHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawns the real-time pump that sleeps until the hub's earliest deadline
/// and emits due updates. The hub wakes it whenever a new deferral creates an
/// earlier deadline.
pub fn spawn_pump(hub: Arc<ProgressHub>) -> Result<PumpHandle> {
    let (tx, rx) = bounded(16);
    hub.attach_waker(tx.clone());
    let join = std::thread::Builder::new()
        .name("notify-pump".to_owned())
        .spawn(move || pump_loop(hub, rx))
        .context("failed to spawn notify pump thread")?;
    Ok(PumpHandle {
        tx,
        join: Some(join),
    })
}

fn pump_loop(hub: Arc<ProgressHub>, rx: Receiver<PumpMsg>) {
    loop {
        let now = hub.now_ms();
        match hub.next_deadline() {
            Some(deadline) if deadline <= now => {
                hub.poll_due();
            }
            Some(deadline) => {
                match rx.recv_timeout(Duration::from_millis(deadline - now)) {
                    Ok(PumpMsg::Wake) => {}
                    Ok(PumpMsg::Shutdown) | Err(RecvTimeoutError::Disconnected) => return,
                    Err(RecvTimeoutError::Timeout) => {
                        hub.poll_due();
                    }
                }
            }
            None => match rx.recv() {
                Ok(PumpMsg::Wake) => {}
                Ok(PumpMsg::Shutdown) | Err(_) => return,
            },
        }
    }
}
