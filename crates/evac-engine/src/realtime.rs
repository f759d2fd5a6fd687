//! Wall-clock driver for an [`EvacWorld`] on a background thread.
//!
//! ```text
//! User Thread                      Run Thread
//!     |                                |
//!     |--spawn(world)----------------->| origin = now - world.clock_now()
//!     |                                | loop:
//!     |                                |   deadline = world.next_deadline()
//!     |                                |   stop_rx.recv_timeout(origin + deadline - now)
//!     |                                |   world.step_clock()
//!     |<--RunEvent [bounded(N)]--------|   event_tx.try_send(event)
//!     |                                |
//!     |--stop()----------------------->| world.stop_run(); exit loop
//!     |--join()----------------------->| returns world
//! ```
//!
//! The run thread owns the world exclusively; nothing is shared, so no
//! locks. Events are best-effort: if the channel is full the event is
//! dropped rather than stalling a timer. The world returned by
//! [`join`](RealtimeRun::join) always holds the full state.

use std::fmt;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};
use tracing::{debug, warn};

use crate::scheduler::RunState;
use crate::world::{EvacWorld, RunEvent};

/// Default capacity of the event channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

// ── Error types ──────────────────────────────────────────────────

/// Failure driving a world on a background thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RealtimeError {
    /// The run thread could not be spawned.
    ThreadSpawnFailed {
        /// OS error description.
        reason: String,
    },
    /// The run thread panicked; the world is lost.
    ThreadPanicked,
}

impl fmt::Display for RealtimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThreadSpawnFailed { reason } => write!(f, "thread spawn failed: {reason}"),
            Self::ThreadPanicked => write!(f, "run thread panicked"),
        }
    }
}

impl std::error::Error for RealtimeError {}

// ── RealtimeRun ──────────────────────────────────────────────────

/// A world being driven in wall-clock time.
///
/// Dropping a `RealtimeRun` stops the run and joins the thread.
pub struct RealtimeRun {
    stop_tx: Option<Sender<()>>,
    events: Receiver<RunEvent>,
    handle: Option<JoinHandle<EvacWorld>>,
}

impl RealtimeRun {
    /// Move `world` onto a new thread and play it until it finishes or is
    /// stopped. Start the run first; an idle world returns immediately.
    pub fn spawn(world: EvacWorld) -> Result<Self, RealtimeError> {
        Self::with_capacity(world, DEFAULT_EVENT_CAPACITY)
    }

    /// As [`spawn`](Self::spawn) with an explicit event channel capacity.
    pub fn with_capacity(world: EvacWorld, capacity: usize) -> Result<Self, RealtimeError> {
        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(1);
        let (event_tx, events) = crossbeam_channel::bounded(capacity.max(1));
        let handle = thread::Builder::new()
            .name("evac-run".into())
            .spawn(move || drive(world, &stop_rx, &event_tx))
            .map_err(|e| RealtimeError::ThreadSpawnFailed {
                reason: e.to_string(),
            })?;
        Ok(Self {
            stop_tx: Some(stop_tx),
            events,
            handle: Some(handle),
        })
    }

    /// Events published by the run thread. Disconnects when it exits.
    pub fn events(&self) -> &Receiver<RunEvent> {
        &self.events
    }

    /// Ask the run thread to stop at its next wake-up. Idempotent.
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            // The thread may already have exited.
            let _ = tx.try_send(());
        }
    }

    /// Whether the run thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Wait for the run thread and take back the world.
    ///
    /// Does not stop the run; call [`stop`](Self::stop) first to cut it
    /// short.
    pub fn join(mut self) -> Result<EvacWorld, RealtimeError> {
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| RealtimeError::ThreadPanicked),
            None => Err(RealtimeError::ThreadPanicked),
        }
    }
}

impl Drop for RealtimeRun {
    fn drop(&mut self) {
        self.stop();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Run-thread main loop.
fn drive(mut world: EvacWorld, stop_rx: &Receiver<()>, event_tx: &Sender<RunEvent>) -> EvacWorld {
    let origin = Instant::now()
        .checked_sub(world.clock_now())
        .unwrap_or_else(Instant::now);

    while world.state() == RunState::Running {
        let Some(deadline) = world.next_deadline() else {
            break;
        };
        let wait = (origin + deadline).saturating_duration_since(Instant::now());
        match stop_rx.recv_timeout(wait) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                world.stop_run();
                break;
            }
        }

        if let Some(event) = world.step_clock() {
            publish(event_tx, event);
        }
    }
    debug!(state = %world.state(), tick = %world.tick(), "run thread exiting");
    world
}

fn publish(tx: &Sender<RunEvent>, event: RunEvent) {
    match tx.try_send(event) {
        Ok(()) | Err(TrySendError::Disconnected(_)) => {}
        Err(TrySendError::Full(_)) => warn!("event channel full, event dropped"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::PlacementMode;
    use crate::config::SimConfig;
    use evac_core::Cell;

    fn corridor(len: u32, tick_ms: u64) -> EvacWorld {
        let cfg = SimConfig {
            rows: 1,
            cols: len,
            agent_count: 0,
            placement: PlacementMode::Manual,
            tick_period: Duration::from_millis(tick_ms),
            hazard_period: Duration::from_millis(tick_ms * 3),
            ..SimConfig::default()
        };
        let mut world = EvacWorld::new(cfg).unwrap();
        world.grid_mut().add_exit(Cell::new(len as i32 - 1, 0));
        world.spawn_agent(Cell::new(0, 0)).unwrap();
        world
    }

    #[test]
    fn plays_a_short_run_to_the_end() {
        let mut world = corridor(5, 1);
        world.start_run().unwrap();
        let run = RealtimeRun::spawn(world).unwrap();

        let mut saw_summary = false;
        for event in run.events().iter() {
            if let RunEvent::Tick(report) = event {
                saw_summary |= report.summary.is_some();
            }
        }
        assert!(saw_summary);

        let world = run.join().unwrap();
        assert_eq!(world.state(), RunState::Finished);
        assert_eq!(world.summary().unwrap().survivors, 1);
    }

    #[test]
    fn stop_cuts_a_long_run_short() {
        let mut world = corridor(200, 50);
        world.start_run().unwrap();
        let mut run = RealtimeRun::spawn(world).unwrap();
        run.stop();
        let world = run.join().unwrap();
        assert_eq!(world.state(), RunState::Idle);
        assert!(world.summary().is_none());
        assert!(world.tick().0 < 199);
    }

    #[test]
    fn idle_world_returns_immediately() {
        let run = RealtimeRun::spawn(corridor(3, 1)).unwrap();
        let world = run.join().unwrap();
        assert_eq!(world.state(), RunState::Idle);
    }
}
