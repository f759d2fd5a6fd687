//! Two periodic timers interleaved on one thread over virtual time.
//!
//! The simulation timer and the hazard timer each fire every `period`
//! starting one period after the clock starts. [`CooperativeClock::next_event`]
//! pops whichever is due first and advances virtual time to it. When both
//! are due at the same instant, [`TieBreak`] decides the order.

use std::time::Duration;

/// Which timer fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    /// Agent playback.
    Simulation,
    /// Hazard spread.
    Hazard,
}

/// Order of two timers due at the same instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// The hazard spreads before agents step.
    #[default]
    HazardFirst,
    /// Agents step before the hazard spreads.
    SimulationFirst,
}

/// One timer firing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockEvent {
    /// Virtual time since the clock started.
    pub at: Duration,
    /// The timer that fired.
    pub timer: TimerKind,
}

#[derive(Clone, Copy, Debug)]
struct Timer {
    period: Duration,
    next_due: Duration,
}

impl Timer {
    fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: period,
        }
    }

    fn fire(&mut self) -> Duration {
        let at = self.next_due;
        self.next_due += self.period;
        at
    }
}

/// Cooperative scheduler for the simulation and hazard timers.
#[derive(Clone, Debug)]
pub struct CooperativeClock {
    now: Duration,
    simulation: Option<Timer>,
    hazard: Option<Timer>,
    tie_break: TieBreak,
}

impl CooperativeClock {
    /// Start both timers at virtual time zero.
    ///
    /// Periods are expected to be non-zero; `SimConfig::validate` rejects
    /// zero periods before a clock is built.
    pub fn new(simulation_period: Duration, hazard_period: Duration, tie_break: TieBreak) -> Self {
        Self {
            now: Duration::ZERO,
            simulation: Some(Timer::new(simulation_period)),
            hazard: Some(Timer::new(hazard_period)),
            tie_break,
        }
    }

    /// A clock with no timers.
    pub fn stopped() -> Self {
        Self {
            now: Duration::ZERO,
            simulation: None,
            hazard: None,
            tie_break: TieBreak::default(),
        }
    }

    /// Virtual time of the last event.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Whether any timer is still scheduled.
    pub fn is_active(&self) -> bool {
        self.simulation.is_some() || self.hazard.is_some()
    }

    /// Virtual time of the next event without consuming it.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.peek().map(|(at, _)| at)
    }

    /// Pop the next event and advance virtual time to it.
    pub fn next_event(&mut self) -> Option<ClockEvent> {
        let (_, timer) = self.peek()?;
        let slot = match timer {
            TimerKind::Simulation => &mut self.simulation,
            TimerKind::Hazard => &mut self.hazard,
        };
        let at = slot.as_mut()?.fire();
        self.now = at;
        Some(ClockEvent { at, timer })
    }

    /// Drop both timers. Virtual time is kept.
    pub fn cancel(&mut self) {
        self.simulation = None;
        self.hazard = None;
    }

    fn peek(&self) -> Option<(Duration, TimerKind)> {
        match (self.simulation, self.hazard) {
            (None, None) => None,
            (Some(s), None) => Some((s.next_due, TimerKind::Simulation)),
            (None, Some(h)) => Some((h.next_due, TimerKind::Hazard)),
            (Some(s), Some(h)) => {
                let kind = if s.next_due < h.next_due {
                    TimerKind::Simulation
                } else if h.next_due < s.next_due {
                    TimerKind::Hazard
                } else {
                    match self.tie_break {
                        TieBreak::HazardFirst => TimerKind::Hazard,
                        TieBreak::SimulationFirst => TimerKind::Simulation,
                    }
                };
                Some((s.next_due.min(h.next_due), kind))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn drain(clock: &mut CooperativeClock, n: usize) -> Vec<(u64, TimerKind)> {
        (0..n)
            .map_while(|_| clock.next_event())
            .map(|e| (e.at.as_millis() as u64, e.timer))
            .collect()
    }

    #[test]
    fn interleaves_by_deadline() {
        let mut clock = CooperativeClock::new(ms(100), ms(250), TieBreak::default());
        use TimerKind::*;
        assert_eq!(
            drain(&mut clock, 6),
            vec![
                (100, Simulation),
                (200, Simulation),
                (250, Hazard),
                (300, Simulation),
                (400, Simulation),
                (500, Hazard),
            ]
        );
        assert_eq!(clock.now(), ms(500));
    }

    #[test]
    fn tie_break_orders_simultaneous_timers() {
        use TimerKind::*;
        let mut hazard_first = CooperativeClock::new(ms(100), ms(100), TieBreak::HazardFirst);
        assert_eq!(
            drain(&mut hazard_first, 2),
            vec![(100, Hazard), (100, Simulation)]
        );

        let mut sim_first = CooperativeClock::new(ms(100), ms(100), TieBreak::SimulationFirst);
        assert_eq!(
            drain(&mut sim_first, 2),
            vec![(100, Simulation), (100, Hazard)]
        );
    }

    #[test]
    fn cancel_stops_both_timers() {
        let mut clock = CooperativeClock::new(ms(10), ms(15), TieBreak::default());
        clock.next_event();
        clock.cancel();
        assert!(!clock.is_active());
        assert_eq!(clock.next_event(), None);
        assert_eq!(clock.next_deadline(), None);
        assert_eq!(clock.now(), ms(10));
    }

    #[test]
    fn deadline_matches_next_event() {
        let mut clock = CooperativeClock::new(ms(30), ms(20), TieBreak::default());
        for _ in 0..10 {
            let deadline = clock.next_deadline();
            assert_eq!(clock.next_event().map(|e| e.at), deadline);
        }
    }

    #[test]
    fn stopped_clock_never_fires() {
        let mut clock = CooperativeClock::stopped();
        assert!(!clock.is_active());
        assert!(clock.next_event().is_none());
    }
}
