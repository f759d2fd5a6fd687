//! The user-facing simulation world.
//!
//! [`EvacWorld`] owns the grid, the agents, the scheduler and the hazard
//! spread, and exposes the commands an editing or rendering layer issues:
//! start, stop, reset, reposition, plus read access to everything it
//! draws.
//!
//! # Time
//!
//! Nothing here sleeps. Either call [`tick_simulation`](EvacWorld::tick_simulation)
//! and [`tick_hazard`](EvacWorld::tick_hazard) directly in any order, or
//! let [`step_clock`](EvacWorld::step_clock) interleave them from the
//! configured periods over virtual time. `RealtimeRun` maps that virtual
//! time onto the wall clock.
//!
//! # Ownership model
//!
//! All mutation goes through `&mut self`, so the grid has a single writer
//! by construction. Move the world into a `RealtimeRun` to drive it from
//! another thread.

use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace, warn};

use evac_core::{AgentId, Cell, PlacementError, RunError, TickId};
use evac_grid::GridIndex;
use evac_hazard::HazardSpread;

use crate::agents::{Agent, AgentRegistry};
use crate::clock::{CooperativeClock, TimerKind};
use crate::config::{ConfigError, SimConfig};
use crate::plan::{RoutePlan, TraceMap};
use crate::scheduler::{LifecycleRecord, RunState, RunSummary, SimulationScheduler, TickReport};

// Compile-time assertion: EvacWorld can be moved to a driver thread.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<EvacWorld>();
    }
};

/// Output of one [`EvacWorld::step_clock`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunEvent {
    /// The simulation timer fired and agents stepped.
    Tick(TickReport),
    /// The hazard timer fired. Holds the cells ignited.
    Ignited(Vec<Cell>),
}

/// A complete evacuation scenario.
///
/// # Example
///
/// ```
/// use evac_core::Cell;
/// use evac_engine::{EvacWorld, PlacementMode, SimConfig};
///
/// let config = SimConfig {
///     rows: 5,
///     cols: 5,
///     agent_count: 0,
///     placement: PlacementMode::Manual,
///     ..SimConfig::default()
/// };
/// let mut world = EvacWorld::new(config).unwrap();
/// world.grid_mut().add_exit(Cell::new(4, 4));
/// world.spawn_agent(Cell::new(0, 0)).unwrap();
/// world.start_run().unwrap();
/// let summary = world.run_to_completion().unwrap();
/// assert_eq!(summary.survivors, 1);
/// ```
pub struct EvacWorld {
    config: SimConfig,
    grid: GridIndex,
    agents: AgentRegistry,
    scheduler: SimulationScheduler,
    spread: HazardSpread,
    clock: CooperativeClock,
    trace: TraceMap,
    rng: ChaCha8Rng,
}

impl EvacWorld {
    /// Build an empty grid and place `config.agent_count` agents on it.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = GridIndex::new(config.rows, config.cols)?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut agents = AgentRegistry::new();
        agents.generate(config.agent_count, config.placement, &grid, &mut rng)?;
        Ok(Self {
            config,
            grid,
            agents,
            scheduler: SimulationScheduler::new(),
            spread: HazardSpread::new(),
            clock: CooperativeClock::stopped(),
            trace: TraceMap::new(),
            rng,
        })
    }

    /// Current configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Replace the configuration.
    ///
    /// A new grid size rebuilds an empty grid. A new size, agent count or
    /// placement mode regenerates the agents and clears the logs. A new
    /// seed reseeds placement. Periods, mode and tie-break apply from the
    /// next run.
    ///
    /// # Errors
    ///
    /// Refused with [`ConfigError::RunInProgress`] while running, or when
    /// `config` is invalid. Nothing changes on error.
    pub fn apply_config(&mut self, config: SimConfig) -> Result<(), ConfigError> {
        if self.state() == RunState::Running {
            warn!("configuration refused: run in progress");
            return Err(ConfigError::RunInProgress);
        }
        if let Err(e) = config.validate() {
            warn!(error = %e, "configuration refused");
            return Err(e);
        }

        let resized = config.rows != self.config.rows || config.cols != self.config.cols;
        let regenerate = resized
            || config.agent_count != self.config.agent_count
            || config.placement != self.config.placement;

        let mut rng = if config.seed != self.config.seed {
            ChaCha8Rng::seed_from_u64(config.seed)
        } else {
            self.rng.clone()
        };
        let grid = if resized {
            GridIndex::new(config.rows, config.cols)?
        } else {
            self.grid.clone()
        };
        let agents = if regenerate {
            let mut agents = if resized {
                AgentRegistry::new()
            } else {
                self.agents.clone()
            };
            agents.generate(config.agent_count, config.placement, &grid, &mut rng)?;
            Some(agents)
        } else {
            None
        };

        if let Some(agents) = agents {
            self.agents = agents;
            self.scheduler.reset();
            self.trace.clear();
        }
        self.grid = grid;
        self.rng = rng;
        self.config = config;
        Ok(())
    }

    /// The grid.
    pub fn grid(&self) -> &GridIndex {
        &self.grid
    }

    /// Mutable grid access for the editing layer.
    pub fn grid_mut(&mut self) -> &mut GridIndex {
        &mut self.grid
    }

    /// The agents.
    pub fn agents(&self) -> &AgentRegistry {
        &self.agents
    }

    /// Current run state.
    pub fn state(&self) -> RunState {
        self.scheduler.state()
    }

    /// Last simulation tick played.
    pub fn tick(&self) -> TickId {
        self.scheduler.tick()
    }

    /// Add an agent at `cell`. Returns `None` while running or when the
    /// cell fails the placement predicate.
    pub fn spawn_agent(&mut self, cell: Cell) -> Option<AgentId> {
        if self.state() == RunState::Running {
            debug!(cell = %cell, "spawn refused: run in progress");
            return None;
        }
        match self.agents.spawn_at(cell, &self.grid) {
            Ok(id) => Some(id),
            Err(e) => {
                debug!(cell = %cell, error = %e, "spawn refused");
                None
            }
        }
    }

    /// Move agent `id` to `cell`. Returns `false`, changing nothing, while
    /// running or when the cell fails the placement predicate.
    pub fn reposition_agent(&mut self, id: AgentId, cell: Cell) -> bool {
        if self.state() == RunState::Running {
            debug!(agent = %id, "reposition refused: run in progress");
            return false;
        }
        match self.agents.reposition(id, cell, &self.grid) {
            Ok(()) => true,
            Err(e) => {
                debug!(agent = %id, error = %e, "reposition refused");
                false
            }
        }
    }

    /// Compute routes and start both timers.
    ///
    /// # Errors
    ///
    /// [`RunError::AlreadyRunning`], [`RunError::NoExit`] (no search ran)
    /// or [`RunError::NoRoute`]. The world stays as it was.
    pub fn start_run(&mut self) -> Result<(), RunError> {
        if self.state() == RunState::Running {
            warn!("start refused: already running");
            return Err(RunError::AlreadyRunning);
        }
        let plan = match RoutePlan::compute(self.config.mode, &self.agents, &self.grid) {
            Ok(plan) => plan,
            Err(e) => {
                warn!(error = %e, "start refused");
                return Err(e);
            }
        };
        info!(
            mode = %plan.mode(),
            agents = self.agents.len(),
            ticks = plan.max_len(),
            "run started"
        );
        self.trace = plan.trace().clone();
        self.scheduler.start(plan)?;
        self.clock = CooperativeClock::new(
            self.config.tick_period,
            self.config.hazard_period,
            self.config.tie_break,
        );
        Ok(())
    }

    /// Cancel both timers. Grid and agents stay exactly as last committed.
    pub fn stop_run(&mut self) {
        if self.state() == RunState::Running {
            info!(tick = %self.tick(), "run stopped");
        }
        self.scheduler.stop();
        self.clock.cancel();
    }

    /// Stop, clear exits, hazard, trace and logs, clear walls unless
    /// `preserve_walls`, and regenerate every agent.
    ///
    /// # Errors
    ///
    /// [`PlacementError::NoFreeCell`] if random placement has nowhere to
    /// go on the cleared grid. Nothing changes in that case, and a run in
    /// progress keeps running.
    pub fn reset(&mut self, preserve_walls: bool) -> Result<(), PlacementError> {
        let mut grid = self.grid.clone();
        if !preserve_walls {
            grid.clear_walls();
        }
        grid.clear_exits();
        grid.clear_hazard();
        let mut rng = self.rng.clone();
        let mut agents = AgentRegistry::new();
        if let Err(e) = agents.generate(
            self.config.agent_count,
            self.config.placement,
            &grid,
            &mut rng,
        ) {
            warn!(error = %e, "reset refused");
            return Err(e);
        }

        self.stop_run();
        self.grid = grid;
        self.agents = agents;
        self.rng = rng;
        self.trace.clear();
        self.scheduler.reset();
        Ok(())
    }

    /// Replace every agent with a fresh set placed by the configured mode
    /// against the current grid. Clears the logs and trace.
    ///
    /// # Errors
    ///
    /// [`ConfigError::RunInProgress`] while running, or
    /// [`ConfigError::Placement`] if random placement has nowhere to go.
    /// Nothing changes on error.
    pub fn regenerate_agents(&mut self) -> Result<(), ConfigError> {
        if self.state() == RunState::Running {
            return Err(ConfigError::RunInProgress);
        }
        let mut agents = AgentRegistry::new();
        agents.generate(
            self.config.agent_count,
            self.config.placement,
            &self.grid,
            &mut self.rng,
        )?;
        self.agents = agents;
        self.scheduler.reset();
        self.trace.clear();
        Ok(())
    }

    /// Play one simulation tick. `None` unless running.
    pub fn tick_simulation(&mut self) -> Option<TickReport> {
        let report = self.scheduler.advance(&mut self.agents, &self.grid)?;
        if report.summary.is_some() {
            self.clock.cancel();
        }
        Some(report)
    }

    /// Spread the hazard by one ring. Ignored unless running.
    pub fn tick_hazard(&mut self) -> Vec<Cell> {
        if self.state() != RunState::Running {
            return Vec::new();
        }
        let ignited = self.spread.step(&mut self.grid);
        trace!(ignited = ignited.len(), burning = self.grid.hazard().len(), "hazard spread");
        ignited
    }

    /// Fire whichever timer is due next. `None` unless running.
    pub fn step_clock(&mut self) -> Option<RunEvent> {
        if self.state() != RunState::Running {
            return None;
        }
        let event = self.clock.next_event()?;
        match event.timer {
            TimerKind::Simulation => self.tick_simulation().map(RunEvent::Tick),
            TimerKind::Hazard => Some(RunEvent::Ignited(self.tick_hazard())),
        }
    }

    /// Virtual time of the next timer firing, while running.
    pub fn next_deadline(&self) -> Option<Duration> {
        if self.state() != RunState::Running {
            return None;
        }
        self.clock.next_deadline()
    }

    /// Virtual time of the last timer firing.
    pub fn clock_now(&self) -> Duration {
        self.clock.now()
    }

    /// Step the clock until the run ends. Returns its summary.
    pub fn run_to_completion(&mut self) -> Option<RunSummary> {
        while self.state() == RunState::Running {
            if self.step_clock().is_none() && !self.clock.is_active() {
                break;
            }
        }
        self.summary().cloned()
    }

    /// Copies of every agent.
    pub fn snapshots(&self) -> Vec<Agent> {
        self.agents.snapshots()
    }

    /// Escape log.
    pub fn escapes(&self) -> &[LifecycleRecord] {
        self.scheduler.escapes()
    }

    /// Death log.
    pub fn deaths(&self) -> &[LifecycleRecord] {
        self.scheduler.deaths()
    }

    /// Trace annotation of the current or last run.
    pub fn trace(&self) -> &TraceMap {
        &self.trace
    }

    /// Summary of the last finished run.
    pub fn summary(&self) -> Option<&RunSummary> {
        self.scheduler.summary()
    }
}
