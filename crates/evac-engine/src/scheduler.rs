//! Tick-by-tick route playback.
//!
//! [`SimulationScheduler`] owns the run state machine
//! (`Idle → Running → Finished`) and the escape and death logs. Each
//! [`advance`](SimulationScheduler::advance) call is one tick:
//!
//! 1. Every alive agent with a pending route step reads its next cell.
//! 2. An exit cell escapes the agent there.
//! 3. Otherwise a cell that is on fire *now* kills the agent there.
//! 4. Otherwise the agent just moves.
//!
//! When the tick counter reaches the plan's longest route, the run
//! finishes with a one-shot reclassification of every agent still alive
//! whose cell is an exit or on fire.
//!
//! The scheduler only reads the grid. It never drives time itself; a
//! caller (usually `EvacWorld`) decides when a tick happens.

use std::fmt;

use tracing::{debug, info};

use evac_core::{AgentId, AgentStatus, Cell, RunError, TickId};
use evac_grid::GridIndex;

use crate::agents::AgentRegistry;
use crate::plan::RoutePlan;

/// Run lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    /// No run in progress.
    #[default]
    Idle,
    /// Ticks are being played.
    Running,
    /// The last run played every tick.
    Finished,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Finished => "finished",
        })
    }
}

/// One escape or death.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LifecycleRecord {
    /// The agent concerned.
    pub agent: AgentId,
    /// The exit it reached, or the cell it died on.
    pub cell: Cell,
    /// Tick on which it happened.
    pub tick: TickId,
}

/// End-of-run report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Strategy label, or `"comparison"`.
    pub label: &'static str,
    /// Agents in the registry.
    pub total: usize,
    /// Agents escaped.
    pub survivors: usize,
    /// Agents dead.
    pub dead: usize,
    /// Ticks played.
    pub ticks: u64,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} of {} escaped, {} lost in {} ticks",
            self.label, self.survivors, self.total, self.dead, self.ticks
        )
    }
}

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The tick just played.
    pub tick: TickId,
    /// Agents that took a plain step this tick.
    pub moved: Vec<AgentId>,
    /// Escapes this tick, final reclassification included.
    pub escapes: Vec<LifecycleRecord>,
    /// Deaths this tick, final reclassification included.
    pub deaths: Vec<LifecycleRecord>,
    /// Set on the tick that finishes the run.
    pub summary: Option<RunSummary>,
}

/// The playback state machine.
#[derive(Debug, Default)]
pub struct SimulationScheduler {
    state: RunState,
    plan: Option<RoutePlan>,
    tick: TickId,
    escapes: Vec<LifecycleRecord>,
    deaths: Vec<LifecycleRecord>,
    summary: Option<RunSummary>,
}

impl SimulationScheduler {
    /// An idle scheduler with empty logs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Last tick played.
    pub fn tick(&self) -> TickId {
        self.tick
    }

    /// Escape log, in order of occurrence.
    pub fn escapes(&self) -> &[LifecycleRecord] {
        &self.escapes
    }

    /// Death log, in order of occurrence.
    pub fn deaths(&self) -> &[LifecycleRecord] {
        &self.deaths
    }

    /// Summary of the last finished run.
    pub fn summary(&self) -> Option<&RunSummary> {
        self.summary.as_ref()
    }

    /// The plan being played, while running.
    pub fn plan(&self) -> Option<&RoutePlan> {
        self.plan.as_ref()
    }

    /// Begin playing `plan`.
    ///
    /// The escape and death logs are kept. They track agent lifetimes,
    /// not runs, and are only cleared by [`reset`](Self::reset).
    pub fn start(&mut self, plan: RoutePlan) -> Result<(), RunError> {
        if self.state == RunState::Running {
            return Err(RunError::AlreadyRunning);
        }
        self.tick = TickId::default();
        self.summary = None;
        self.plan = Some(plan);
        self.state = RunState::Running;
        Ok(())
    }

    /// Abandon the run. Agents keep their current positions and statuses.
    pub fn stop(&mut self) {
        if self.state == RunState::Running {
            self.plan = None;
            self.state = RunState::Idle;
        }
    }

    /// Stop and forget everything, logs included.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Play one tick. Returns `None` unless running.
    pub fn advance(&mut self, agents: &mut AgentRegistry, grid: &GridIndex) -> Option<TickReport> {
        if self.state != RunState::Running {
            return None;
        }
        let plan = self.plan.as_ref()?;
        let step = self.tick.0 as usize;
        let tick = self.tick.next();
        let mut report = TickReport {
            tick,
            ..TickReport::default()
        };

        for (&id, route) in plan.driver_routes() {
            let Some(next) = route.get(step) else {
                continue;
            };
            let Some(agent) = agents.get_mut(id) else {
                continue;
            };
            if agent.is_terminal() {
                continue;
            }
            agent.position = next;
            let record = LifecycleRecord {
                agent: id,
                cell: next,
                tick,
            };
            if grid.is_exit(next) {
                agent.status = AgentStatus::Escaped;
                debug!(agent = %id, cell = %next, tick = %tick, "agent escaped");
                report.escapes.push(record);
            } else if grid.is_hazard(next) {
                agent.status = AgentStatus::Dead;
                debug!(agent = %id, cell = %next, tick = %tick, "agent died");
                report.deaths.push(record);
            } else {
                report.moved.push(id);
            }
        }

        let max_len = plan.max_len();
        let label = plan.label();
        self.tick = tick;
        self.escapes.extend_from_slice(&report.escapes);
        self.deaths.extend_from_slice(&report.deaths);

        if step + 1 >= max_len {
            self.finish(agents, grid, label, &mut report);
        }
        Some(report)
    }

    fn finish(
        &mut self,
        agents: &mut AgentRegistry,
        grid: &GridIndex,
        label: &'static str,
        report: &mut TickReport,
    ) {
        let tick = self.tick;
        let alive: Vec<AgentId> = agents
            .iter()
            .filter(|a| !a.is_terminal())
            .map(|a| a.id)
            .collect();
        for id in alive {
            let Some(agent) = agents.get_mut(id) else {
                continue;
            };
            let record = LifecycleRecord {
                agent: id,
                cell: agent.position,
                tick,
            };
            if grid.is_exit(agent.position) {
                agent.status = AgentStatus::Escaped;
                self.escapes.push(record);
                report.escapes.push(record);
            } else if grid.is_hazard(agent.position) {
                agent.status = AgentStatus::Dead;
                self.deaths.push(record);
                report.deaths.push(record);
            }
        }

        let summary = RunSummary {
            label,
            total: agents.len(),
            survivors: agents
                .iter()
                .filter(|a| a.status == AgentStatus::Escaped)
                .count(),
            dead: agents
                .iter()
                .filter(|a| a.status == AgentStatus::Dead)
                .count(),
            ticks: tick.0,
        };
        info!(
            label = summary.label,
            total = summary.total,
            survivors = summary.survivors,
            dead = summary.dead,
            ticks = summary.ticks,
            "run finished"
        );
        self.plan = None;
        self.state = RunState::Finished;
        self.summary = Some(summary.clone());
        report.summary = Some(summary);
    }
}
