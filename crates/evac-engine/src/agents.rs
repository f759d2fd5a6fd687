//! Agent records, placement modes and the placement-validity predicate.

use indexmap::IndexMap;
use rand::Rng;

use evac_core::{AgentId, AgentStatus, Cell, PlacementError};
use evac_grid::GridIndex;

/// Maximum number of cells probed by manual placement before it falls
/// back to the last probe.
pub const MANUAL_PROBE_BUDGET: u32 = 100;

/// One evacuee.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Agent {
    /// Stable 1-based ID.
    pub id: AgentId,
    /// Current cell.
    pub position: Cell,
    /// Lifecycle status.
    pub status: AgentStatus,
}

impl Agent {
    /// Whether the agent has escaped or died.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// How [`AgentRegistry::generate`] places new agents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlacementMode {
    /// Uniformly random over cells free of walls, exits and hazard.
    /// Agents may share a cell.
    #[default]
    Random,
    /// Near the grid centre, probing an outward spiral for a free cell.
    Manual,
}

/// Owns every agent and assigns their IDs.
///
/// Iteration order is creation order.
#[derive(Clone, Debug)]
pub struct AgentRegistry {
    agents: IndexMap<AgentId, Agent>,
    next_id: u32,
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentRegistry {
    /// An empty registry. The first agent gets `AgentId(1)`.
    pub fn new() -> Self {
        Self {
            agents: IndexMap::new(),
            next_id: 1,
        }
    }

    /// Number of agents, terminal ones included.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether the registry holds no agents.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Look up an agent.
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    /// Agents in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    /// Copies of every agent, in creation order.
    pub fn snapshots(&self) -> Vec<Agent> {
        self.agents.values().copied().collect()
    }

    /// Remove every agent and restart IDs at 1.
    pub fn clear(&mut self) {
        self.agents.clear();
        self.next_id = 1;
    }

    /// Bring the registry to `count` agents.
    ///
    /// Random mode, or a `count` below the current size, regenerates the
    /// whole registry. Manual mode with a larger `count` keeps existing
    /// agents and appends new ones near the centre.
    ///
    /// # Errors
    ///
    /// [`PlacementError::NoFreeCell`] if random placement has nowhere to
    /// go. The registry is left untouched in that case.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        mode: PlacementMode,
        grid: &GridIndex,
        rng: &mut R,
    ) -> Result<(), PlacementError> {
        match mode {
            PlacementMode::Random => {
                let free = free_cells(grid);
                if count > 0 && free.is_empty() {
                    return Err(PlacementError::NoFreeCell);
                }
                self.clear();
                for _ in 0..count {
                    let cell = free[rng.random_range(0..free.len())];
                    self.push(cell);
                }
            }
            PlacementMode::Manual => {
                if count < self.len() {
                    self.clear();
                }
                while self.len() < count {
                    let cell = self.place_manual(grid);
                    self.push(cell);
                }
            }
        }
        Ok(())
    }

    /// Pick a uniformly random cell free of walls, exits and hazard.
    ///
    /// Other agents are not considered.
    pub fn place_random<R: Rng + ?Sized>(
        &self,
        grid: &GridIndex,
        rng: &mut R,
    ) -> Result<Cell, PlacementError> {
        let free = free_cells(grid);
        if free.is_empty() {
            return Err(PlacementError::NoFreeCell);
        }
        Ok(free[rng.random_range(0..free.len())])
    }

    /// Pick a cell near the grid centre.
    ///
    /// The centre is taken if it is free of walls, exits, hazard and
    /// non-terminal agents. Otherwise probes walk an outward spiral, eight
    /// compass directions per ring, clamped to the grid. When
    /// [`MANUAL_PROBE_BUDGET`] probes all fail the last probe is returned
    /// even though it is occupied.
    pub fn place_manual(&self, grid: &GridIndex) -> Cell {
        let center = grid.center();
        let mut cell = center;
        for attempt in 0..MANUAL_PROBE_BUDGET {
            if self.is_free_for_spawn(cell, grid) {
                return cell;
            }
            cell = spiral_probe(center, attempt, grid);
        }
        cell
    }

    /// Add one agent at `cell` if [`is_valid_position`](Self::is_valid_position)
    /// allows it.
    pub fn spawn_at(&mut self, cell: Cell, grid: &GridIndex) -> Result<AgentId, PlacementError> {
        self.check_position(cell, grid, None)?;
        Ok(self.push(cell))
    }

    /// Whether `cell` may hold an agent: in bounds, not a wall, not on
    /// fire, and not occupied by a non-terminal agent other than `exclude`.
    ///
    /// Exits are valid. Escaped and dead agents never block.
    pub fn is_valid_position(&self, cell: Cell, grid: &GridIndex, exclude: Option<AgentId>) -> bool {
        self.check_position(cell, grid, exclude).is_ok()
    }

    /// Move agent `id` to `cell`.
    ///
    /// # Errors
    ///
    /// Leaves the agent where it was and reports why the move was refused.
    /// Escaped and dead agents are refused with [`PlacementError::Terminal`].
    pub fn reposition(
        &mut self,
        id: AgentId,
        cell: Cell,
        grid: &GridIndex,
    ) -> Result<(), PlacementError> {
        match self.agents.get(&id) {
            None => return Err(PlacementError::UnknownAgent { id }),
            Some(agent) if agent.is_terminal() => return Err(PlacementError::Terminal { id }),
            Some(_) => {}
        }
        self.check_position(cell, grid, Some(id))?;
        if let Some(agent) = self.agents.get_mut(&id) {
            agent.position = cell;
        }
        Ok(())
    }

    fn check_position(
        &self,
        cell: Cell,
        grid: &GridIndex,
        exclude: Option<AgentId>,
    ) -> Result<(), PlacementError> {
        if !grid.in_bounds(cell) {
            return Err(PlacementError::OutOfBounds { cell });
        }
        if grid.is_wall(cell) {
            return Err(PlacementError::Wall { cell });
        }
        if grid.is_hazard(cell) {
            return Err(PlacementError::Hazard { cell });
        }
        if let Some(by) = self.occupant(cell, exclude) {
            return Err(PlacementError::Occupied { cell, by });
        }
        Ok(())
    }

    fn occupant(&self, cell: Cell, exclude: Option<AgentId>) -> Option<AgentId> {
        self.agents
            .values()
            .find(|a| a.position == cell && !a.is_terminal() && Some(a.id) != exclude)
            .map(|a| a.id)
    }

    fn is_free_for_spawn(&self, cell: Cell, grid: &GridIndex) -> bool {
        grid.is_open(cell) && self.occupant(cell, None).is_none()
    }

    fn push(&mut self, position: Cell) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        self.agents.insert(
            id,
            Agent {
                id,
                position,
                status: AgentStatus::Alive,
            },
        );
        id
    }
}

/// Cells free of walls, exits and hazard, in row-major order.
fn free_cells(grid: &GridIndex) -> Vec<Cell> {
    (0..grid.cell_count())
        .map(|i| grid.cell_at(i))
        .filter(|&c| grid.is_open(c))
        .collect()
}

/// The `attempt`-th spiral probe around `center`: ring `attempt / 8 + 1`,
/// direction `attempt % 8` in 45° steps starting east, clamped to the grid.
fn spiral_probe(center: Cell, attempt: u32, grid: &GridIndex) -> Cell {
    let radius = f64::from(attempt / 8 + 1);
    let angle = f64::from(attempt % 8) * std::f64::consts::FRAC_PI_4;
    let dx = (radius * angle.cos()).round() as i32;
    let dy = (radius * angle.sin()).round() as i32;
    let max_x = grid.cols() as i32 - 1;
    let max_y = grid.rows() as i32 - 1;
    Cell::new(
        (center.x + dx).clamp(0, max_x),
        (center.y + dy).clamp(0, max_y),
    )
}
