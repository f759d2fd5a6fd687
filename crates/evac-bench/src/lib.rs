//! Benchmark profiles for the Evac evacuation simulator.
//!
//! - [`maze`]: deterministic walled grid with exits in the four corners
//! - [`reference_config`]: 100x100 grid, 50 random agents, comparison mode
//! - [`reference_world`]: [`reference_config`] on a [`maze`] with a fire
//!   in the middle, agents placed after the maze is drawn

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use evac_core::Cell;
use evac_engine::{ConfigError, EvacWorld, PlacementMode, RunMode, SimConfig};
use evac_grid::GridIndex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Fraction of cells turned into walls by [`maze`].
pub const WALL_DENSITY: f64 = 0.25;

/// A `size`x`size` grid with roughly [`WALL_DENSITY`] walls, exits in the
/// four corners, and the corners' neighbours kept open.
pub fn maze(size: u32, seed: u64) -> GridIndex {
    let mut grid = match GridIndex::new(size, size) {
        Ok(grid) => grid,
        Err(e) => panic!("benchmark maze of size {size}: {e}"),
    };
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let last = size as i32 - 1;
    let corners = [
        Cell::new(0, 0),
        Cell::new(last, 0),
        Cell::new(0, last),
        Cell::new(last, last),
    ];

    for i in 0..grid.cell_count() {
        let cell = grid.cell_at(i);
        let near_corner = corners.iter().any(|&c| c.manhattan(cell) <= 1);
        if !near_corner && rng.random_bool(WALL_DENSITY) {
            grid.add_wall(cell);
        }
    }
    for corner in corners {
        grid.add_exit(corner);
    }
    grid
}

/// 100x100 grid, 50 randomly placed agents, every strategy compared.
pub fn reference_config(seed: u64) -> SimConfig {
    SimConfig {
        rows: 100,
        cols: 100,
        agent_count: 50,
        placement: PlacementMode::Random,
        mode: RunMode::Compare,
        seed,
        ..SimConfig::default()
    }
}

/// A world built from [`reference_config`] on a [`maze`], with the fire
/// seeded at the centre.
pub fn reference_world(seed: u64) -> Result<EvacWorld, ConfigError> {
    let config = reference_config(seed);
    let mut world = EvacWorld::new(config.clone())?;
    let mut grid = maze(config.rows, seed);
    let center = grid.center();
    grid.remove_wall(center);
    grid.add_hazard(center);
    *world.grid_mut() = grid;
    world.regenerate_agents()?;
    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use evac_engine::RunState;

    #[test]
    fn maze_is_deterministic() {
        let a = maze(30, 42);
        let b = maze(30, 42);
        assert_eq!(a.walls(), b.walls());
        assert_ne!(a.walls(), maze(30, 43).walls());
    }

    #[test]
    fn maze_corners_are_exits() {
        let grid = maze(20, 1);
        assert_eq!(grid.exits().len(), 4);
        assert!(grid.is_exit(Cell::new(19, 19)));
        assert!(!grid.is_wall(Cell::new(1, 0)));
    }

    #[test]
    fn reference_config_validates() {
        reference_config(42).validate().unwrap();
    }

    #[test]
    fn reference_world_runs_to_completion() {
        let mut world = reference_world(42).unwrap();
        assert_eq!(world.agents().len(), 50);
        assert!(world.grid().is_hazard(world.grid().center()));
        if world.start_run().is_ok() {
            world.run_to_completion().unwrap();
            assert_eq!(world.state(), RunState::Finished);
        }
    }
}
