//! Fire evacuation quickstart.
//!
//! Builds a small maze with a fire in one room, places agents near the
//! centre, runs every search strategy in comparison mode, and prints the
//! final report plus an ASCII picture of the grid.
//!
//! Run with: `cargo run --example quickstart -p evac-engine`

use evac_core::{AgentStatus, Cell};
use evac_engine::{EvacWorld, PlacementMode, RunMode, SimConfig};
use tracing::Level;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = SimConfig {
        rows: 12,
        cols: 16,
        agent_count: 6,
        placement: PlacementMode::Manual,
        mode: RunMode::Compare,
        ..SimConfig::default()
    };
    let mut world = EvacWorld::new(config)?;

    // Outer exits on opposite walls, an inner partition with one door,
    // and a fire in the lower-left room.
    {
        let grid = world.grid_mut();
        grid.add_exit(Cell::new(0, 1));
        grid.add_exit(Cell::new(15, 10));
        for y in 0..12 {
            if y != 6 {
                grid.add_wall(Cell::new(10, y));
            }
        }
        grid.add_hazard(Cell::new(2, 9));
    }
    // Re-place agents now that the maze exists.
    world.regenerate_agents()?;

    world.start_run()?;
    let summary = world
        .run_to_completion()
        .ok_or("run ended without a summary")?;
    println!("{summary}");

    for record in world.escapes() {
        println!("agent {} escaped at {} on tick {}", record.agent, record.cell, record.tick);
    }
    for record in world.deaths() {
        println!("agent {} died at {} on tick {}", record.agent, record.cell, record.tick);
    }

    println!();
    print_grid(&world);
    Ok(())
}

fn print_grid(world: &EvacWorld) {
    let grid = world.grid();
    let agents = world.snapshots();
    for y in 0..grid.rows() as i32 {
        let row: String = (0..grid.cols() as i32)
            .map(|x| {
                let cell = Cell::new(x, y);
                if let Some(agent) = agents.iter().find(|a| a.position == cell) {
                    return match agent.status {
                        AgentStatus::Alive => 'a',
                        AgentStatus::Escaped => '@',
                        AgentStatus::Dead => 'x',
                    };
                }
                if grid.is_wall(cell) {
                    '#'
                } else if grid.is_exit(cell) {
                    'E'
                } else if grid.is_hazard(cell) {
                    'F'
                } else if world.trace().contains_key(&cell) {
                    '*'
                } else {
                    '.'
                }
            })
            .collect();
        println!("{row}");
    }
}
