//! Compiled-in reference layout: the fixed maze, spawn cells, pickup cells,
//! and the pursuer cadence. Hosts schedule the tick interval themselves; the
//! core never owns a timer.

use std::time::Duration;

use crate::grid::Grid;
use crate::types::Cell;

pub const GRID_WIDTH: usize = 15;
pub const GRID_HEIGHT: usize = 11;

/// 0 = open path, 1 = wall.
const REFERENCE_MAZE: [[u8; GRID_WIDTH]; GRID_HEIGHT] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 1, 0, 1, 0, 1, 1, 1, 1, 1, 0, 1],
    [1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1],
    [1, 0, 1, 0, 1, 1, 1, 1, 1, 1, 1, 0, 1, 0, 1],
    [1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 1],
    [1, 0, 1, 1, 1, 1, 1, 1, 1, 0, 1, 0, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1],
    [1, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

pub const PLAYER_SPAWN: Cell = Cell::new(1, 1);
pub const PURSUER_SPAWN: Cell = Cell::new(13, 9);

pub const PICKUP_SPAWNS: [Cell; 5] = [
    Cell::new(1, 1),
    Cell::new(13, 1),
    Cell::new(1, 9),
    Cell::new(13, 9),
    Cell::new(7, 5),
];

/// Wall-clock interval between pursuer steps while a session is Playing.
pub const PURSUER_STEP_INTERVAL: Duration = Duration::from_millis(300);

pub fn reference_grid() -> Grid {
    Grid::from_rows(&REFERENCE_MAZE)
}

/// Stable fingerprint of the compiled-in layout, embedded in journal headers
/// so a replay refuses journals recorded against a different world.
pub fn layout_hash() -> u64 {
    use std::hash::Hasher;

    use xxhash_rust::xxh3::Xxh3;

    let mut hasher = Xxh3::new();
    for row in &REFERENCE_MAZE {
        hasher.write(row);
    }
    for cell in [PLAYER_SPAWN, PURSUER_SPAWN].iter().chain(PICKUP_SPAWNS.iter()) {
        hasher.write_i32(cell.x);
        hasher.write_i32(cell.y);
    }
    hasher.finish()
}
