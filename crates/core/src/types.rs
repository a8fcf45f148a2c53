use serde::{Deserialize, Serialize};

/// A single addressable grid square. No identity beyond its coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent cell one step in `direction`. May lie outside any grid;
    /// callers probe walkability afterwards.
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Unit (dx, dy) offset, with y growing downward.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }
}

/// Stage of a game session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    NotStarted,
    Playing,
    Won,
    Lost,
}

impl Phase {
    /// Won and Lost accept no transition other than restart.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Serializable union of everything a host may ask the simulation to do.
/// This is the journal wire format as well as the dispatch surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    Restart,
    Move { direction: Direction },
    Tick,
}

/// Session-visible happenings, appended in order for hosts and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogEvent {
    SessionStarted,
    PlayerMoved { from: Cell, to: Cell },
    PickupCollected { cell: Cell, score: u32 },
    PursuerAdvanced { from: Cell, to: Cell },
    GameWon,
    GameLost,
}
