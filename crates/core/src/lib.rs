pub mod game;
pub mod grid;
pub mod journal;
pub mod journal_file;
pub mod layout;
pub mod replay;
pub mod types;

pub use game::pathfinding::shortest_path;
pub use game::{Game, Snapshot};
pub use grid::{Grid, TileKind};
pub use journal::{CommandJournal, CommandRecord};
pub use replay::{ReplayError, ReplayResult, replay_to_end};
pub use types::*;
