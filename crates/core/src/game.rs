use serde::Serialize;

use crate::grid::Grid;
use crate::layout;
use crate::types::{Cell, Command, Direction, LogEvent, Phase};

mod hash;
pub mod pathfinding;

/// Per-session mutable state. Owned as one aggregate so every command
/// handler mutates it through a single `&mut`, and replaced wholesale on
/// start/restart.
#[derive(Clone, Debug)]
struct Session {
    player: Cell,
    pursuer: Cell,
    pickups: Vec<Cell>,
    score: u32,
}

/// Immutable read of the session, suitable for rendering. Reflects the
/// latest applied move or tick with no tearing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub player: Cell,
    pub pursuer: Cell,
    pub pickups: Vec<Cell>,
    pub score: u32,
    pub phase: Phase,
}

/// The simulation: grid, session state, phase machine, and command surface.
///
/// All commands are silent no-ops when issued in a non-accepting phase;
/// hosts observe effects only through [`Game::snapshot`] and [`Game::log`].
/// Mutation goes through `&mut self`, so a multi-threaded host must wrap
/// the value in its own lock to keep moves and ticks serialized.
pub struct Game {
    grid: Grid,
    player_spawn: Cell,
    pursuer_spawn: Cell,
    pickup_spawns: Vec<Cell>,
    phase: Phase,
    tick: u64,
    session: Session,
    log: Vec<LogEvent>,
}

impl Game {
    /// A game over the compiled-in reference layout.
    pub fn new() -> Self {
        Self::with_layout(
            layout::reference_grid(),
            layout::PLAYER_SPAWN,
            layout::PURSUER_SPAWN,
            &layout::PICKUP_SPAWNS,
        )
    }

    /// A game over an arbitrary static grid. Spawn and pickup cells must be
    /// open; this is a construction-time precondition.
    pub fn with_layout(
        grid: Grid,
        player_spawn: Cell,
        pursuer_spawn: Cell,
        pickups: &[Cell],
    ) -> Self {
        assert!(grid.is_walkable(player_spawn), "player spawn must be an open cell");
        assert!(grid.is_walkable(pursuer_spawn), "pursuer spawn must be an open cell");
        assert!(
            pickups.iter().all(|&pickup| grid.is_walkable(pickup)),
            "every pickup must sit on an open cell"
        );

        let pickup_spawns = pickups.to_vec();
        let session = Session {
            player: player_spawn,
            pursuer: pursuer_spawn,
            pickups: pickup_spawns.clone(),
            score: 0,
        };

        Self {
            grid,
            player_spawn,
            pursuer_spawn,
            pickup_spawns,
            phase: Phase::NotStarted,
            tick: 0,
            session,
            log: Vec::new(),
        }
    }

    /// Dispatches one journaled or host-issued command.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Start => self.start(),
            Command::Restart => self.restart(),
            Command::Move { direction } => self.apply_move(direction),
            Command::Tick => self.tick(),
        }
    }

    /// Begins a fresh session: spawns reset, pickups restored, score zeroed,
    /// phase Playing. Always succeeds.
    pub fn start(&mut self) {
        self.reset_session();
    }

    /// Identical to [`Game::start`]; kept as a distinct command so journals
    /// read naturally after a terminal phase.
    pub fn restart(&mut self) {
        self.reset_session();
    }

    fn reset_session(&mut self) {
        self.session = Session {
            player: self.player_spawn,
            pursuer: self.pursuer_spawn,
            pickups: self.pickup_spawns.clone(),
            score: 0,
        };
        self.tick = 0;
        self.phase = Phase::Playing;
        self.log.push(LogEvent::SessionStarted);
    }

    /// Attempts to move the player one cell. Rejected silently unless the
    /// session is Playing and the candidate cell is walkable.
    ///
    /// On acceptance: a coinciding pickup is consumed and the session
    /// transitions to Won the moment the pickup set empties, pre-empting the
    /// collision check; otherwise stepping onto the pursuer's cell loses
    /// immediately, the same as a pursuer-initiated capture.
    pub fn apply_move(&mut self, direction: Direction) {
        if self.phase != Phase::Playing {
            return;
        }

        let from = self.session.player;
        let candidate = from.step(direction);
        if !self.grid.is_walkable(candidate) {
            return;
        }

        self.session.player = candidate;
        self.log.push(LogEvent::PlayerMoved { from, to: candidate });

        if let Some(slot) = self.session.pickups.iter().position(|&pickup| pickup == candidate) {
            let cell = self.session.pickups.remove(slot);
            self.session.score += 1;
            self.log.push(LogEvent::PickupCollected { cell, score: self.session.score });

            if self.session.pickups.is_empty() {
                self.phase = Phase::Won;
                self.log.push(LogEvent::GameWon);
                return;
            }
        }

        if self.session.player == self.session.pursuer {
            self.phase = Phase::Lost;
            self.log.push(LogEvent::GameLost);
        }
    }

    /// Advances the pursuer one step along the shortest path to the player.
    /// No-op unless Playing. Catching the player ends the session as Lost.
    pub fn tick(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }

        self.tick += 1;

        let path = pathfinding::shortest_path(&self.grid, self.session.pursuer, self.session.player);
        if path.len() > 1 {
            let from = self.session.pursuer;
            let to = path[1];
            self.session.pursuer = to;
            self.log.push(LogEvent::PursuerAdvanced { from, to });

            if to == self.session.player {
                self.phase = Phase::Lost;
                self.log.push(LogEvent::GameLost);
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player: self.session.player,
            pursuer: self.session.pursuer,
            pickups: self.session.pickups.clone(),
            score: self.session.score,
            phase: self.phase,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Count of pursuer ticks accepted this session.
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
