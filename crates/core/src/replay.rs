use crate::game::Game;
use crate::journal::CommandJournal;
use crate::layout;
use crate::types::Phase;

#[derive(Debug, PartialEq, Eq)]
pub enum ReplayError {
    /// The journal was recorded against a different compiled-in layout.
    LayoutMismatch { expected: u64, found: u64 },
    /// Record sequence numbers are not contiguous from zero.
    SequenceGap { expected: u64, found: u64 },
}

#[derive(Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_phase: Phase,
    pub final_tick: u64,
    pub final_snapshot_hash: u64,
}

/// Drives a fresh game through every journaled command and reports where it
/// ended up. Commands the simulation would reject in the replayed phase are
/// no-ops during replay exactly as they were live, so a well-formed journal
/// always reproduces the recorded session bit for bit.
pub fn replay_to_end(journal: &CommandJournal) -> Result<ReplayResult, ReplayError> {
    let expected_layout = layout::layout_hash();
    if journal.layout_hash != expected_layout {
        return Err(ReplayError::LayoutMismatch {
            expected: expected_layout,
            found: journal.layout_hash,
        });
    }

    let mut game = Game::new();
    for (position, record) in journal.commands.iter().enumerate() {
        let expected = position as u64;
        if record.seq != expected {
            return Err(ReplayError::SequenceGap { expected, found: record.seq });
        }
        game.apply(record.command);
    }

    Ok(ReplayResult {
        final_phase: game.phase(),
        final_tick: game.current_tick(),
        final_snapshot_hash: game.snapshot_hash(),
    })
}
