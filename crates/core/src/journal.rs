use serde::{Deserialize, Serialize};

use crate::types::Command;

/// In-memory record of every command a session accepted, in order.
/// The `layout_hash` pins the journal to the world it was recorded against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandJournal {
    pub format_version: u16,
    pub build_id: String,
    pub layout_hash: u64,
    pub commands: Vec<CommandRecord>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    pub seq: u64,
    pub command: Command,
}

impl CommandJournal {
    pub fn new(layout_hash: u64) -> Self {
        Self {
            format_version: 1,
            build_id: "dev".to_string(),
            layout_hash,
            commands: Vec::new(),
        }
    }

    /// Appends one command with the next sequence number.
    pub fn append(&mut self, command: Command) {
        let seq = self.commands.len() as u64;
        self.commands.push(CommandRecord { seq, command });
    }
}
