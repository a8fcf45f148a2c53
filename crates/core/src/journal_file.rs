//! File-backed JSONL journal with a SHA-256 hash chain.
//!
//! Format, one JSON value per line:
//! - Line 1: header with `format_version`, `build_id`, `layout_hash`.
//! - Lines 2+: one record per accepted command, each chaining a SHA-256
//!   over its body and the previous record's hash (`prev_sha256_hex`,
//!   `sha256_hex`) so truncation and tampering are detectable.
//!
//! The writer flushes every record so the file survives a crashed host.
//! The loader validates JSON shape, sequence numbers, and the hash chain,
//! reporting the first line that fails.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::journal::{CommandJournal, CommandRecord};
use crate::types::{Command, Phase};

/// First line of the JSONL journal file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct FileHeader {
    format_version: u16,
    build_id: String,
    layout_hash: u64,
}

/// Fields hashed for a record: serialized to JSON and concatenated with
/// `prev_sha256_hex` as the SHA-256 input.
#[derive(Serialize)]
struct RecordBody<'a> {
    seq: u64,
    phase: Phase,
    command: &'a Command,
}

/// Full record line written to the JSONL file. `phase` is the phase
/// observed after the command was applied, recorded for host diagnostics.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct FileRecord {
    seq: u64,
    phase: Phase,
    command: Command,
    prev_sha256_hex: String,
    sha256_hex: String,
}

/// Previous-hash seed for the first record in a chain.
const INITIAL_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// `hex(SHA-256(body_json || prev_sha256_hex))`.
fn compute_record_sha256(body_json: &str, prev_sha256_hex: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body_json.as_bytes());
    hasher.update(prev_sha256_hex.as_bytes());
    let digest = hasher.finalize();
    format!("{digest:064x}")
}

/// Appends accepted commands to a JSONL file with a SHA-256 hash chain.
pub struct JournalWriter {
    writer: BufWriter<File>,
    last_sha256_hex: String,
    next_seq: u64,
}

impl JournalWriter {
    /// Creates a new journal file, writing the header line immediately.
    pub fn create(path: &Path, build_id: &str, layout_hash: u64) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        let header =
            FileHeader { format_version: 1, build_id: build_id.to_string(), layout_hash };
        let header_json = serde_json::to_string(&header).map_err(io::Error::other)?;
        writeln!(writer, "{header_json}")?;
        writer.flush()?;

        Ok(Self { writer, last_sha256_hex: INITIAL_HASH.to_string(), next_seq: 0 })
    }

    /// Resumes appending after a load; `last_sha256_hex` and `next_seq`
    /// come from [`LoadedJournal`].
    pub fn resume(path: &Path, last_sha256_hex: String, next_seq: u64) -> io::Result<Self> {
        let file = OpenOptions::new().append(true).open(path)?;
        let writer = BufWriter::new(file);
        Ok(Self { writer, last_sha256_hex, next_seq })
    }

    /// Appends one accepted command and flushes immediately.
    pub fn append(&mut self, phase: Phase, command: Command) -> io::Result<()> {
        let body = RecordBody { seq: self.next_seq, phase, command: &command };
        let body_json = serde_json::to_string(&body).map_err(io::Error::other)?;
        let sha256_hex = compute_record_sha256(&body_json, &self.last_sha256_hex);

        let record = FileRecord {
            seq: self.next_seq,
            phase,
            command,
            prev_sha256_hex: self.last_sha256_hex.clone(),
            sha256_hex: sha256_hex.clone(),
        };

        let record_json = serde_json::to_string(&record).map_err(io::Error::other)?;
        writeln!(self.writer, "{record_json}")?;
        self.writer.flush()?;

        self.last_sha256_hex = sha256_hex;
        self.next_seq += 1;

        Ok(())
    }
}

/// Successfully loaded journal plus the metadata needed to resume appends.
#[derive(Debug)]
pub struct LoadedJournal {
    pub journal: CommandJournal,
    /// SHA-256 hex of the last valid record (the initial hash if empty).
    pub last_sha256_hex: String,
    /// Sequence number for the next record to append.
    pub next_seq: u64,
}

/// Why a journal file could not be fully loaded.
#[derive(Debug)]
pub enum JournalLoadError {
    Io(io::Error),
    EmptyFile,
    InvalidHeader { line: usize, message: String },
    InvalidRecord { line: usize, message: String },
    /// A line is incomplete (for example, the file ended mid-write without
    /// a trailing newline).
    IncompleteLine { line: usize },
    /// Previous-hash link or recomputed hash does not match the stored one.
    HashChainBroken { line: usize },
}

impl fmt::Display for JournalLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "journal I/O error: {e}"),
            Self::EmptyFile => write!(f, "journal file is empty"),
            Self::InvalidHeader { line, message } => {
                write!(f, "invalid journal header at line {line}: {message}")
            }
            Self::InvalidRecord { line, message } => {
                write!(f, "invalid journal record at line {line}: {message}")
            }
            Self::IncompleteLine { line } => {
                write!(f, "incomplete journal line at line {line}")
            }
            Self::HashChainBroken { line } => {
                write!(f, "SHA-256 hash chain broken at line {line}")
            }
        }
    }
}

/// Loads and validates a JSONL journal file, stopping at the first invalid,
/// incomplete, or hash-broken line.
pub fn load_journal_from_file(path: &Path) -> Result<LoadedJournal, JournalLoadError> {
    let content = fs::read_to_string(path).map_err(JournalLoadError::Io)?;
    if content.is_empty() {
        return Err(JournalLoadError::EmptyFile);
    }
    let has_trailing_newline = content.ends_with('\n');
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() {
        return Err(JournalLoadError::EmptyFile);
    }
    if !has_trailing_newline {
        return Err(JournalLoadError::IncompleteLine { line: lines.len() });
    }

    let header: FileHeader = serde_json::from_str(lines[0])
        .map_err(|e| JournalLoadError::InvalidHeader { line: 1, message: e.to_string() })?;

    let mut journal = CommandJournal {
        format_version: header.format_version,
        build_id: header.build_id,
        layout_hash: header.layout_hash,
        commands: Vec::new(),
    };

    let mut prev_sha256_hex = INITIAL_HASH.to_string();
    let mut next_seq: u64 = 0;

    for (line_index, line) in lines.iter().skip(1).enumerate() {
        let line_number = line_index + 2; // 1-indexed; header is line 1

        if line.is_empty() {
            return Err(JournalLoadError::InvalidRecord {
                line: line_number,
                message: "empty line".to_string(),
            });
        }

        let record: FileRecord = serde_json::from_str(line).map_err(|e| {
            JournalLoadError::InvalidRecord { line: line_number, message: e.to_string() }
        })?;

        if record.seq != next_seq {
            return Err(JournalLoadError::InvalidRecord {
                line: line_number,
                message: format!("expected seq {next_seq}, found {}", record.seq),
            });
        }

        if record.prev_sha256_hex != prev_sha256_hex {
            return Err(JournalLoadError::HashChainBroken { line: line_number });
        }

        let body = RecordBody { seq: record.seq, phase: record.phase, command: &record.command };
        let body_json = serde_json::to_string(&body).map_err(|e| {
            JournalLoadError::InvalidRecord { line: line_number, message: e.to_string() }
        })?;
        let expected_sha256 = compute_record_sha256(&body_json, &prev_sha256_hex);

        if record.sha256_hex != expected_sha256 {
            return Err(JournalLoadError::HashChainBroken { line: line_number });
        }

        journal.commands.push(CommandRecord { seq: record.seq, command: record.command });

        prev_sha256_hex = record.sha256_hex;
        next_seq += 1;
    }

    Ok(LoadedJournal { journal, last_sha256_hex: prev_sha256_hex, next_seq })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout;
    use crate::types::Direction;

    fn sample_commands() -> Vec<(Phase, Command)> {
        vec![
            (Phase::Playing, Command::Start),
            (Phase::Playing, Command::Move { direction: Direction::Right }),
            (Phase::Playing, Command::Tick),
        ]
    }

    #[test]
    fn create_append_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.jsonl");

        let mut writer =
            JournalWriter::create(&path, "test", layout::layout_hash()).expect("create");
        for (phase, command) in sample_commands() {
            writer.append(phase, command).expect("append");
        }
        drop(writer);

        let loaded = load_journal_from_file(&path).expect("load");
        assert_eq!(loaded.next_seq, 3);
        assert_eq!(loaded.journal.layout_hash, layout::layout_hash());
        assert_eq!(loaded.journal.commands.len(), 3);
        assert_eq!(loaded.journal.commands[0].command, Command::Start);
        assert_eq!(
            loaded.journal.commands[1].command,
            Command::Move { direction: Direction::Right }
        );
    }

    #[test]
    fn resume_continues_the_hash_chain() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.jsonl");

        let mut writer =
            JournalWriter::create(&path, "test", layout::layout_hash()).expect("create");
        writer.append(Phase::Playing, Command::Start).expect("append");
        drop(writer);

        let loaded = load_journal_from_file(&path).expect("load");
        let mut writer =
            JournalWriter::resume(&path, loaded.last_sha256_hex, loaded.next_seq)
                .expect("resume");
        writer.append(Phase::Playing, Command::Tick).expect("append");
        drop(writer);

        let reloaded = load_journal_from_file(&path).expect("reload");
        assert_eq!(reloaded.next_seq, 2);
        assert_eq!(reloaded.journal.commands[1].command, Command::Tick);
    }

    #[test]
    fn tampered_record_breaks_the_chain() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.jsonl");

        let mut writer =
            JournalWriter::create(&path, "test", layout::layout_hash()).expect("create");
        for (phase, command) in sample_commands() {
            writer.append(phase, command).expect("append");
        }
        drop(writer);

        let tampered = fs::read_to_string(&path).expect("read").replace("Tick", "Start");
        fs::write(&path, tampered).expect("write");

        match load_journal_from_file(&path) {
            Err(JournalLoadError::HashChainBroken { line }) => assert_eq!(line, 4),
            other => panic!("expected broken chain, got {other:?}"),
        }
    }

    #[test]
    fn missing_trailing_newline_reports_incomplete_line() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.jsonl");

        let mut writer =
            JournalWriter::create(&path, "test", layout::layout_hash()).expect("create");
        writer.append(Phase::Playing, Command::Start).expect("append");
        drop(writer);

        let content = fs::read_to_string(&path).expect("read");
        fs::write(&path, content.trim_end_matches('\n')).expect("write");

        assert!(matches!(
            load_journal_from_file(&path),
            Err(JournalLoadError::IncompleteLine { line: 2 })
        ));
    }

    #[test]
    fn empty_file_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("empty.jsonl");
        fs::write(&path, "").expect("write");
        assert!(matches!(load_journal_from_file(&path), Err(JournalLoadError::EmptyFile)));
    }
}
