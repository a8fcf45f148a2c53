use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use pursuit_core::journal_file::load_journal_from_file;
use pursuit_core::replay_to_end;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSONL journal file to replay
    #[arg(short, long)]
    journal: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let loaded = load_journal_from_file(&args.journal)
        .map_err(|e| anyhow!("failed to load journal {}: {e}", args.journal.display()))?;

    let result = replay_to_end(&loaded.journal)
        .map_err(|e| anyhow!("replay failed during execution: {e:?}"))?;

    println!("Replay complete.");
    println!("Commands: {}", loaded.journal.commands.len());
    println!("Final Tick: {}", result.final_tick);
    println!("Phase: {:?}", result.final_phase);
    println!("Snapshot Hash: {}", result.final_snapshot_hash);

    Ok(())
}
