use anyhow::{Result, bail};
use clap::Parser;
use pursuit_core::{Command, Direction, Game, Phase, layout};
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    commands: u32,
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p]
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for {} commands...", args.seed, args.commands);
    let mut game = Game::new();
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    game.start();

    let mut sessions = 1u32;
    let mut wins = 0u32;
    let mut losses = 0u32;

    for _ in 0..args.commands {
        let command = match rng.next_u64() % 8 {
            0..=2 => Command::Tick,
            _ => Command::Move {
                direction: choose(
                    &mut rng,
                    &[Direction::Up, Direction::Right, Direction::Down, Direction::Left],
                ),
            },
        };
        game.apply(command);

        let snapshot = game.snapshot();
        if !game.grid().is_walkable(snapshot.player) || !game.grid().is_walkable(snapshot.pursuer)
        {
            bail!("invariant failed: entity on blocked cell on seed {}", args.seed);
        }
        if snapshot.score > layout::PICKUP_SPAWNS.len() as u32 {
            bail!("invariant failed: score exceeds pickup count on seed {}", args.seed);
        }

        match game.phase() {
            Phase::Won => wins += 1,
            Phase::Lost => losses += 1,
            _ => continue,
        }
        game.restart();
        sessions += 1;
    }

    println!(
        "Done: {} sessions ({} won, {} lost), final hash {}",
        sessions,
        wins,
        losses,
        game.snapshot_hash()
    );
    Ok(())
}
