use clap::Parser;
use memento_core::{DEFAULT_SAVE_FILE, SaveSlot};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use session::{Session, SessionOptions};

mod prompt;
mod render;
mod session;

/// Terminal memory game: flip two cards a turn and find every pair.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Location of the save slot
    #[arg(long, default_value = DEFAULT_SAVE_FILE)]
    save_file: PathBuf,

    /// How long a mismatched pair stays face up, in milliseconds
    #[arg(long, default_value_t = 2000)]
    delay_ms: u64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let options = SessionOptions {
        seed,
        slot: SaveSlot::new(args.save_file),
        mismatch_delay: Duration::from_millis(args.delay_ms),
    };
    let end = Session::new(io::stdin().lock(), io::stdout().lock(), options).run()?;
    log::debug!("Session ended: {:?}", end);
    Ok(())
}
