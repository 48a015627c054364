use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use clap::Parser;
use quintet_core::Game;
use rand::prelude::*;
use tracing_subscriber::filter::LevelFilter;

mod command;
mod driver;
mod render;
mod settings;

use driver::{Driver, WallClock};
use settings::Settings;

#[derive(Parser, Debug)]
#[command(version, about = "Five puzzles in a row, against the clock", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<String>,

    /// TOML file with a seed and puzzle timings
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn init_logging(level: log::LevelFilter) {
    let level = match level {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    // stdout belongs to the game
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose.log_level_filter());

    let mut settings = Settings::load_or_default(args.config.as_deref())?;
    if let Some(seed) = args.seed.as_deref() {
        settings.seed = Some(settings::parse_seed(seed));
    }
    let seed = settings.seed.unwrap_or_else(settings::random_seed);
    log::debug!("seed: {}", seed);
    log::debug!("timings: {:?}", settings.timings);

    let game = Game::new(SmallRng::seed_from_u64(seed), settings.timings);
    let clock = WallClock::new();
    let (sender, lines) = mpsc::channel();
    thread::spawn(move || {
        if let Err(err) = driver::read_lines(io::stdin().lock(), clock, sender) {
            log::error!("failed reading input: {}", err);
        }
    });

    let mut driver = Driver::new(game, clock);
    driver.run(&lines, io::stdout().lock())?;

    if let Some(secs) = driver.game().elapsed_secs() {
        log::info!("finished in {}s with seed {}", secs, seed);
    }
    Ok(())
}
