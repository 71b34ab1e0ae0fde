// rust/twenty48_cli/src/main.rs
#![forbid(unsafe_code)]

mod rollout;

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::rollout::{NoopSink, RolloutSink, Runner, RunnerConfig, TableSink};
use twenty48_engine::{
    EngineConfig, FileStore, GreedyPolicy, MemoryStore, Policy, RandomPolicy, WIN_VALUE,
};

#[derive(Parser, Debug)]
#[command(name = "twenty48_cli")]
struct Args {
    // ---------------- rollout ----------------
    /// Moving turns to play, summed over all games.
    #[arg(long, default_value_t = 2000)]
    steps: u64,

    /// Seed for the tile spawn stream (policies derive theirs from it). Fixed default if omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Policy: random | greedy
    #[arg(long, default_value = "random")]
    policy: String,

    // ---------------- rules ----------------
    /// Board edge length.
    #[arg(long, default_value_t = 4)]
    size: usize,

    /// Tiles dealt onto a fresh board.
    #[arg(long, default_value_t = 2)]
    start_tiles: usize,

    /// Tile value that wins the game.
    #[arg(long, default_value_t = WIN_VALUE)]
    win_value: u32,

    /// Keep playing after a win instead of ending the game there.
    #[arg(long)]
    keep_playing: bool,

    // ---------------- persistence ----------------
    /// Directory for saved game state and best score. Omit to keep everything in memory.
    #[arg(long, value_name = "DIR")]
    state_dir: Option<PathBuf>,

    // ---------------- output ----------------
    /// Print the board after every turn and pause this many ms (`--render 0` for no pause).
    #[arg(long, value_name = "ms")]
    render: Option<u64>,

    /// 0 = DONE line only, 1 = progress bar, 2 = progress bar and a periodic table.
    #[arg(long, default_value_t = 1)]
    verbosity: u8,

    /// Turns between table rows at --verbosity 2.
    #[arg(long, default_value_t = 500)]
    report_every: u64,
}

fn init_logging(verbosity: u8) {
    // RUST_LOG wins; otherwise stay quiet unless the table is requested.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbosity >= 2 { "info" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbosity);

    let seed = args.seed.unwrap_or(EngineConfig::DEFAULT_SEED);
    let engine = EngineConfig {
        size: args.size,
        start_tiles: args.start_tiles,
        win_value: args.win_value,
        seed,
        ..EngineConfig::default()
    };

    let mut policy: Box<dyn Policy> = match args.policy.as_str() {
        "random" => Box::new(RandomPolicy::new(seed.wrapping_add(999))),
        "greedy" => Box::new(GreedyPolicy::new()),
        other => bail!("unknown policy {other:?} (expected random | greedy)"),
    };

    let cfg = RunnerConfig {
        steps: args.steps,
        engine,
        policy_name: args.policy.clone(),
        keep_playing: args.keep_playing,
        verbosity: args.verbosity,
        report_every: args.report_every,
        render_ms: args.render,
    };

    let sink: Box<dyn RolloutSink> = if cfg.verbosity >= 2 && cfg.report_every > 0 {
        Box::new(TableSink::new(20))
    } else {
        Box::new(NoopSink)
    };

    let mut runner = Runner::new(cfg, sink);
    let report = match args.state_dir {
        Some(dir) => {
            let store = FileStore::new(dir);
            info!(dir = %store.dir().display(), "persisting game state");
            runner.run(&mut *policy, store)?
        }
        None => runner.run(&mut *policy, MemoryStore::new())?,
    };

    // Single greppable summary line.
    println!(
        "DONE: policy={} grid={}x{} turns={} elapsed={:.3}s turns/s={:.1} games={} mean_len={:.2} longest={} mean_score={:.1} best_score={} pts/turn={:.2} max_tile={} win_rate={:.3} total_score={} open_game=(turns={} score={} terminated={})",
        report.policy,
        report.size,
        report.size,
        report.turns,
        report.elapsed_s,
        report.turns_per_s,
        report.games,
        report.mean_game_len,
        report.longest_game,
        report.mean_score,
        report.best_score,
        report.score_per_turn,
        report.max_tile,
        report.win_rate,
        report.total_score,
        report.open_turns,
        report.open_score,
        report.open_terminated,
    );
    if !report.max_tile_hist.is_empty() {
        println!("MAX_TILES: {}", report.max_tile_hist_line());
    }
    Ok(())
}
