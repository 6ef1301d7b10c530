mod sweep;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rayon::prelude::*;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use stickbrawl_shared::*;
use stickbrawl_sim::analyzer::analyze;
use stickbrawl_sim::run_match;

#[derive(Parser)]
#[command(name = "stickbrawl", about = "Stick figure brawler simulation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one computer-vs-computer match
    Run {
        /// Random seed for the opponent AI
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Display name for player 1
        #[arg(long, default_value = DEFAULT_P1_NAME)]
        p1: String,

        /// Display name for player 2
        #[arg(long, default_value = DEFAULT_P2_NAME)]
        p2: String,

        /// JSON file overriding any subset of the game tuning
        #[arg(long)]
        config: Option<PathBuf>,

        /// Tick cap for the match
        #[arg(long, default_value_t = MAX_TICKS)]
        max_ticks: u32,

        /// Output path for replay JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Start the match server
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = 3001)]
        port: u16,
    },

    /// Run many seeds with one tuning and summarize the results
    Series {
        /// Number of seeds (0..seeds)
        #[arg(long, default_value_t = 20)]
        seeds: u32,

        /// JSON file overriding any subset of the game tuning
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Sweep tuning parameters and report how matches change
    Sweep {
        /// Only sweep this parameter (default: all)
        #[arg(long)]
        param: Option<String>,

        /// Values per parameter, evenly spaced over its range
        #[arg(long, default_value_t = 5)]
        steps: usize,

        /// Seeds per value
        #[arg(long, default_value_t = 10)]
        seeds: u32,

        /// Write the results as CSV
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            seed,
            p1,
            p2,
            config,
            max_ticks,
            output,
        } => {
            init_tracing("info");
            let game = load_config(config.as_deref());
            cmd_run(seed, p1, p2, game, max_ticks, output);
        }

        Commands::Serve { port } => {
            init_tracing("info");
            cmd_serve(port);
        }

        Commands::Series { seeds, config } => {
            init_tracing("warn");
            let game = load_config(config.as_deref());
            cmd_series(seeds, game);
        }

        Commands::Sweep {
            param,
            steps,
            seeds,
            output,
        } => {
            init_tracing("warn");
            sweep::cmd_sweep(param.as_deref(), steps, seeds, output);
        }
    }
}

/// `RUST_LOG` wins over the per-command default level.
fn init_tracing(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn load_config(path: Option<&Path>) -> GameConfig {
    let Some(path) = path else {
        return GameConfig::default();
    };
    match GameConfig::from_json_file(path) {
        Ok(config) => {
            info!(path = %path.display(), "loaded game config");
            config
        }
        Err(e) => {
            eprintln!("Failed to load config {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

fn cmd_run(
    seed: u64,
    p1_name: String,
    p2_name: String,
    game: GameConfig,
    max_ticks: u32,
    output: Option<PathBuf>,
) {
    let config = MatchConfig {
        seed,
        p1_name,
        p2_name,
        max_ticks,
        game,
        ..Default::default()
    };

    println!(
        "Running match: {} vs {} (seed={})",
        config.p1_name, config.p2_name, seed
    );

    let replay = run_match(&config);
    let result = &replay.result;
    let metrics = analyze(&replay);

    println!();
    println!("=== Match Result ===");
    println!("Outcome:    {:?}", result.outcome);
    println!("Rounds:     {} (wins {}-{})", result.rounds_played, result.wins[0], result.wins[1]);
    println!(
        "Final tick: {} ({:.1}s)",
        result.final_tick,
        result.final_tick as f32 / TICK_RATE as f32
    );
    if let Some(secs) = metrics.mean_round_secs {
        println!("Mean round: {:.1}s", secs);
    }
    println!();
    println!("--- Stats ---");
    for (side, name) in [(Side::Player1, &config.p1_name), (Side::Player2, &config.p2_name)] {
        let s = result.stats.side(side);
        println!(
            "  {} ({:?}): punches={}, kicks={}, melee hits={}, fireballs={}/{}, evaded={}, damage={}",
            name,
            side,
            s.punches_thrown,
            s.kicks_thrown,
            s.melee_hits,
            s.fireball_hits,
            s.fireballs_launched,
            s.attacks_evaded,
            s.damage_dealt,
        );
    }

    if let Some(path) = output {
        match serde_json::to_string_pretty(&replay) {
            Ok(json) => match std::fs::write(&path, json) {
                Ok(()) => println!("\nReplay written to {}", path.display()),
                Err(e) => eprintln!("\nFailed to write replay: {}", e),
            },
            Err(e) => eprintln!("\nFailed to serialize replay: {}", e),
        }
    }
}

fn cmd_serve(port: u16) {
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };
    rt.block_on(async {
        if let Err(e) = stickbrawl_server::run_server(port).await {
            eprintln!("Server error: {}", e);
            std::process::exit(1);
        }
    });
}

fn cmd_series(seeds: u32, game: GameConfig) {
    if seeds == 0 {
        eprintln!("Series requires at least 1 seed.");
        std::process::exit(1);
    }
    println!("Series: {} seeds", seeds);

    let replays: Vec<Replay> = (0..seeds as u64)
        .into_par_iter()
        .map(|seed| {
            let replay = run_match(&MatchConfig {
                seed,
                game,
                ..Default::default()
            });
            debug!(seed, outcome = ?replay.result.outcome, "series match finished");
            replay
        })
        .collect();

    let mut p1_wins = 0u32;
    let mut p2_wins = 0u32;
    let mut unfinished = 0u32;
    let mut three_rounders = 0u32;
    for replay in &replays {
        match replay.result.outcome {
            MatchOutcome::Player1Win => p1_wins += 1,
            MatchOutcome::Player2Win => p2_wins += 1,
            MatchOutcome::Unfinished => unfinished += 1,
        }
        if replay.result.rounds_played == 3 {
            three_rounders += 1;
        }
    }

    let metrics: Vec<_> = replays.iter().map(analyze).collect();
    let n = metrics.len() as f32;
    let round_secs: Vec<f32> = metrics.iter().filter_map(|m| m.mean_round_secs).collect();
    let mean_round = if round_secs.is_empty() {
        0.0
    } else {
        round_secs.iter().sum::<f32>() / round_secs.len() as f32
    };

    println!();
    println!("=== Series Results ===");
    println!("{:<20} {:>8}", "Player 1 wins", p1_wins);
    println!("{:<20} {:>8}", "Player 2 wins", p2_wins);
    println!("{:<20} {:>8}", "Unfinished", unfinished);
    println!("{:<20} {:>8}", "Went to 3 rounds", three_rounders);
    println!("{:-<20} {:-<8}", "", "");
    println!("{:<20} {:>7.1}s", "Mean round", mean_round);
    println!(
        "{:<20} {:>8.3}",
        "Hit rate",
        metrics.iter().map(|m| m.hit_rate).sum::<f32>() / n
    );
    println!(
        "{:<20} {:>8.3}",
        "Fireball share",
        metrics.iter().map(|m| m.fireball_share).sum::<f32>() / n
    );
    println!(
        "{:<20} {:>8.3}",
        "Evasion rate",
        metrics.iter().map(|m| m.evasion_rate).sum::<f32>() / n
    );
}
