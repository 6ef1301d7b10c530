use std::io::Write;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;

use stickbrawl_shared::*;
use stickbrawl_sim::analyzer::{self, MatchMetrics};
use stickbrawl_sim::run_match;

/// A sweepable tuning parameter with its name, range, and accessor.
struct SweepParam {
    name: &'static str,
    min: f64,
    default: f64,
    max: f64,
    /// Apply this parameter value to a GameConfig.
    apply: fn(&mut GameConfig, f64),
}

const SWEEP_PARAMS: &[SweepParam] = &[
    SweepParam {
        name: "gravity",
        min: 0.3,
        default: 0.5,
        max: 0.8,
        apply: |c, v| c.gravity = v as f32,
    },
    SweepParam {
        name: "move_speed",
        min: 3.0,
        default: 5.0,
        max: 8.0,
        apply: |c, v| c.move_speed = v as f32,
    },
    SweepParam {
        name: "melee_range",
        min: 40.0,
        default: 60.0,
        max: 90.0,
        apply: |c, v| c.melee_range = v as f32,
    },
    SweepParam {
        name: "punch_damage",
        min: 5.0,
        default: 10.0,
        max: 20.0,
        apply: |c, v| c.punch_damage = v as u8,
    },
    SweepParam {
        name: "kick_damage",
        min: 10.0,
        default: 15.0,
        max: 25.0,
        apply: |c, v| c.kick_damage = v as u8,
    },
    SweepParam {
        name: "fireball_damage",
        min: 10.0,
        default: 20.0,
        max: 35.0,
        apply: |c, v| c.fireball_damage = v as u8,
    },
    SweepParam {
        name: "fireball_speed",
        min: 5.0,
        default: 8.0,
        max: 12.0,
        apply: |c, v| c.fireball_speed = v as f32,
    },
    SweepParam {
        name: "fireball_cooldown_ticks",
        min: 20.0,
        default: 45.0,
        max: 90.0,
        apply: |c, v| c.fireball_cooldown_ticks = v as u32,
    },
    SweepParam {
        name: "ai.ranged_mode_chance",
        min: 0.0,
        default: 0.3,
        max: 0.8,
        apply: |c, v| c.ai.ranged_mode_chance = v as f32,
    },
    SweepParam {
        name: "ai.duck_threshold",
        min: 0.4,
        default: 0.5,
        max: 0.8,
        apply: |c, v| c.ai.duck_threshold = v as f32,
    },
    SweepParam {
        name: "ai.random_jump_chance",
        min: 0.0,
        default: 0.05,
        max: 0.2,
        apply: |c, v| c.ai.random_jump_chance = v as f32,
    },
];

/// Aggregated metrics for one parameter value across all seeds.
struct AggResult {
    value: f64,
    mean_round_secs: f32,
    three_round_rate: f32,
    comeback_rate: f32,
    hit_rate: f32,
    fireball_share: f32,
    evasion_rate: f32,
    decided_rate: f32,
    match_count: u32,
}

fn aggregate(value: f64, metrics: &[MatchMetrics]) -> AggResult {
    let n = metrics.len().max(1) as f32;
    let mean = |f: fn(&MatchMetrics) -> f32| metrics.iter().map(f).sum::<f32>() / n;
    let rate = |f: fn(&MatchMetrics) -> bool| metrics.iter().filter(|m| f(m)).count() as f32 / n;

    let round_secs: Vec<f32> = metrics.iter().filter_map(|m| m.mean_round_secs).collect();
    let mean_round_secs = if round_secs.is_empty() {
        0.0
    } else {
        round_secs.iter().sum::<f32>() / round_secs.len() as f32
    };

    AggResult {
        value,
        mean_round_secs,
        three_round_rate: rate(|m| m.rounds_played == 3),
        comeback_rate: rate(|m| m.comeback),
        hit_rate: mean(|m| m.hit_rate),
        fireball_share: mean(|m| m.fireball_share),
        evasion_rate: mean(|m| m.evasion_rate),
        decided_rate: mean(|m| m.decided_rate),
        match_count: metrics.len() as u32,
    }
}

fn sweep_param(param: &SweepParam, steps: usize, seeds: u32) -> Result<Vec<AggResult>, ConfigError> {
    // Generate linearly-spaced values
    let values: Vec<f64> = if steps <= 1 {
        vec![param.default]
    } else {
        (0..steps)
            .map(|i| param.min + (param.max - param.min) * i as f64 / (steps - 1) as f64)
            .collect()
    };

    values
        .iter()
        .map(|&val| {
            let mut game = GameConfig::default();
            (param.apply)(&mut game, val);
            game.validate()?;

            let metrics: Vec<MatchMetrics> = (0..seeds as u64)
                .into_par_iter()
                .map(|seed| {
                    let config = MatchConfig {
                        seed,
                        game,
                        ..Default::default()
                    };
                    let replay = run_match(&config);
                    debug!(
                        param = param.name,
                        value = val,
                        seed,
                        outcome = ?replay.result.outcome,
                        "sweep match finished"
                    );
                    analyzer::analyze(&replay)
                })
                .collect();

            Ok(aggregate(val, &metrics))
        })
        .collect()
}

fn print_param_table(param_name: &str, results: &[AggResult]) {
    println!("\n--- {} ---", param_name);
    println!(
        "{:>10} {:>8} {:>7} {:>7} {:>7} {:>7} {:>7} {:>7}",
        "value", "round_s", "3rnd%", "comeb%", "hit%", "fb%", "evade%", "done%"
    );
    println!("{:-<72}", "");

    let closest = best_index(results);

    for (i, r) in results.iter().enumerate() {
        let marker = if Some(i) == closest { " *" } else { "" };
        println!(
            "{:>10.3} {:>8.1} {:>7.2} {:>7.2} {:>7.2} {:>7.2} {:>7.2} {:>7.2}{}",
            r.value,
            r.mean_round_secs,
            r.three_round_rate,
            r.comeback_rate,
            r.hit_rate,
            r.fireball_share,
            r.evasion_rate,
            r.decided_rate,
            marker,
        );
    }
}

/// Value whose matches most often went the distance.
fn best_index(results: &[AggResult]) -> Option<usize> {
    results
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.three_round_rate.total_cmp(&b.three_round_rate))
        .map(|(i, _)| i)
}

fn write_csv(path: &Path, all_results: &[(&str, Vec<AggResult>)]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(
        file,
        "parameter,value,mean_round_secs,three_round_rate,comeback_rate,hit_rate,fireball_share,evasion_rate,decided_rate,match_count"
    )?;

    for (param_name, results) in all_results {
        for r in results {
            writeln!(
                file,
                "{},{:.4},{:.2},{:.3},{:.3},{:.3},{:.3},{:.3},{:.3},{}",
                param_name,
                r.value,
                r.mean_round_secs,
                r.three_round_rate,
                r.comeback_rate,
                r.hit_rate,
                r.fireball_share,
                r.evasion_rate,
                r.decided_rate,
                r.match_count,
            )?;
        }
    }
    Ok(())
}

pub fn cmd_sweep(param_filter: Option<&str>, steps: usize, seeds: u32, output: Option<PathBuf>) {
    if seeds == 0 {
        eprintln!("Sweep requires at least 1 seed.");
        std::process::exit(1);
    }

    // Filter to requested parameter(s)
    let params_to_sweep: Vec<&SweepParam> = if let Some(name) = param_filter {
        match SWEEP_PARAMS.iter().find(|p| p.name == name) {
            Some(p) => vec![p],
            None => {
                eprintln!(
                    "Unknown parameter '{}'. Available: {}",
                    name,
                    SWEEP_PARAMS
                        .iter()
                        .map(|p| p.name)
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                std::process::exit(1);
            }
        }
    } else {
        SWEEP_PARAMS.iter().collect()
    };

    let total_matches = params_to_sweep.len() * steps.max(1) * seeds as usize;
    println!(
        "=== Tuning Sweep ===\nSteps: {} | Seeds: {}\nParams: {} | Total matches: {}",
        steps,
        seeds,
        params_to_sweep.len(),
        total_matches,
    );

    let start = std::time::Instant::now();

    let mut all_results: Vec<(&str, Vec<AggResult>)> = Vec::new();
    let mut best_per_param: Vec<(&str, f64, f64, f32)> = Vec::new();

    for param in &params_to_sweep {
        let results = match sweep_param(param, steps, seeds) {
            Ok(results) => results,
            Err(e) => {
                eprintln!("Invalid value while sweeping {}: {}", param.name, e);
                std::process::exit(1);
            }
        };

        if let Some(best) = best_index(&results).map(|i| &results[i]) {
            best_per_param.push((param.name, param.default, best.value, best.three_round_rate));
        }
        print_param_table(param.name, &results);
        all_results.push((param.name, results));
    }

    let elapsed = start.elapsed();
    println!("\n=== Summary ({:.1}s) ===", elapsed.as_secs_f32());
    println!("{:<25} {:>10} {:>10} {:>8}", "Parameter", "Default", "Closest", "3rnd%");
    println!("{:-<56}", "");
    for (name, default, value, rate) in &best_per_param {
        println!("{:<25} {:>10.3} {:>10.3} {:>8.2}", name, default, value, rate);
    }

    if let Some(path) = &output {
        match write_csv(path, &all_results) {
            Ok(()) => println!("\nCSV written to {}", path.display()),
            Err(e) => {
                eprintln!("\nFailed to write CSV {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }
}
