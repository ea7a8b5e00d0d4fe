//! SpreadGame CLI: dataset generation, inspection, and headless autoplay.
//!
//! Commands:
//! - `generate`: simulate AR(1) market primitives and write them as long-format CSV
//! - `play`: run scripted games against the AI on a dataset and report results
//! - `inspect`: summarize a dataset: trajectory count, lengths, per-series statistics

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spreadgame_core::config::GameConfig;
use spreadgame_core::data::{
    column_stats, generate, write_csv_path, GeneratorConfig, SeriesStats, TrajectoryLibrary,
};
use spreadgame_core::engine::{
    AiPolicy, GameSession, SessionSnapshot, TradeDirection, TradeOutcome,
};
use spreadgame_core::rng::{SeedHierarchy, PLAYER_STREAM, SELECT_STREAM};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "spreadgame",
    about = "SpreadGame CLI: trading against an AI under state-dependent friction"
)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate synthetic trajectories and write them to a CSV file.
    Generate {
        /// Output CSV path.
        #[arg(long)]
        out: PathBuf,

        /// Generator parameters TOML. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of trajectories (overrides the config).
        #[arg(long)]
        trajectories: Option<usize>,

        /// Market steps per trajectory (overrides the config).
        #[arg(long)]
        terminal_time: Option<usize>,

        /// Master seed. Random when omitted.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Autoplay games with a scripted player.
    Play {
        /// Dataset CSV.
        #[arg(long)]
        data: PathBuf,

        /// Game config TOML. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Master seed for trajectory selection and the random strategy.
        #[arg(long)]
        seed: Option<u64>,

        /// Number of games.
        #[arg(long, default_value_t = 1)]
        games: u64,

        /// Scripted player strategy.
        #[arg(long, value_enum, default_value_t = Strategy::Hold)]
        strategy: Strategy,

        /// Write the final snapshot of every game to this JSON file.
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Summarize a dataset.
    Inspect {
        /// Dataset CSV.
        #[arg(long)]
        data: PathBuf,

        /// Baseline added to the asset-price column.
        #[arg(long, default_value_t = 100.0)]
        base_price: f64,
    },
}

/// Scripted player behaviour for `play`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Never trade.
    Hold,
    /// Lean against deviations from the reference price, like the AI.
    Contrarian,
    /// Trade in a random direction on roughly one micro step in ten.
    Random,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            out,
            config,
            trajectories,
            terminal_time,
            seed,
        } => {
            let config = generator_config(config.as_deref(), trajectories, terminal_time)?;
            run_generate(&out, &config, seed)
        }
        Commands::Play {
            data,
            config,
            seed,
            games,
            strategy,
            json,
        } => run_play(&data, config.as_deref(), seed, games, strategy, json.as_deref()),
        Commands::Inspect { data, base_price } => run_inspect(&data, base_price),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load generator parameters and apply command-line overrides.
fn generator_config(
    path: Option<&Path>,
    trajectories: Option<usize>,
    terminal_time: Option<usize>,
) -> Result<GeneratorConfig> {
    let mut config = match path {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(n) = trajectories {
        config.n_trajectories = n;
    }
    if let Some(t) = terminal_time {
        config.terminal_time = t;
    }
    config.validate()?;
    Ok(config)
}

fn run_generate(out: &Path, config: &GeneratorConfig, seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let generated = generate(config, &mut rng)?;
    write_csv_path(out, config, seed, &generated)?;

    let upward = generated.iter().filter(|g| g.trend_sign > 0.0).count();
    println!(
        "Wrote {} trajectories × {} points to {}",
        generated.len(),
        config.terminal_time + 1,
        out.display()
    );
    println!("  upward trends: {upward}/{}", generated.len());
    print_series("asset_price", &column_stats(&generated, |g| &g.asset_price));
    print_series("depth", &column_stats(&generated, |g| &g.depth));
    print_series("resilience", &column_stats(&generated, |g| &g.resilience));
    Ok(())
}

fn run_play(
    data: &Path,
    config_path: Option<&Path>,
    seed: Option<u64>,
    games: u64,
    strategy: Strategy,
    json: Option<&Path>,
) -> Result<()> {
    if games == 0 {
        bail!("--games must be at least 1");
    }
    let config = match config_path {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    let library = TrajectoryLibrary::from_csv_path(data, config.base_price)
        .with_context(|| format!("loading {}", data.display()))?;

    let master_seed = seed.unwrap_or_else(rand::random);
    let seeds = SeedHierarchy::new(master_seed);
    let fingerprint = library.fingerprint();
    info!(
        seed = master_seed,
        dataset = fingerprint.short(),
        trajectories = library.len(),
        "starting autoplay"
    );

    let mut snapshots = Vec::with_capacity(games as usize);
    for game in 0..games {
        let mut select_rng = seeds.rng_for(&fingerprint, SELECT_STREAM, game);
        let Some(trajectory) = library.choose(&mut select_rng) else {
            bail!("dataset {} has no trajectories", data.display());
        };
        let mut player_rng = seeds.rng_for(&fingerprint, PLAYER_STREAM, game);

        let mut session = GameSession::new(config.clone(), trajectory)?;
        let snapshot = autoplay(&mut session, strategy, &mut player_rng)?;
        print_game(game, &snapshot);
        snapshots.push(snapshot);
    }
    print_totals(&snapshots);

    if let Some(path) = json {
        let body = serde_json::to_string_pretty(&snapshots)?;
        std::fs::write(path, body).with_context(|| format!("writing {}", path.display()))?;
        println!("Snapshots saved to: {}", path.display());
    }
    Ok(())
}

/// Drive one session to completion, consulting the strategy on every micro step.
fn autoplay(
    session: &mut GameSession,
    strategy: Strategy,
    rng: &mut StdRng,
) -> Result<SessionSnapshot> {
    let ai_rule = AiPolicy::new(session.config().ai);
    session.start();
    loop {
        if let Some(direction) = decide(session, strategy, &ai_rule, rng) {
            if let TradeOutcome::Rejected(reason) = session.trade(direction) {
                debug!(%reason, "scripted trade skipped");
            }
        }
        if !session.advance_micro() && session.advance()?.is_none() {
            break;
        }
    }
    Ok(session.snapshot())
}

fn decide(
    session: &GameSession,
    strategy: Strategy,
    ai_rule: &AiPolicy,
    rng: &mut StdRng,
) -> Option<TradeDirection> {
    if session.is_in_liquidation_phase() {
        return None;
    }
    match strategy {
        Strategy::Hold => None,
        Strategy::Contrarian => {
            let market = session.market();
            let deviation = market.price - session.trajectory().reference_price();
            let action = ai_rule.decide(deviation, market.depth);
            if action > 0.0 {
                Some(TradeDirection::Buy)
            } else if action < 0.0 {
                Some(TradeDirection::Sell)
            } else {
                None
            }
        }
        Strategy::Random => {
            if rng.gen_bool(0.9) {
                None
            } else if rng.gen_bool(0.5) {
                Some(TradeDirection::Buy)
            } else {
                Some(TradeDirection::Sell)
            }
        }
    }
}

fn print_game(game: u64, snap: &SessionSnapshot) {
    let reason = snap
        .game_over
        .map(|r| r.to_string())
        .unwrap_or_else(|| "unfinished".into());
    println!(
        "game {game:>3}  {}  t={:>4}/{:<4}  player {:>10.2} ({} trades, friction {:.2})  ai {:>10.2} ({} trades)  {reason}",
        snap.trajectory_id,
        snap.time,
        snap.terminal_time,
        snap.player.wealth,
        snap.player.trades.len(),
        snap.player.total_friction(),
        snap.ai.wealth,
        snap.ai.trades.len(),
    );
    for warning in &snap.warnings {
        println!("          warning: {warning}");
    }
}

fn print_totals(snapshots: &[SessionSnapshot]) {
    let n = snapshots.len().max(1) as f64;
    let player_mean = snapshots.iter().map(|s| s.player.wealth).sum::<f64>() / n;
    let ai_mean = snapshots.iter().map(|s| s.ai.wealth).sum::<f64>() / n;
    let wins = snapshots
        .iter()
        .filter(|s| s.player.wealth > s.ai.wealth)
        .count();

    println!();
    println!("=== Summary ({} games) ===", snapshots.len());
    println!("  Mean player wealth: {player_mean:.2}");
    println!("  Mean AI wealth:     {ai_mean:.2}");
    println!("  Player ahead:       {wins}/{}", snapshots.len());
}

fn run_inspect(data: &Path, base_price: f64) -> Result<()> {
    let library = TrajectoryLibrary::from_csv_path(data, base_price)
        .with_context(|| format!("loading {}", data.display()))?;

    let lengths: Vec<usize> = library.iter().map(|t| t.len()).collect();
    let min_len = lengths.iter().min().copied().unwrap_or(0);
    let max_len = lengths.iter().max().copied().unwrap_or(0);

    println!("Dataset: {}", data.display());
    println!("  Fingerprint:  {}", library.fingerprint().short());
    println!("  Base price:   {}", library.base_price());
    println!("  Trajectories: {}", library.len());
    println!("  Points:       {min_len}..={max_len} per trajectory");
    println!(
        "  Max playable terminal time: {}",
        library.common_terminal_time()
    );

    let points = || library.iter().flat_map(|t| t.points().iter());
    print_series("price", &SeriesStats::from_values(points().map(|p| p.price)));
    print_series("depth", &SeriesStats::from_values(points().map(|p| p.depth)));
    print_series(
        "resilience",
        &SeriesStats::from_values(points().map(|p| p.resilience)),
    );
    Ok(())
}

fn print_series(name: &str, stats: &SeriesStats) {
    if stats.non_finite > 0 {
        warn!(series = name, count = stats.non_finite, "non-finite values");
    }
    if stats.is_empty() {
        println!("  {name:<11} (no data)");
        return;
    }
    println!(
        "  {name:<11} mean {:>9.4}  std {:>9.4}  min {:>9.4}  max {:>9.4}",
        stats.mean, stats.std_dev, stats.min, stats.max
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use spreadgame_core::engine::AiParams;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_play_arguments() {
        let cli = Cli::try_parse_from([
            "spreadgame",
            "play",
            "--data",
            "d.csv",
            "--games",
            "3",
            "--strategy",
            "contrarian",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Play {
                games, strategy, ..
            } => {
                assert_eq!(games, 3);
                assert_eq!(strategy, Strategy::Contrarian);
            }
            _ => panic!("expected play"),
        }
    }

    #[test]
    fn generate_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gen.toml");
        std::fs::write(&path, "n_trajectories = 7\nterminal_time = 20\noffset_depth = 4.0\n")
            .unwrap();

        let from_file = generator_config(Some(&path), None, None).unwrap();
        assert_eq!(from_file.n_trajectories, 7);
        assert_eq!(from_file.terminal_time, 20);
        assert_eq!(from_file.offset_depth, 4.0);

        let overridden = generator_config(Some(&path), Some(3), Some(9)).unwrap();
        assert_eq!(overridden.n_trajectories, 3);
        assert_eq!(overridden.terminal_time, 9);
        assert_eq!(overridden.offset_depth, 4.0);

        assert!(generator_config(None, Some(0), None).is_err());
    }

    #[test]
    fn parses_generate_config_flag() {
        let cli = Cli::try_parse_from([
            "spreadgame",
            "generate",
            "--out",
            "d.csv",
            "--config",
            "gen.toml",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                config,
                trajectories,
                ..
            } => {
                assert_eq!(config, Some(PathBuf::from("gen.toml")));
                assert_eq!(trajectories, None);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn contrarian_follows_configured_threshold() {
        let generated = generate(
            &GeneratorConfig {
                n_trajectories: 1,
                terminal_time: 40,
                trend_slope: 0.2,
                ..GeneratorConfig::default()
            },
            &mut StdRng::seed_from_u64(5),
        )
        .unwrap();
        let library = spreadgame_core::data::into_library(&generated, 100.0).unwrap();
        let play = |ai: AiParams| {
            let trajectory = library.choose(&mut StdRng::seed_from_u64(0)).unwrap();
            let config = GameConfig {
                terminal_time: 40,
                ai,
                ..GameConfig::default()
            };
            let mut session = GameSession::new(config, trajectory).unwrap();
            autoplay(&mut session, Strategy::Contrarian, &mut StdRng::seed_from_u64(1)).unwrap()
        };

        let unreachable = play(AiParams {
            action_threshold: 1e12,
            ..AiParams::default()
        });
        assert!(unreachable.player.trades.is_empty());
        assert!(unreachable.ai.trades.is_empty());

        let eager = play(AiParams {
            action_threshold: 0.0,
            ..AiParams::default()
        });
        assert!(!eager.player.trades.is_empty());
    }

    #[test]
    fn hold_never_trades() {
        let generated = generate(
            &GeneratorConfig {
                n_trajectories: 1,
                terminal_time: 30,
                ..GeneratorConfig::default()
            },
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        let library = spreadgame_core::data::into_library(&generated, 100.0).unwrap();
        let trajectory = library.choose(&mut StdRng::seed_from_u64(0)).unwrap();
        let config = GameConfig {
            terminal_time: 30,
            ..GameConfig::default()
        };
        let mut session = GameSession::new(config, trajectory).unwrap();
        let snap = autoplay(&mut session, Strategy::Hold, &mut StdRng::seed_from_u64(2)).unwrap();
        assert!(snap.player.trades.is_empty());
        assert_eq!(snap.time, 30);
        assert!(snap.game_over.is_some());
    }

    #[test]
    fn random_strategy_is_seeded() {
        let generated = generate(
            &GeneratorConfig {
                n_trajectories: 1,
                terminal_time: 40,
                ..GeneratorConfig::default()
            },
            &mut StdRng::seed_from_u64(4),
        )
        .unwrap();
        let library = spreadgame_core::data::into_library(&generated, 100.0).unwrap();
        let run = || {
            let trajectory = library.choose(&mut StdRng::seed_from_u64(0)).unwrap();
            let config = GameConfig {
                terminal_time: 40,
                ..GameConfig::default()
            };
            let mut session = GameSession::new(config, trajectory).unwrap();
            autoplay(&mut session, Strategy::Random, &mut StdRng::seed_from_u64(8)).unwrap()
        };
        assert_eq!(run(), run());
    }
}
