use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::thread;

use clap::{Parser, ValueEnum};
use grid_snake::autopilot::Autopilot;
use grid_snake::config::{BoundaryMode, EngineConfig};
use grid_snake::game::{GameEngine, TickOutcome};
use grid_snake::input::{Direction, GameInput};
use log::{info, warn};
use simplelog::{Config, LevelFilter, WriteLogger};
use thiserror::Error;

/// Headless driver: ticks the engine at a fixed cadence and prints results.
#[derive(Debug, Parser)]
#[command(name = "grid-snake", version, about)]
struct Cli {
    /// JSON engine configuration; missing fields take defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board edge length, replacing the configured snake and food layout.
    #[arg(long)]
    grid_size: Option<u16>,

    /// Boundary rule.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Seed for food placement; omit for a random run.
    #[arg(long)]
    seed: Option<u64>,

    /// Tick interval in milliseconds (only used with --realtime).
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Number of consecutive games to play.
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Stop a game that is still running after this many ticks.
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u64,

    /// Move script, one code per tick: U, D, L, R, or `.` to keep going.
    /// Without a script the autopilot steers.
    #[arg(long)]
    moves: Option<String>,

    /// Sleep for the tick interval between ticks.
    #[arg(long)]
    realtime: bool,

    /// Print one JSON snapshot per tick instead of a summary per game.
    #[arg(long)]
    json: bool,

    /// Log level written to stderr.
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Wrap,
    Wall,
}

impl From<ModeArg> for BoundaryMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Wrap => Self::Wrap,
            ModeArg::Wall => Self::Wall,
        }
    }
}

#[derive(Debug, Error)]
#[error("invalid move code '{0}' (expected U, D, L, R or .)")]
struct InvalidMoveCode(char);

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    WriteLogger::init(cli.log_level, Config::default(), io::stderr())?;

    let config = build_config(&cli)?;
    let script = cli.moves.as_deref().map(parse_moves).transpose()?;

    info!(
        "starting {} game(s) on a {}x{} board in {:?} mode",
        cli.games, config.grid_size, config.grid_size, config.boundary_mode
    );

    let mut engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed)?,
        None => GameEngine::new(config)?,
    };

    for game in 1..=cli.games {
        run_game(&cli, &mut engine, script.as_deref())?;

        if !cli.json {
            println!(
                "game {game}: {:?} ({}) score {} high score {} after {} ticks",
                engine.status(),
                engine
                    .death_reason()
                    .map_or_else(|| "-".to_owned(), |reason| format!("{reason:?}")),
                engine.score(),
                engine.high_score(),
                engine.tick_count()
            );
        }
    }

    Ok(())
}

fn build_config(cli: &Cli) -> Result<EngineConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };

    if let Some(grid_size) = cli.grid_size {
        config = EngineConfig {
            initial_direction: config.initial_direction,
            boundary_mode: config.boundary_mode,
            tick_interval_ms: config.tick_interval_ms,
            ..EngineConfig::with_grid_size(grid_size)
        };
    }
    if let Some(mode) = cli.mode {
        config.boundary_mode = mode.into();
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_interval_ms = tick_ms;
    }

    config.validate()?;
    Ok(config)
}

fn run_game(
    cli: &Cli,
    engine: &mut GameEngine,
    script: Option<&[Option<Direction>]>,
) -> Result<(), Box<dyn Error>> {
    engine.apply_input(GameInput::Restart)?;
    let tick_interval = engine.config().tick_interval();

    let mut ticks: u64 = 0;
    while engine.is_playing() {
        if ticks >= cli.max_ticks {
            warn!("stopping game after {ticks} ticks without a result");
            break;
        }

        let intent = match script {
            Some(moves) => usize::try_from(ticks)
                .ok()
                .and_then(|index| moves.get(index))
                .copied()
                .flatten(),
            None => Autopilot.next_direction(&engine.snapshot(), engine.snake().direction()),
        };
        if let Some(direction) = intent {
            engine.apply_input(GameInput::Direction(direction))?;
        }

        let outcome = engine.tick();
        ticks += 1;

        if cli.json {
            println!("{}", serde_json::to_string(&engine.snapshot())?);
        }
        if matches!(outcome, TickOutcome::Won) {
            info!("board filled after {ticks} ticks");
        }
        if cli.realtime {
            thread::sleep(tick_interval);
        }
    }

    Ok(())
}

fn parse_moves(script: &str) -> Result<Vec<Option<Direction>>, InvalidMoveCode> {
    script
        .chars()
        .filter(|code| !code.is_whitespace())
        .map(|code| match code {
            '.' => Ok(None),
            _ => Direction::from_code(code)
                .map(Some)
                .ok_or(InvalidMoveCode(code)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use grid_snake::config::BoundaryMode;
    use grid_snake::input::Direction;

    use super::{build_config, parse_moves, Cli};

    #[test]
    fn move_scripts_parse_codes_and_gaps() {
        let moves = parse_moves("R. d L").expect("script should parse");

        assert_eq!(
            moves,
            vec![
                Some(Direction::Right),
                None,
                Some(Direction::Down),
                Some(Direction::Left),
            ]
        );
        assert!(parse_moves("RX").is_err());
    }

    #[test]
    fn cli_overrides_apply_on_top_of_defaults() {
        let cli = Cli::parse_from(["grid-snake", "--grid-size", "9", "--mode", "wall"]);

        let config = build_config(&cli).expect("config should be valid");

        assert_eq!(config.grid_size, 9);
        assert_eq!(config.boundary_mode, BoundaryMode::Wall);
        assert!(config.initial_snake.iter().all(|cell| cell.is_within_bounds(9)));
    }
}
