use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use queen_battle::agent::ai::NegamaxPlayer;
use queen_battle::agent::{Player, RandomPlayer};
use queen_battle::config::{AgentConfig, MatchConfig};
use queen_battle::game_repr::{ParseSquareError, Side, Square};
use queen_battle::orchestrator::Orchestrator;

/// Queen list given as "x,y;x,y"
#[derive(Debug, Clone)]
struct Placement(Vec<Square>);

impl FromStr for Placement {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(';')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(Placement)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlayerKind {
    Negamax,
    Random,
}

/// Run one local Queen Battle match
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[arg(long, default_value_t = 6)]
    width: u8,

    #[arg(long, default_value_t = 6)]
    height: u8,

    /// Seconds per move
    #[arg(long, default_value_t = 1.0)]
    play_clock: f64,

    /// White queens as "x,y;x,y" (default: bottom corners)
    #[arg(long)]
    white_queens: Option<Placement>,

    /// Black queens as "x,y;x,y" (default: top corners)
    #[arg(long)]
    black_queens: Option<Placement>,

    #[arg(long, value_enum, default_value_t = PlayerKind::Negamax)]
    white: PlayerKind,

    #[arg(long, value_enum, default_value_t = PlayerKind::Random)]
    black: PlayerKind,

    /// Seed of the random players
    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, default_value_t = AgentConfig::default().max_depth)]
    max_depth: u8,

    /// Milliseconds kept back from the play clock
    #[arg(long, default_value_t = 500)]
    safety_margin_ms: u64,
}

impl Cli {
    fn match_config(&self) -> Result<MatchConfig> {
        let play_clock = Duration::try_from_secs_f64(self.play_clock)
            .with_context(|| format!("invalid play clock {}", self.play_clock))?;

        let (w, h) = (self.width, self.height);
        let white = match &self.white_queens {
            Some(placement) => placement.0.clone(),
            None => vec![Square::new(1, 1), Square::new(w, 1)],
        };
        let black = match &self.black_queens {
            Some(placement) => placement.0.clone(),
            None => vec![Square::new(1, h), Square::new(w, h)],
        };

        Ok(MatchConfig {
            width: w,
            height: h,
            play_clock,
            white,
            black,
        })
    }

    fn agent_config(&self) -> AgentConfig {
        AgentConfig {
            safety_margin: Duration::from_millis(self.safety_margin_ms),
            max_depth: self.max_depth,
            ..AgentConfig::default()
        }
    }

    fn build_player(&self, kind: PlayerKind, side: Side) -> Box<dyn Player> {
        match kind {
            PlayerKind::Negamax => Box::new(NegamaxPlayer::with_name(
                self.agent_config(),
                format!("Negamax ({})", side),
            )),
            PlayerKind::Random => Box::new(RandomPlayer::new(self.side_seed(side))),
        }
    }

    /// Different streams for the two sides under one seed
    fn side_seed(&self, side: Side) -> u64 {
        self.seed.wrapping_add(side.index() as u64)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.match_config()?;
    info!(
        "{}x{} board, {:?} per move, White {:?} vs Black {:?}",
        config.width, config.height, config.play_clock, cli.white, cli.black
    );

    let white = cli.build_player(cli.white, Side::White);
    let black = cli.build_player(cli.black, Side::Black);

    let report = Orchestrator::new(config, white, black)
        .run()
        .context("could not start the match")?;

    println!("{}", report.final_position);
    match report.forfeit {
        Some(forfeit) => println!(
            "{} by forfeit of {} ({:?}) after {} moves",
            report.result,
            forfeit.side,
            forfeit.reason,
            report.moves.len()
        ),
        None => println!("{} after {} moves", report.result, report.moves.len()),
    }

    Ok(())
}
