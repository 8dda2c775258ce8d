use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sable_chess::chess_errors::ChessResult;
use sable_chess::session::config::{PlayerKind, SessionConfig};
use sable_chess::session::console::run_console;
use sable_chess::session::game_session::GameSession;

/// Play chess in the terminal against a person or a simple engine.
#[derive(Debug, Parser)]
#[command(name = "sable_chess", version, about)]
struct Args {
    /// Who plays white.
    #[arg(long, value_enum, default_value_t = PlayerKind::Human)]
    white: PlayerKind,

    /// Who plays black.
    #[arg(long, value_enum, default_value_t = PlayerKind::TwoPly)]
    black: PlayerKind,

    /// Seed for engine randomness, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Start from this position instead of the initial one.
    #[arg(long)]
    fen: Option<String>,

    /// Stop the game after this many plies.
    #[arg(long)]
    max_plies: Option<usize>,
}

impl From<Args> for SessionConfig {
    fn from(args: Args) -> Self {
        SessionConfig {
            white: args.white,
            black: args.black,
            seed: args.seed,
            max_plies: args.max_plies,
            start_fen: args.fen,
        }
    }
}

fn main() -> ExitCode {
    // Logs go to stderr so they never interleave with the board on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "session aborted");
            let _ = writeln!(io::stderr(), "sable_chess: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> ChessResult<()> {
    let config = SessionConfig::from(args);
    info!(white = %config.white, black = %config.black, seed = ?config.seed, "starting session");

    let mut session = GameSession::new(config)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_console(&mut session, stdin.lock(), &mut stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_fill_the_session_config() {
        let args = Args::try_parse_from([
            "sable_chess",
            "--white",
            "two-ply",
            "--black",
            "random",
            "--seed",
            "9",
            "--max-plies",
            "40",
        ])
        .expect("arguments should parse");
        let config = SessionConfig::from(args);

        assert_eq!(config.white, PlayerKind::TwoPly);
        assert_eq!(config.black, PlayerKind::Random);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.max_plies, Some(40));
        assert_eq!(config.start_fen, None);
    }
}
