//! Line-based console front-end.
//!
//! Reads one command per line, echoes the board after every change and
//! plays engine turns automatically between human inputs.

use std::io::{BufRead, Write};

use crate::chess_errors::{ChessError, ChessResult};
use crate::moves::chess_move::Move;
use crate::session::game_session::GameSession;
use crate::utils::long_algebraic::move_to_long_algebraic;
use crate::utils::move_log::numbered_move_text;
use crate::utils::render_game_state::render_game_state;

const HELP_TEXT: &str = "\
Commands:
  e2e4, e7e8q   play a move (promotion piece q, r, b or n)
  moves         list legal moves
  board         show the board
  log           show the move log
  fen           print the position as FEN
  pgn           print the game as PGN
  undo          take back the last move (and the engine reply)
  reset         start a new game
  resign        resign for the side to move
  draw          agree to a draw
  help          show this text
  quit          leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Run the command loop until `quit` or end of input.
pub fn run_console<R: BufRead, W: Write>(
    session: &mut GameSession,
    input: R,
    out: &mut W,
) -> ChessResult<()> {
    writeln!(out, "Sable Chess. Type 'help' for commands.")?;
    advance(session, out)?;
    prompt(session, out)?;

    for line in input.lines() {
        let line = line?;
        match execute(session, line.trim(), out) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(ChessError::Io(err)) => return Err(err.into()),
            Err(err) => writeln!(out, "error: {err}")?,
        }
        prompt(session, out)?;
    }

    out.flush()?;
    Ok(())
}

fn execute<W: Write>(session: &mut GameSession, command: &str, out: &mut W) -> ChessResult<Flow> {
    match command {
        "" => {}
        "quit" | "exit" => return Ok(Flow::Quit),
        "help" => writeln!(out, "{HELP_TEXT}")?,
        "board" => show_board(session, out)?,
        "moves" => {
            let mut texts: Vec<String> = session
                .legal_moves()
                .iter()
                .map(move_to_long_algebraic)
                .collect();
            texts.sort();
            writeln!(out, "{} legal: {}", texts.len(), texts.join(" "))?;
        }
        "log" => {
            let state = session.game_state();
            let first_fullmove = first_fullmove(&state.move_log, state.fullmove_number);
            writeln!(out, "{}", numbered_move_text(&state.move_log, first_fullmove))?;
        }
        "fen" => writeln!(out, "{}", session.game_state().get_fen())?,
        "pgn" => write!(out, "{}", session.pgn())?,
        "undo" => {
            let undone = session.undo()?;
            if undone.is_empty() {
                writeln!(out, "nothing to undo")?;
            } else {
                for mv in &undone {
                    writeln!(out, "took back {mv}")?;
                }
            }
            advance(session, out)?;
        }
        "reset" => {
            session.reset()?;
            writeln!(out, "new game")?;
            advance(session, out)?;
        }
        "resign" => {
            let outcome = session.resign()?;
            writeln!(out, "{}", outcome.describe())?;
        }
        "draw" => {
            let outcome = session.agree_draw()?;
            writeln!(out, "{}", outcome.describe())?;
        }
        text => {
            let mv = session.submit_text(text)?;
            writeln!(out, "{} plays {mv}", mv.piece_moved.color.name())?;
            advance(session, out)?;
        }
    }
    Ok(Flow::Continue)
}

/// Let engines move, then show where things stand.
fn advance<W: Write>(session: &mut GameSession, out: &mut W) -> ChessResult<()> {
    for mv in session.play_engine_turns()? {
        writeln!(out, "{} plays {mv}", mv.piece_moved.color.name())?;
    }
    show_board(session, out)
}

fn show_board<W: Write>(session: &GameSession, out: &mut W) -> ChessResult<()> {
    writeln!(out, "{}", render_game_state(session.game_state()))?;
    writeln!(out, "{}", session.status_line())?;
    Ok(())
}

fn prompt<W: Write>(session: &GameSession, out: &mut W) -> ChessResult<()> {
    if session.outcome().is_none() && session.is_human_turn() {
        write!(out, "{}> ", session.game_state().side_to_move.name())?;
    } else {
        write!(out, "> ")?;
    }
    out.flush()?;
    Ok(())
}

/// Full-move number of the first logged move.
fn first_fullmove(move_log: &[Move], current: u16) -> u16 {
    let dark_moves = move_log
        .iter()
        .filter(|mv| mv.piece_moved.color == crate::game_state::chess_types::Color::Dark)
        .count() as u16;
    current.saturating_sub(dark_moves)
}
