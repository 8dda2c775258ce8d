//! Move-log text and PGN export.
//!
//! Movetext uses the short notation from [`Move::chess_notation`], numbered
//! by full move. Games that start with Dark to move open with `N...`.

use chrono::{Local, NaiveDate};

use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;

/// Numbered movetext, e.g. `1. e4 e5 2. Nf3`.
pub fn numbered_move_text(moves: &[Move], first_fullmove: u16) -> String {
    let mut parts = Vec::<String>::with_capacity(moves.len() + moves.len() / 2);
    let mut fullmove = first_fullmove;

    for (ply, mv) in moves.iter().enumerate() {
        match mv.piece_moved.color {
            Color::Light => parts.push(format!("{fullmove}.")),
            Color::Dark if ply == 0 => parts.push(format!("{fullmove}...")),
            Color::Dark => {}
        }
        parts.push(mv.chess_notation());
        if mv.piece_moved.color == Color::Dark {
            fullmove += 1;
        }
    }

    parts.join(" ")
}

/// Seven-tag-roster headers for one exported game.
#[derive(Debug, Clone)]
pub struct PgnHeaders {
    pub event: String,
    pub site: String,
    pub date: NaiveDate,
    pub white: String,
    pub black: String,
    /// `1-0`, `0-1`, `1/2-1/2` or `*`.
    pub result: String,
}

impl PgnHeaders {
    /// Headers dated today.
    pub fn new(white: &str, black: &str, result: &str) -> Self {
        Self {
            event: "Sable Chess Game".to_owned(),
            site: "Local".to_owned(),
            date: Local::now().date_naive(),
            white: white.to_owned(),
            black: black.to_owned(),
            result: result.to_owned(),
        }
    }
}

/// The whole game in `game_state.move_log` as PGN text.
pub fn write_pgn(game_state: &GameState, headers: &PgnHeaders) -> String {
    let mut initial = game_state.clone();
    while initial.undo_move().is_some() {}

    // Seven Tag Roster order, then the optional setup tags.
    let mut tags: Vec<(&str, String)> = vec![
        ("Event", headers.event.clone()),
        ("Site", headers.site.clone()),
        ("Date", headers.date.format("%Y.%m.%d").to_string()),
        ("Round", "-".to_owned()),
        ("White", headers.white.clone()),
        ("Black", headers.black.clone()),
        ("Result", headers.result.clone()),
    ];

    let initial_fen = initial.get_fen();
    if initial_fen != STARTING_POSITION_FEN {
        tags.push(("SetUp", "1".to_owned()));
        tags.push(("FEN", initial_fen));
    }

    let mut out = String::new();
    for (key, value) in &tags {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let movetext = numbered_move_text(&game_state.move_log, initial.fullmove_number);
    if !movetext.is_empty() {
        out.push_str(&movetext);
        out.push(' ');
    }
    out.push_str(&headers.result);
    out.push('\n');
    out
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::long_algebraic::find_move;

    fn play_all(game: &mut GameState, texts: &[&str]) {
        for text in texts {
            let moves = game.get_valid_moves().expect("generation should succeed");
            let mv = find_move(&moves, text).expect("move should be legal");
            game.make_move(mv).expect("move should apply");
        }
    }

    #[test]
    fn move_text_is_numbered_by_full_move() {
        let mut game = GameState::new_game();
        play_all(&mut game, &["e2e4", "e7e5", "g1f3"]);
        assert_eq!(numbered_move_text(&game.move_log, 1), "1. e4 e5 2. Nf3");
    }

    #[test]
    fn dark_first_move_gets_an_ellipsis() {
        let mut game =
            GameState::from_fen("4k3/4p3/8/8/8/8/4P3/4K3 b - - 0 12").expect("fixture FEN");
        play_all(&mut game, &["e7e5", "e2e4"]);
        assert_eq!(numbered_move_text(&game.move_log, 12), "12... e5 13. e4");
    }

    #[test]
    fn pgn_has_roster_tags_and_result() {
        let mut game = GameState::new_game();
        play_all(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        let headers = PgnHeaders {
            date: NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date"),
            ..PgnHeaders::new("Human", "Engine \"two-ply\"", "0-1")
        };
        let pgn = write_pgn(&game, &headers);

        assert!(pgn.contains("[Date \"2024.03.09\"]\n"));
        assert!(pgn.contains("[Black \"Engine \\\"two-ply\\\"\"]\n"));
        assert!(!pgn.contains("[FEN"));
        assert!(pgn.ends_with("\n1. f3 e5 2. g4 Qh4 0-1\n"));

        let tag_names: Vec<&str> = pgn
            .lines()
            .take_while(|line| line.starts_with('['))
            .filter_map(|line| line[1..].split(' ').next())
            .collect();
        assert_eq!(
            tag_names,
            ["Event", "Site", "Date", "Round", "White", "Black", "Result"]
        );
    }

    #[test]
    fn pgn_from_a_custom_position_records_the_fen() {
        let fen = "4k3/4p3/8/8/8/8/4P3/4K3 w - - 0 1";
        let mut game = GameState::from_fen(fen).expect("fixture FEN");
        play_all(&mut game, &["e2e4"]);
        let pgn = write_pgn(&game, &PgnHeaders::new("a", "b", "*"));
        assert!(pgn.contains(&format!("[FEN \"{fen}\"]")));
        assert!(pgn.contains("[SetUp \"1\"]"));
        assert!(pgn.ends_with("1. e4 *\n"));
    }
}
