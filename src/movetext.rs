// This file is part of the pgn-tree library.
// Copyright (C) 2017-2026 Niklas Fiekas <niklas.fiekas@backscattering.de>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Turns movetext into a tree of resolved moves.
//!
//! The scanner walks the text once, left to right. Tokens end at
//! whitespace or at the start of a comment or variation. Each token is
//! parsed as SAN, resolved against the current [`GameState`] and played.
//! A variation is parsed recursively from a copy of the state, rewound by
//! the move it branches from.
//!
//! # Examples
//!
//! ```
//! use pgn_tree::{parse_game, Square};
//!
//! let game = parse_game("1. e4 (1. d4 d5) e5 2. Nf3 {Developing.}", None)?;
//!
//! let moves = game.moves();
//! assert_eq!(moves.len(), 3);
//! assert_eq!(moves[0].variations[0].len(), 2);
//! assert_eq!(moves[2].to(), Some(Square::F3));
//! assert_eq!(moves[2].comment.as_deref(), Some("Developing."));
//! # Ok::<_, pgn_tree::ParseError>(())
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::{
    errors::ParseError,
    game::Game,
    record::{MoveRecord, Ply, Variation},
    san::{split_glyph, San, SanPlus},
    state::GameState,
    tag::Tags,
    types::Nag,
};

static MOVE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.+").expect("valid move number regex"));

/// Parses the movetext of a game, starting from `starting_state` or the
/// standard position.
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered. Nothing of a game that
/// fails to parse is returned.
pub fn parse_game(movetext: &str, starting_state: Option<GameState>) -> Result<Game, ParseError> {
    debug!(fen = starting_state.is_some(), "parsing movetext");
    let mut state = starting_state.clone().unwrap_or_default();
    let moves = parse_line(movetext, &mut state, 0)?;
    debug!(plies = moves.plies(), "parsed movetext");
    Ok(Game::new(Tags::new(), starting_state, moves))
}

/// Parses a sequence of moves, with comments and nested variations,
/// starting from `state`.
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered.
pub fn parse_sequence(movetext: &str, mut state: GameState) -> Result<Variation, ParseError> {
    parse_line(movetext, &mut state, 0)
}

fn parse_line(movetext: &str, state: &mut GameState, depth: usize) -> Result<Variation, ParseError> {
    let mut line = Line {
        state,
        records: Variation::new(),
        depth,
    };

    let bytes = movetext.as_bytes();
    let mut token_start = None;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b' ' | b'\n' | b'\t' | b'\r' => {
                line.flush(movetext, &mut token_start, i)?;
                i += 1;
            }
            b'{' => {
                line.flush(movetext, &mut token_start, i)?;
                let end = memchr::memchr(b'}', &bytes[i + 1..])
                    .map(|offset| i + 1 + offset)
                    .ok_or_else(|| ParseError::UnterminatedComment {
                        fragment: movetext[i..].to_owned(),
                    })?;
                line.comment(&movetext[i + 1..end])?;
                i = end + 1;
            }
            b';' => {
                line.flush(movetext, &mut token_start, i)?;
                let end = memchr::memchr(b'\n', &bytes[i + 1..])
                    .map_or(bytes.len(), |offset| i + 1 + offset);
                line.comment(&movetext[i + 1..end])?;
                i = end;
            }
            b'(' => {
                line.flush(movetext, &mut token_start, i)?;
                let end = matching_paren(bytes, i).ok_or_else(|| {
                    ParseError::UnterminatedVariation {
                        fragment: movetext[i..].to_owned(),
                    }
                })?;
                line.variation(&movetext[i..=end])?;
                i = end + 1;
            }
            _ => {
                token_start.get_or_insert(i);
                i += 1;
            }
        }
    }
    line.flush(movetext, &mut token_start, bytes.len())?;

    Ok(line.records)
}

/// Finds the `)` closing the `(` at `open`. Parentheses inside comments
/// do not count.
fn matching_paren(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            b'{' => i += 1 + memchr::memchr(b'}', &bytes[i + 1..])?,
            b';' => {
                i += memchr::memchr(b'\n', &bytes[i..])?;
            }
            _ => (),
        }
        i += 1;
    }
    None
}

struct Line<'s> {
    state: &'s mut GameState,
    records: Variation,
    depth: usize,
}

impl Line<'_> {
    fn flush(
        &mut self,
        movetext: &str,
        token_start: &mut Option<usize>,
        end: usize,
    ) -> Result<(), ParseError> {
        match token_start.take() {
            Some(start) => self.token(&movetext[start..end]),
            None => Ok(()),
        }
    }

    fn token(&mut self, raw: &str) -> Result<(), ParseError> {
        let token = MOVE_NUMBER.find(raw).map_or(raw, |number| &raw[number.end()..]);
        if token.is_empty() || token == "e.p." {
            return Ok(());
        }

        let malformed = || ParseError::MalformedToken {
            token: token.to_owned(),
        };

        if token.starts_with('$') {
            let nag = Nag::from_ascii(token.as_bytes()).map_err(|_| malformed())?;
            return self.annotate(token, nag);
        }

        let (san, glyph) = split_glyph(token.as_bytes()).map_err(|_| malformed())?;
        if san.is_empty() {
            return match glyph {
                Some(nag) => self.annotate(token, nag),
                None => Ok(()),
            };
        }

        let san_plus = SanPlus::from_ascii(san).map_err(|_| malformed())?;
        let ply = match san_plus.san {
            San::Outcome(outcome) => Ply::End(outcome),
            ref san => {
                let m = san
                    .to_move(self.state)
                    .map_err(|err| ParseError::unresolved(token, err))?;
                let color = self.state.turn;
                let undo = self.state.play(m);
                trace!(token, from = %m.from(), to = %m.to(), "resolved move");
                Ply::Move { color, m, undo }
            }
        };

        let mut record = MoveRecord::new(token, san_plus, ply);
        record.nags.extend(glyph);
        self.records.push(record);
        Ok(())
    }

    fn annotate(&mut self, token: &str, nag: Nag) -> Result<(), ParseError> {
        let record = self
            .records
            .last_mut()
            .ok_or_else(|| ParseError::DanglingComment {
                comment: token.to_owned(),
            })?;
        record.nags.push(nag);
        Ok(())
    }

    fn comment(&mut self, body: &str) -> Result<(), ParseError> {
        let body = body.trim();
        let record = self
            .records
            .last_mut()
            .ok_or_else(|| ParseError::DanglingComment {
                comment: body.to_owned(),
            })?;
        if body.is_empty() {
            return Ok(());
        }
        match record.comment {
            Some(ref mut comment) => {
                comment.push(' ');
                comment.push_str(body);
            }
            None => record.comment = Some(body.to_owned()),
        }
        Ok(())
    }

    /// Parses `fragment`, including its parentheses, as an alternative to
    /// the last move.
    fn variation(&mut self, fragment: &str) -> Result<(), ParseError> {
        let anchor = self
            .records
            .last_mut()
            .ok_or_else(|| ParseError::DanglingVariation {
                fragment: fragment.to_owned(),
            })?;

        let mut branch = self.state.clone();
        anchor.rewind(&mut branch);
        trace!(depth = self.depth + 1, anchor = %anchor.san, "entering variation");

        let inner = &fragment[1..fragment.len() - 1];
        let variation = parse_line(inner, &mut branch, self.depth + 1)?;
        anchor.variations.push(variation);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        color::Color,
        errors::ParseErrorKind,
        fen::Fen,
        square::Square,
        types::Outcome,
    };

    fn parse(movetext: &str) -> Result<Variation, ParseError> {
        parse_sequence(movetext, GameState::new())
    }

    fn kind(movetext: &str) -> ParseErrorKind {
        parse(movetext).expect_err("invalid movetext").kind()
    }

    #[test]
    fn test_move_numbers() {
        let moves = parse("1.e4 e5 2. Nf3 2... Nc6 3.Bb5").expect("valid movetext");
        assert_eq!(
            moves.iter().map(|r| r.san.as_str()).collect::<Vec<_>>(),
            ["e4", "e5", "Nf3", "Nc6", "Bb5"]
        );
        assert_eq!(moves[3].color(), Some(Color::Black));
        assert_eq!(moves[4].from(), Some(Square::F1));
    }

    #[test]
    fn test_whitespace() {
        let moves = parse("1.\te4\r\ne5\n\n2. Nf3\t").expect("valid movetext");
        assert_eq!(moves.plies(), 3);
    }

    #[test]
    fn test_outcome() {
        let moves = parse("1. f3 e5 2. g4 Qh4# 0-1").expect("valid movetext");
        assert_eq!(moves.len(), 5);
        assert!(moves[3].is_checkmate());
        assert_eq!(moves[4].outcome(), Some(Outcome::BlackWins));
        assert_eq!(moves.outcome(), Some(Outcome::BlackWins));
    }

    #[test]
    fn test_comments() {
        let moves = parse("1. e4 {Best by test.} ; and popular\ne5 {} { Solid. }")
            .expect("valid movetext");
        assert_eq!(moves[0].comment.as_deref(), Some("Best by test. and popular"));
        assert_eq!(moves[1].comment.as_deref(), Some("Solid."));

        assert_eq!(kind("{Opening} 1. e4"), ParseErrorKind::DanglingComment);
        assert_eq!(kind("; Opening\n1. e4"), ParseErrorKind::DanglingComment);
        assert_eq!(kind("1. e4 {unclosed"), ParseErrorKind::UnterminatedComment);
    }

    #[test]
    fn test_glyphs() {
        let moves = parse("1. e4! e5 $6 2. Qh5?? !").expect("valid movetext");
        assert_eq!(moves[0].san, "e4!");
        assert_eq!(moves[0].nags, [Nag::GOOD_MOVE]);
        assert_eq!(moves[1].nags, [Nag::DUBIOUS_MOVE]);
        assert_eq!(moves[2].nags, [Nag::BLUNDER, Nag::GOOD_MOVE]);

        assert_eq!(kind("$1 1. e4"), ParseErrorKind::DanglingComment);
        assert_eq!(kind("1. e4 $x"), ParseErrorKind::MalformedToken);
        assert_eq!(kind("1. e4?!?"), ParseErrorKind::MalformedToken);
    }

    #[test]
    fn test_variations() {
        let moves = parse("1. e4 e5 (1... c5 2. Nf3 (2. c3) d6) 2. Nf3").expect("valid movetext");
        assert_eq!(moves.len(), 3);

        let sicilian = &moves[1].variations[0];
        assert_eq!(sicilian.len(), 3);
        assert_eq!(sicilian[0].from(), Some(Square::C7));
        assert_eq!(sicilian[1].variations[0][0].to(), Some(Square::C3));
        assert_eq!(sicilian[2].color(), Some(Color::Black));

        assert_eq!(moves[2].to(), Some(Square::F3));
    }

    #[test]
    fn test_variation_does_not_touch_main_line() {
        let mut state = GameState::new();
        let moves = parse_line("1. e4 (1. e3 e5 2. Ke2) e5", &mut state, 0).expect("valid movetext");
        assert_eq!(moves.plies(), 2);
        assert_eq!(state.board.piece_at(Square::E1), Some(Color::White.king()));
        assert_eq!(state.board.piece_at(Square::E3), None);
        assert_eq!(state.fullmoves, 2);
    }

    #[test]
    fn test_variation_errors() {
        assert_eq!(kind("(1. d4) 1. e4"), ParseErrorKind::DanglingVariation);
        assert_eq!(kind("1. e4 (1. d4 d5"), ParseErrorKind::UnterminatedVariation);
        assert_eq!(kind("1. e4 (1. d4 {)} d5"), ParseErrorKind::UnterminatedVariation);
        assert_eq!(kind("1. e4 (1. Nf6)"), ParseErrorKind::AmbiguousOrUnresolvedMove);
        assert_eq!(kind("1. e4 e5)"), ParseErrorKind::MalformedToken);
    }

    #[test]
    fn test_comment_hides_parens() {
        let moves = parse("1. e4 (1. d4 {(not a variation} d5) e5").expect("valid movetext");
        assert_eq!(moves[0].variations[0][0].comment.as_deref(), Some("(not a variation"));
    }

    #[test]
    fn test_en_passant_suffix() {
        let moves = parse("1. e4 a6 2. e5 d5 3. exd6 e.p.").expect("valid movetext");
        assert_eq!(moves.plies(), 5);
        assert!(moves[4].is_en_passant());
        assert_eq!(moves[4].ep_square(), Some(Square::D5));
    }

    #[test]
    fn test_from_fen() {
        let fen: Fen = "4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1".parse().expect("valid fen");
        let game = parse_game("1. O-O-O Ke7 2. Rh8", Some(fen.into_state())).expect("valid movetext");
        let mut state = game.starting_state().cloned().expect("starting state");
        game.moves().replay(&mut state);
        assert_eq!(
            Fen(state).to_string(),
            "7R/4k3/8/8/8/8/8/2KR4 b - - 3 2"
        );
    }
}
