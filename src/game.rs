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

use std::str::FromStr;

use tracing::debug;

use crate::{
    errors::ParseError,
    fen::Fen,
    movetext::parse_game,
    record::Variation,
    state::GameState,
    tag::Tags,
    types::Outcome,
};

/// A parsed game: its tags, the position it started from, and the tree of
/// moves.
///
/// # Examples
///
/// ```
/// use pgn_tree::{Color, Game, Outcome, Square};
///
/// let game: Game = r#"
///     [Event "Paris"]
///     [White "Paul Morphy"]
///
///     1. e4 e5 2. Nf3 d6 3. d4 Bg4 4. dxe5 Bxf3 5. Qxf3 dxe5 6. Bc4 Nf6
///     7. Qb3 Qe7 8. Nc3 c6 9. Bg5 b5 10. Nxb5 cxb5 11. Bxb5+ Nbd7
///     12. O-O-O Rd8 13. Rxd7 Rxd7 14. Rd1 Qe6 15. Bxd7+ Nxd7 16. Qb8+ Nxb8
///     17. Rd8# 1-0
/// "#.parse()?;
///
/// assert_eq!(game.tag("White"), Some("Paul Morphy"));
/// assert_eq!(game.move_pairs_count(), 16);
/// assert_eq!(game.outcome(), Some(Outcome::WhiteWins));
///
/// let state = game.final_state();
/// assert_eq!(state.turn, Color::Black);
/// assert_eq!(state.board.piece_at(Square::D8), Some(Color::White.rook()));
/// # Ok::<_, pgn_tree::ParseError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Game {
    tags: Tags,
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_fen"))]
    starting_state: Option<GameState>,
    moves: Variation,
}

impl Game {
    pub(crate) fn new(tags: Tags, starting_state: Option<GameState>, moves: Variation) -> Game {
        Game {
            tags,
            starting_state,
            moves,
        }
    }

    /// Parses a complete game record: tag lines followed by movetext.
    ///
    /// Lines are trimmed. Blank lines and lines starting with `@` are
    /// skipped. A `FEN` tag sets up the starting position.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MalformedTag`] for a broken tag line,
    /// [`ParseError::InvalidStartingPosition`] for a broken `FEN` tag, and
    /// any error of [`parse_game`] for the movetext.
    pub fn from_pgn(text: &str) -> Result<Game, ParseError> {
        let mut tags = Tags::new();
        let mut movetext = String::new();
        for line in text.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('@') {
                continue;
            } else if line.starts_with('[') {
                tags.push_line(line)?;
            } else {
                if !movetext.is_empty() {
                    movetext.push('\n');
                }
                movetext.push_str(line);
            }
        }

        let starting_state = tags
            .get("FEN")
            .map(|fen| fen.parse::<Fen>().map(Fen::into_state))
            .transpose()?;

        debug!(tags = tags.len(), "parsing game record");
        let mut game = parse_game(&movetext, starting_state)?;
        game.tags = tags;
        Ok(game)
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags.get(name)
    }

    /// The position set up by a `FEN` tag, or `None` for the standard
    /// starting position.
    pub fn starting_state(&self) -> Option<&GameState> {
        self.starting_state.as_ref()
    }

    /// The main line.
    pub fn moves(&self) -> &Variation {
        &self.moves
    }

    pub fn into_moves(self) -> Variation {
        self.moves
    }

    /// Number of full moves in the main line, rounded down.
    pub fn move_pairs_count(&self) -> usize {
        self.moves.plies() / 2
    }

    /// The termination marker of the main line.
    pub fn outcome(&self) -> Option<Outcome> {
        self.moves.outcome()
    }

    /// The state after the last move of the main line.
    pub fn final_state(&self) -> GameState {
        let mut state = self.starting_state.clone().unwrap_or_default();
        self.moves.replay(&mut state);
        state
    }
}

impl FromStr for Game {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Game, ParseError> {
        Game::from_pgn(text)
    }
}

#[cfg(feature = "serde")]
fn serialize_fen<S: serde::Serializer>(
    state: &Option<GameState>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match state {
        Some(state) => serializer.collect_str(&Fen(state.clone())),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{color::Color, errors::ParseErrorKind, fen::ParseFenError, square::Square};

    #[test]
    fn test_tags_and_movetext() {
        let game = Game::from_pgn(
            "[Event \"Casual\"]\n\
             @ignored line\n\
             [Site \"Berlin \\\"GER\\\"\"]\n\
             \n\
             1. e4 {Comment\n\
             spanning lines} e5\n\
             *\n",
        )
        .expect("valid game");
        assert_eq!(game.tag("Event"), Some("Casual"));
        assert_eq!(game.tag("Site"), Some("Berlin \"GER\""));
        assert_eq!(game.tags().len(), 2);
        assert_eq!(
            game.moves()[0].comment.as_deref(),
            Some("Comment\nspanning lines")
        );
        assert_eq!(game.outcome(), Some(Outcome::Unknown));
        assert_eq!(game.move_pairs_count(), 1);
        assert_eq!(game.starting_state(), None);
    }

    #[test]
    fn test_fen_tag() {
        let game = Game::from_pgn(
            "[SetUp \"1\"]\n\
             [FEN \"4k3/8/8/8/8/8/4P3/4K3 w - - 0 1\"]\n\
             1. e4 Kd7 2. e5 1/2-1/2",
        )
        .expect("valid game");
        assert!(game.starting_state().is_some());
        let state = game.final_state();
        assert_eq!(state.board.piece_at(Square::E5), Some(Color::White.pawn()));
        assert_eq!(Fen(state).to_string(), "8/3k4/8/4P3/8/8/8/4K3 b - - 0 2");
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            Game::from_pgn("[FEN \"8/8/8/8/8/8/8/8 w\"]\n1. e4"),
            Err(ParseError::InvalidStartingPosition(
                ParseFenError::WrongFieldCount
            ))
        );
        assert_eq!(
            Game::from_pgn("[Event]\n1. e4")
                .expect_err("malformed tag")
                .kind(),
            ParseErrorKind::MalformedTag
        );
        assert_eq!(
            Game::from_pgn("1. e4 Zf3")
                .expect_err("malformed token")
                .kind(),
            ParseErrorKind::MalformedToken
        );
    }
}
